use crate::{AccessType, Principal, ResourceType};

/// How a requirement's claims are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// A claim for the specific resource key must exist.
    Exact,
    /// Any claim of the resource type with the action suffices,
    /// regardless of key (list/read-any endpoints).
    AnyOfType,
    /// Any-of-type gates visibility; a route-supplied key additionally
    /// requires the exact claim. No route key: any-of-type alone wins.
    Hierarchical,
}

/// Where the resource key for a requirement comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKeySource {
    /// Named path parameter.
    Route(&'static str),
    /// Path parameter when present, else the caller's email claim, else
    /// the caller's machine client identifier. First non-empty wins.
    CallerIdentity(Option<&'static str>),
    /// No specific resource key.
    None,
}

/// One protected endpoint family's authorization rule. Static data, not
/// request state: the whole engine is a table of these plus `evaluate`.
#[derive(Debug, Clone, Copy)]
pub struct Requirement {
    pub resource_type: ResourceType,
    pub action: AccessType,
    pub policy: MatchPolicy,
    pub key_source: ResourceKeySource,
}

impl Requirement {
    pub const fn exact(
        resource_type: ResourceType,
        action: AccessType,
        route_param: &'static str,
    ) -> Self {
        Self {
            resource_type,
            action,
            policy: MatchPolicy::Exact,
            key_source: ResourceKeySource::Route(route_param),
        }
    }

    pub const fn any_of_type(resource_type: ResourceType, action: AccessType) -> Self {
        Self {
            resource_type,
            action,
            policy: MatchPolicy::AnyOfType,
            key_source: ResourceKeySource::None,
        }
    }

    pub const fn hierarchical(
        resource_type: ResourceType,
        action: AccessType,
        route_param: &'static str,
    ) -> Self {
        Self {
            resource_type,
            action,
            policy: MatchPolicy::Hierarchical,
            key_source: ResourceKeySource::Route(route_param),
        }
    }

    /// Exact match with the caller-identity fallback chain (User and
    /// Notifications families).
    pub const fn caller_scoped(
        resource_type: ResourceType,
        action: AccessType,
        route_param: Option<&'static str>,
    ) -> Self {
        Self {
            resource_type,
            action,
            policy: MatchPolicy::Exact,
            key_source: ResourceKeySource::CallerIdentity(route_param),
        }
    }
}

/// Evaluate a requirement against an augmented principal.
///
/// Pure claim-set lookup: no I/O, synchronous, idempotent; safe to
/// re-evaluate any number of times within a request.
pub fn evaluate(
    requirement: &Requirement,
    principal: &Principal,
    route_params: &[(String, String)],
) -> bool {
    let key = resolve_key(requirement, principal, route_params);

    match requirement.policy {
        MatchPolicy::Exact => match key {
            Some(key) => principal.permissions.iter().any(|c| {
                c.matches(requirement.resource_type, &key, requirement.action)
            }),
            // Fail closed: an exact policy without a resolvable key can
            // never succeed.
            None => false,
        },
        MatchPolicy::AnyOfType => any_of_type(requirement, principal),
        MatchPolicy::Hierarchical => {
            if !any_of_type(requirement, principal) {
                return false;
            }
            match key {
                Some(key) => principal.permissions.iter().any(|c| {
                    c.matches(requirement.resource_type, &key, requirement.action)
                }),
                None => true,
            }
        }
    }
}

fn any_of_type(requirement: &Requirement, principal: &Principal) -> bool {
    principal
        .permissions
        .iter()
        .any(|c| c.matches_type_and_access(requirement.resource_type, requirement.action))
}

fn resolve_key(
    requirement: &Requirement,
    principal: &Principal,
    route_params: &[(String, String)],
) -> Option<String> {
    match requirement.key_source {
        ResourceKeySource::Route(name) => param(route_params, name),
        ResourceKeySource::CallerIdentity(route_param) => route_param
            .and_then(|name| param(route_params, name))
            .or_else(|| non_empty(principal.email.as_deref()))
            .or_else(|| non_empty(principal.client_id.as_deref())),
        ResourceKeySource::None => None,
    }
}

fn param(route_params: &[(String, String)], name: &str) -> Option<String> {
    route_params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
        .filter(|v| !v.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(String::from)
}
