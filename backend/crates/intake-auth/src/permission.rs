use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Claim type under which permission grants are attached to a principal.
pub const PERMISSION_CLAIM_TYPE: &str = "permission";

/// Protected resource families. Closed enumeration: an unrecognized type
/// in stored data is a data error, not a new capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Application,
    ApplicationFiles,
    File,
    User,
    Notifications,
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessType {
    Read,
    Write,
    Delete,
}

impl ResourceType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::ApplicationFiles => "ApplicationFiles",
            Self::File => "File",
            Self::User => "User",
            Self::Notifications => "Notifications",
            Self::Template => "Template",
        }
    }
}

impl AccessType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Write => "Write",
            Self::Delete => "Delete",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Application,
            Self::ApplicationFiles,
            Self::File,
            Self::User,
            Self::Notifications,
            Self::Template,
        ]
        .into_iter()
        .find(|v| v.as_str().eq_ignore_ascii_case(s))
        .ok_or(())
    }
}

impl FromStr for AccessType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Read, Self::Write, Self::Delete]
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// One capability grant: `(resource type, resource key, access type)`.
///
/// The wire and storage form is the string `"{Type}:{key}:{Access}"`,
/// compared case-insensitively in every position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionClaim {
    pub resource_type: ResourceType,
    pub resource_key: String,
    pub access_type: AccessType,
}

impl PermissionClaim {
    pub fn new(
        resource_type: ResourceType,
        resource_key: impl Into<String>,
        access_type: AccessType,
    ) -> Self {
        Self {
            resource_type,
            resource_key: resource_key.into(),
            access_type,
        }
    }

    /// Exact match against a specific resource key.
    pub fn matches(&self, resource_type: ResourceType, key: &str, access: AccessType) -> bool {
        self.resource_type == resource_type
            && self.access_type == access
            && self.resource_key.eq_ignore_ascii_case(key)
    }

    /// Match ignoring the resource key ("has permission on at least one
    /// resource of this type").
    pub fn matches_type_and_access(&self, resource_type: ResourceType, access: AccessType) -> bool {
        self.resource_type == resource_type && self.access_type == access
    }
}

impl fmt::Display for PermissionClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.resource_type, self.resource_key, self.access_type
        )
    }
}

impl FromStr for PermissionClaim {
    type Err = ();

    /// The key may itself contain ':' (the type is the first segment, the
    /// access type the last).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (type_part, rest) = s.split_once(':').ok_or(())?;
        let (key_part, access_part) = rest.rsplit_once(':').ok_or(())?;

        if key_part.is_empty() {
            return Err(());
        }

        Ok(Self {
            resource_type: type_part.parse()?,
            resource_key: key_part.to_string(),
            access_type: access_part.parse()?,
        })
    }
}
