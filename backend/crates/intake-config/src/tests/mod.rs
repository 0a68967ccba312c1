mod auth;

use std::env;

use tempfile::TempDir;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory and set INTAKE_CONFIG_DIR
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("INTAKE_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}

/// A config.toml that passes validation: one tenant, internal secret set.
pub(crate) const MINIMAL_VALID_TOML: &str = r#"
[auth.internal]
secret = "0123456789abcdef0123456789abcdef"

[[tenants]]
id = "11111111-1111-1111-1111-111111111111"
name = "Acme"
frontend_origins = ["https://app.acme.example"]
"#;
