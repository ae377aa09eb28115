use std::env;
use std::path::PathBuf;

use snafu::prelude::*;

use crate::common::{ConfigSnafu, Result};

pub const AUTH_EMAIL_VAR: &str = "CLOUDFLARE_AUTH_EMAIL";
pub const AUTH_KEY_VAR: &str = "CLOUDFLARE_AUTH_KEY";

/// Everything a reconciliation run needs, already resolved against
/// the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub file: PathBuf,
    pub auth_email: String,
    pub auth_key: String,
    pub auto_create: bool,
    pub dry_run: bool,
}

impl Config {
    pub fn new(
        file: PathBuf,
        auth_email: Option<String>,
        auth_key: Option<String>,
        auto_create: bool,
        dry_run: bool,
    ) -> Result<Self> {
        let auth_email = auth_email
            .or_else(|| env::var(AUTH_EMAIL_VAR).ok())
            .context(ConfigSnafu {
                message: format!("--auth-email or {AUTH_EMAIL_VAR} is required"),
            })?;
        let auth_key = auth_key
            .or_else(|| env::var(AUTH_KEY_VAR).ok())
            .context(ConfigSnafu {
                message: format!("--auth-key or {AUTH_KEY_VAR} is required"),
            })?;

        Ok(Self {
            file,
            auth_email,
            auth_key: key_file_or_string(auth_key)?,
            auto_create,
            dry_run,
        })
    }
}

/// If the value begins with an '@', read the key from that file path,
/// otherwise return the value as-is.
fn key_file_or_string(value: String) -> Result<String> {
    Ok(match value.strip_prefix('@') {
        Some(key_file) => std::fs::read_to_string(key_file)
            .map_err(|err| {
                ConfigSnafu {
                    message: format!("Failed to read key from {key_file}: {err}"),
                }
                .build()
            })?
            .trim()
            .into(),
        None => value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_keys_pass_through() {
        assert_eq!(
            key_file_or_string("secret".to_string()).unwrap(),
            "secret"
        );
    }

    #[test]
    fn at_prefixed_keys_are_read_from_a_file() {
        let path = env::temp_dir().join("cloudflare-zone-key-test");
        std::fs::write(&path, "secret-from-file\n").unwrap();
        let value = format!("@{}", path.display());
        assert_eq!(key_file_or_string(value).unwrap(), "secret-from-file");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_key_file_is_a_config_error() {
        assert!(key_file_or_string("@/nonexistent/key".to_string()).is_err());
    }
}
