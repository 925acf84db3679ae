//! Configuration constants and utilities for chatline
//!
//! Connection defaults come from an INI profile file; command line
//! arguments override profile values, and built-in defaults apply when
//! neither is present.

use anyhow::{Context, Result};
use ini::Ini;

use crate::cmd_args::CommandLineArgs;

/// Default profile file path for chatline
pub const DEFAULT_PROFILE_PATH: &str = "~/.chatline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "CHATLINE_PROFILE_PATH";

/// Built-in connection defaults used when neither the command line nor
/// the profile provides a value.
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5555;

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Host/port defaults loaded from one section of the profile file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionProfile {
    host: Option<String>,
    port: Option<u16>,
}

impl ConnectionProfile {
    pub fn host(&self) -> Option<&String> {
        self.host.as_ref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

/// Reads [`ConnectionProfile`]s from an INI file.
///
/// A missing file or section is not an error; callers fall back to a
/// blank profile in that case.
pub struct IniProfileStore {
    path: String,
}

impl IniProfileStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    /// Load the named profile section, or `None` if the file or the
    /// section does not exist.
    pub fn get_profile(&self, name: &str) -> Result<Option<ConnectionProfile>> {
        let expanded = shellexpand::tilde(&self.path).to_string();
        if !std::path::Path::new(&expanded).exists() {
            tracing::debug!("Profile file '{}' not found", expanded);
            return Ok(None);
        }

        let file = Ini::load_from_file(&expanded)
            .with_context(|| format!("Failed to parse profile file '{expanded}'"))?;

        let Some(section) = file.section(Some(name)) else {
            tracing::debug!("Profile '{}' not found in '{}'", name, expanded);
            return Ok(None);
        };

        let host = section.get("host").map(str::to_string);
        let port = match section.get("port") {
            Some(raw) => Some(raw.parse::<u16>().with_context(|| {
                format!("Profile '{name}': port '{raw}' is not a valid port number")
            })?),
            None => None,
        };

        Ok(Some(ConnectionProfile { host, port }))
    }
}

/// Resolve the connection endpoint: command line flags win over the
/// profile, and built-in defaults cover the rest.
pub fn resolve_endpoint(args: &CommandLineArgs, profile: &ConnectionProfile) -> (String, u16) {
    let host = args
        .host()
        .or(profile.host())
        .map(String::from)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = args.port().or(profile.port()).unwrap_or(DEFAULT_PORT);
    (host, port)
}
