//! Runtime settings, read once from the environment at startup.

use crate::debounce::DEFAULT_WINDOW;
use crate::store::DEFAULT_QUOTA_BYTES;
use crate::theme::SystemScheme;
use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

pub const DIR_VAR: &str = "POCKET_NOTES_DIR";
pub const SYSTEM_THEME_VAR: &str = "POCKET_NOTES_SYSTEM_THEME";
pub const NO_SEED_VAR: &str = "POCKET_NOTES_NO_SEED";
pub const QUOTA_VAR: &str = "POCKET_NOTES_QUOTA_BYTES";
pub const DEBOUNCE_VAR: &str = "POCKET_NOTES_DEBOUNCE_MS";
pub const LOG_VAR: &str = "POCKET_NOTES_LOG";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub system_scheme: SystemScheme,
    pub seed_samples: bool,
    pub quota_bytes: Option<u64>,
    pub debounce: Duration,
    pub use_color: bool,
}

impl Config {
    pub fn from_env() -> io::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source; unparseable values fall back to the
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> io::Result<Self> {
        let data_dir = match lookup(DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = lookup("HOME").ok_or_else(|| {
                    io::Error::other(format!("HOME not set; set {DIR_VAR} explicitly"))
                })?;
                PathBuf::from(home).join(".pocket_notes")
            }
        };
        let system_scheme = lookup(SYSTEM_THEME_VAR)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let quota_bytes = match lookup(QUOTA_VAR).map(|v| v.trim().to_string()) {
            Some(v) if v == "0" || v.eq_ignore_ascii_case("none") => None,
            Some(v) => Some(v.parse().unwrap_or(DEFAULT_QUOTA_BYTES)),
            None => Some(DEFAULT_QUOTA_BYTES),
        };
        let debounce = lookup(DEBOUNCE_VAR)
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_WINDOW);

        Ok(Self {
            data_dir,
            system_scheme,
            seed_samples: lookup(NO_SEED_VAR).is_none(),
            quota_bytes,
            debounce,
            use_color: lookup("NO_COLOR").is_none(),
        })
    }
}
