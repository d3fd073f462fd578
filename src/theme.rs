use crate::gateway::Gateway;
use crate::store::{KeyValueStore, StoreError};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeOverride {
    Light,
    Dark,
}

impl ThemeOverride {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeOverride::Light => "light",
            ThemeOverride::Dark => "dark",
        }
    }
}

impl FromStr for ThemeOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeOverride::Light),
            "dark" => Ok(ThemeOverride::Dark),
            other => Err(format!("Unknown theme: {other} (use light|dark|system)")),
        }
    }
}

impl fmt::Display for ThemeOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The scheme reported by the host when no override is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemScheme {
    #[default]
    Light,
    Dark,
}

impl FromStr for SystemScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<ThemeOverride>()? {
            ThemeOverride::Light => Ok(SystemScheme::Light),
            ThemeOverride::Dark => Ok(SystemScheme::Dark),
        }
    }
}

/// RGB triples for the terminal output of each scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub muted: (u8, u8, u8),
    pub header: (u8, u8, u8),
    pub timestamp: (u8, u8, u8),
    pub highlight: (u8, u8, u8),
    pub pin: (u8, u8, u8),
}

impl Palette {
    pub const DARK: Self = Self {
        muted: (108, 112, 134),
        header: (148, 226, 213),
        timestamp: (137, 180, 250),
        highlight: (243, 139, 168),
        pin: (249, 226, 175),
    };

    pub const LIGHT: Self = Self {
        muted: (140, 143, 161),
        header: (23, 146, 153),
        timestamp: (30, 102, 245),
        highlight: (210, 15, 57),
        pin: (223, 142, 29),
    };
}

/// Process-wide theme state, created at startup and handed to whoever
/// renders output.
#[derive(Debug, Clone)]
pub struct ThemeContext {
    system: SystemScheme,
    override_value: Option<ThemeOverride>,
}

impl ThemeContext {
    pub fn new(system: SystemScheme, override_value: Option<ThemeOverride>) -> Self {
        Self { system, override_value }
    }

    /// An unreadable override falls back to following the system scheme.
    pub fn init<S: KeyValueStore>(gateway: &Gateway<S>, system: SystemScheme) -> Self {
        let override_value = gateway.theme_override().unwrap_or_else(|err| {
            debug!(error = %err, "theme override unreadable; following system");
            None
        });
        Self::new(system, override_value)
    }

    pub fn is_dark(&self) -> bool {
        match self.override_value {
            Some(value) => value == ThemeOverride::Dark,
            None => self.system == SystemScheme::Dark,
        }
    }

    pub fn override_value(&self) -> Option<ThemeOverride> {
        self.override_value
    }

    /// Updates the in-memory value before persisting; a failed write leaves
    /// the new value active for this process.
    pub fn set_override<S: KeyValueStore>(
        &mut self,
        gateway: &mut Gateway<S>,
        value: Option<ThemeOverride>,
    ) -> Result<(), StoreError> {
        self.override_value = value;
        gateway.set_theme_override(value)
    }

    pub fn palette(&self) -> Palette {
        if self.is_dark() { Palette::DARK } else { Palette::LIGHT }
    }

    pub fn describe(&self) -> String {
        let active = if self.is_dark() { "dark" } else { "light" };
        match self.override_value {
            Some(value) => format!("{active} (override: {value})"),
            None => format!("{active} (following system)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn override_beats_system_scheme() {
        let ctx = ThemeContext::new(SystemScheme::Dark, Some(ThemeOverride::Light));
        assert!(!ctx.is_dark());
        assert_eq!(ctx.palette(), Palette::LIGHT);
        let ctx = ThemeContext::new(SystemScheme::Dark, None);
        assert!(ctx.is_dark());
        assert_eq!(ctx.describe(), "dark (following system)");
    }

    #[test]
    fn init_reads_persisted_override() {
        let mut gw = Gateway::new(MemoryStore::new());
        gw.set_theme_override(Some(ThemeOverride::Dark)).unwrap();
        let ctx = ThemeContext::init(&gw, SystemScheme::Light);
        assert!(ctx.is_dark());
        assert_eq!(ctx.override_value(), Some(ThemeOverride::Dark));
    }

    #[test]
    fn set_override_persists_and_survives_failure_in_memory() {
        let mut gw = Gateway::new(MemoryStore::new());
        let mut ctx = ThemeContext::init(&gw, SystemScheme::Light);
        ctx.set_override(&mut gw, Some(ThemeOverride::Dark)).unwrap();
        assert_eq!(gw.theme_override().unwrap(), Some(ThemeOverride::Dark));

        gw.store_mut().set_fail_writes(true);
        assert!(ctx.set_override(&mut gw, None).is_err());
        assert_eq!(ctx.override_value(), None);
        assert_eq!(gw.theme_override().unwrap(), Some(ThemeOverride::Dark));
    }

    #[test]
    fn parses_theme_names() {
        assert_eq!("Dark".parse::<ThemeOverride>().unwrap(), ThemeOverride::Dark);
        assert!("system".parse::<ThemeOverride>().is_err());
        assert_eq!("dark".parse::<SystemScheme>().unwrap(), SystemScheme::Dark);
    }
}
