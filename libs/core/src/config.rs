use std::env;
use std::time::Duration;

use presence_assets::DEFAULT_MAX_IMAGE_BYTES;
use tracing::warn;

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Size hint passed to assets when checking that an icon produces an image.
    pub icon_size: Option<u32>,
    pub http_timeout: Duration,
    /// Largest web icon body accepted, in bytes.
    pub max_icon_bytes: u64,
    pub user_agent: String,
    pub party_id: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            icon_size: None,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            max_icon_bytes: DEFAULT_MAX_IMAGE_BYTES,
            user_agent: format!("presence-core/{}", crate::version()),
            party_id: Some(crate::version().to_string()),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads `PRESENCE_ICON_SIZE`, `PRESENCE_HTTP_TIMEOUT_SECS`, `PRESENCE_MAX_ICON_BYTES`,
    /// `PRESENCE_USER_AGENT` and `PRESENCE_PARTY_ID` through `lookup`. Unparseable numbers keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("PRESENCE_ICON_SIZE") {
            match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => config.icon_size = Some(size),
                _ => warn!(value = %raw, "ignoring invalid PRESENCE_ICON_SIZE"),
            }
        }
        if let Some(raw) = lookup("PRESENCE_HTTP_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.http_timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid PRESENCE_HTTP_TIMEOUT_SECS"),
            }
        }
        if let Some(raw) = lookup("PRESENCE_MAX_ICON_BYTES") {
            match raw.trim().parse::<u64>() {
                Ok(bytes) if bytes > 0 => config.max_icon_bytes = bytes,
                _ => warn!(value = %raw, "ignoring invalid PRESENCE_MAX_ICON_BYTES"),
            }
        }
        if let Some(agent) = lookup("PRESENCE_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = agent;
        }
        if let Some(party) = lookup("PRESENCE_PARTY_ID") {
            let party = party.trim();
            config.party_id = (!party.is_empty()).then(|| party.to_string());
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = EngineConfig::from_lookup(lookup(&[]));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.party_id.as_deref(), Some(crate::version()));
    }

    #[test]
    fn reads_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("PRESENCE_ICON_SIZE", "128"),
            ("PRESENCE_HTTP_TIMEOUT_SECS", "3"),
            ("PRESENCE_MAX_ICON_BYTES", "65536"),
            ("PRESENCE_USER_AGENT", "my-ide/1.0"),
            ("PRESENCE_PARTY_ID", "party-7"),
        ]));
        assert_eq!(config.icon_size, Some(128));
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.max_icon_bytes, 65_536);
        assert_eq!(config.user_agent, "my-ide/1.0");
        assert_eq!(config.party_id.as_deref(), Some("party-7"));
    }

    #[test]
    fn invalid_numbers_keep_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("PRESENCE_ICON_SIZE", "big"),
            ("PRESENCE_HTTP_TIMEOUT_SECS", "0"),
            ("PRESENCE_MAX_ICON_BYTES", "-1"),
        ]));
        assert_eq!(config.icon_size, None);
        assert_eq!(config.http_timeout, DEFAULT_HTTP_TIMEOUT);
        assert_eq!(config.max_icon_bytes, DEFAULT_MAX_IMAGE_BYTES);
    }

    #[test]
    fn blank_party_id_disables_it() {
        let config = EngineConfig::from_lookup(lookup(&[("PRESENCE_PARTY_ID", " ")]));
        assert_eq!(config.party_id, None);
    }
}
