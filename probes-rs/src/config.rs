use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per probe settings, typically deserialized from the host's configuration.
///
/// ```
/// use probes_rs::ProbeConfig;
///
/// let config: ProbeConfig = serde_json::from_str(r#"{"name": "Altitude", "cadence_ms": 50}"#).unwrap();
/// assert!(config.enabled);
/// assert_eq!(config.cadence().unwrap().as_millis(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub name: String,
    /// Disabled probes are left `Created` by the registry.
    pub enabled: bool,
    /// Requested sampling period. `None` picks the probe's default.
    pub cadence_ms: Option<u64>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            enabled: true,
            cadence_ms: None,
        }
    }
}

impl ProbeConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the cadence. Config has millisecond resolution: sub-millisecond
    /// parts are dropped and periods beyond `u64::MAX` ms saturate.
    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence_ms = Some(u64::try_from(cadence.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn cadence(&self) -> Option<Duration> {
        self.cadence_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config: ProbeConfig = serde_json::from_str(r#"{"name": "Battery"}"#).unwrap();
        assert_eq!(config, ProbeConfig::new("Battery"));
        assert!(config.cadence().is_none());
    }

    #[test]
    fn test_cadence_resolution() {
        let config = ProbeConfig::new("Altitude").with_cadence(Duration::from_micros(20_900));
        assert_eq!(config.cadence(), Some(Duration::from_millis(20)));

        let config = ProbeConfig::new("Altitude").with_cadence(Duration::MAX);
        assert_eq!(config.cadence_ms, Some(u64::MAX));
    }

    #[test]
    fn test_parse_list() {
        let configs: Vec<ProbeConfig> = serde_json::from_str(
            r#"[
                {"name": "Altitude", "cadence_ms": 20},
                {"name": "Battery", "enabled": false}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            configs,
            vec![
                ProbeConfig::new("Altitude").with_cadence(Duration::from_millis(20)),
                ProbeConfig::new("Battery").disabled(),
            ]
        );
    }
}
