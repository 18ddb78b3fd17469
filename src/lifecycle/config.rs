//! Runtime knobs, read from the environment.

use tracing::warn;

pub const ACTOR_BUFFER_VAR: &str = "ORDER_DISPATCH_ACTOR_BUFFER";
pub const EVENT_CAPACITY_VAR: &str = "ORDER_DISPATCH_EVENT_CAPACITY";

/// Sizes of the system's queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemConfig {
    /// Request channel capacity of each actor.
    pub actor_buffer: usize,
    /// Events a subscriber may fall behind before it starts skipping.
    pub event_capacity: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            actor_buffer: 32,
            event_capacity: 256,
        }
    }
}

impl SystemConfig {
    /// Defaults overridden by `ORDER_DISPATCH_ACTOR_BUFFER` and
    /// `ORDER_DISPATCH_EVENT_CAPACITY`. Unparseable or zero values are
    /// ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            actor_buffer: read_positive(&lookup, ACTOR_BUFFER_VAR, defaults.actor_buffer),
            event_capacity: read_positive(&lookup, EVENT_CAPACITY_VAR, defaults.event_capacity),
        }
    }
}

fn read_positive(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => value,
        _ => {
            warn!(key, value = %raw, default, "Ignoring invalid setting");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        assert_eq!(SystemConfig::from_lookup(lookup(&[])), SystemConfig::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = SystemConfig::from_lookup(lookup(&[
            (ACTOR_BUFFER_VAR, "8"),
            (EVENT_CAPACITY_VAR, " 1024 "),
        ]));
        assert_eq!(config.actor_buffer, 8);
        assert_eq!(config.event_capacity, 1024);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = SystemConfig::from_lookup(lookup(&[
            (ACTOR_BUFFER_VAR, "0"),
            (EVENT_CAPACITY_VAR, "lots"),
        ]));
        assert_eq!(config, SystemConfig::default());
    }
}
