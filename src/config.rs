//! Configuration for deferred `combine`.
//!
//! Only the deferred layer has a tunable: how pending inputs are resolved.
//! Synchronous combinators have no configuration.
//!
//! # Configuration Precedence
//!
//! 1. **Programmatic**: values set on [`CombineConfig`] directly
//! 2. **Environment variables**: applied by [`CombineConfig::from_env`] or
//!    [`apply_env_overrides`]
//! 3. **Defaults**: [`CombineConfig::default()`]
//!
//! # Supported Environment Variables
//!
//! | Variable | Type | Maps to |
//! |----------|------|---------|
//! | `RAILWAY_RESOLVE_ORDER` | `sequential` \| `concurrent` | `order` |

use core::fmt;
use core::str::FromStr;

use crate::error::ConfigError;

/// Environment variable name for the deferred combine resolve order.
pub const ENV_RESOLVE_ORDER: &str = "RAILWAY_RESOLVE_ORDER";

/// How deferred `combine` drives its pending inputs.
///
/// Both orders report the same outcome: the successes in input order, or
/// the failure of the earliest failing input by position. They differ
/// only in which futures get polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolveOrder {
    /// Await inputs one at a time, left to right. Inputs after the first
    /// failure are never polled.
    #[default]
    Sequential,
    /// Poll every unresolved input on each wake. Completes as soon as the
    /// result is decided by position.
    Concurrent,
}

impl ResolveOrder {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for ResolveOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolveOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "concurrent" => Ok(Self::Concurrent),
            _ => Err(ConfigError::UnknownResolveOrder(s.to_string())),
        }
    }
}

/// Configuration for the deferred `combine` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CombineConfig {
    /// Resolution strategy for pending inputs.
    pub order: ResolveOrder,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CombineConfig {
    /// Creates a configuration with default settings (sequential).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            order: ResolveOrder::Sequential,
        }
    }

    /// Creates a configuration that resolves inputs left to right.
    #[must_use]
    pub const fn sequential() -> Self {
        Self::new()
    }

    /// Creates a configuration that polls inputs concurrently.
    #[must_use]
    pub const fn concurrent() -> Self {
        Self {
            order: ResolveOrder::Concurrent,
        }
    }

    /// Sets the resolve order.
    #[must_use]
    pub const fn with_order(mut self, order: ResolveOrder) -> Self {
        self.order = order;
        self
    }

    /// Builds the default configuration with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();
        apply_env_overrides(&mut config)?;
        Ok(config)
    }
}

/// Apply environment variable overrides to a [`CombineConfig`].
///
/// Only variables that are set are applied. Returns an error if a variable
/// is set but cannot be parsed.
pub fn apply_env_overrides(config: &mut CombineConfig) -> Result<(), ConfigError> {
    apply_overrides_with(config, read_env)
}

fn apply_overrides_with<L>(config: &mut CombineConfig, lookup: L) -> Result<(), ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_RESOLVE_ORDER) {
        config.order = parse_order(ENV_RESOLVE_ORDER, &val)?;
    }
    Ok(())
}

/// Read an environment variable, returning `None` if unset.
fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_order(var: &'static str, val: &str) -> Result<ResolveOrder, ConfigError> {
    val.parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: val.to_string(),
        expected: "sequential|concurrent",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sequential() {
        assert_eq!(CombineConfig::default().order, ResolveOrder::Sequential);
        assert_eq!(CombineConfig::sequential(), CombineConfig::new());
    }

    #[test]
    fn builder_sets_order() {
        let config = CombineConfig::new().with_order(ResolveOrder::Concurrent);
        assert_eq!(config, CombineConfig::concurrent());
    }

    #[test]
    fn resolve_order_parses_case_insensitively() {
        assert_eq!(" Concurrent ".parse(), Ok(ResolveOrder::Concurrent));
        assert_eq!("SEQUENTIAL".parse(), Ok(ResolveOrder::Sequential));
        assert!(matches!(
            "parallel".parse::<ResolveOrder>(),
            Err(ConfigError::UnknownResolveOrder(_))
        ));
    }

    #[test]
    fn resolve_order_display_round_trips() {
        for order in [ResolveOrder::Sequential, ResolveOrder::Concurrent] {
            assert_eq!(order.to_string().parse(), Ok(order));
        }
    }

    #[test]
    fn override_applies_when_set() {
        let mut config = CombineConfig::new();
        apply_overrides_with(&mut config, |name| {
            (name == ENV_RESOLVE_ORDER).then(|| "concurrent".to_string())
        })
        .expect("valid override");
        assert_eq!(config.order, ResolveOrder::Concurrent);
    }

    #[test]
    fn override_skipped_when_unset() {
        let mut config = CombineConfig::concurrent();
        apply_overrides_with(&mut config, |_| None).expect("no overrides");
        assert_eq!(config, CombineConfig::concurrent());
    }

    #[test]
    fn override_rejects_garbage() {
        let mut config = CombineConfig::new();
        let err = apply_overrides_with(&mut config, |_| Some("sometimes".to_string()))
            .expect_err("garbage must be rejected");
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: ENV_RESOLVE_ORDER,
                value: "sometimes".to_string(),
                expected: "sequential|concurrent",
            }
        );
        assert_eq!(config.order, ResolveOrder::Sequential);
    }
}
