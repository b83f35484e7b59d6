//! Ruin-and-recreate configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::search::SearchConfig;

/// Configuration for the ruin-and-recreate loop.
///
/// # Termination
///
/// The loop stops after `generation_limit` consecutive generations without
/// an improvement. Every improvement resets the counter.
///
/// # Ruin region
///
/// Each generation opens every path that touches a random axis-aligned box.
/// The box width along each axis is drawn uniformly from
/// `[width_min, width_max]` cells (clamped to the lattice side).
///
/// # Examples
///
/// ```
/// use u_lattice_route::ruin::RuinConfig;
///
/// let config = RuinConfig::default()
///     .with_generation_limit(500)
///     .with_width(3, 6)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuinConfig {
    /// Consecutive non-improving generations before stopping.
    pub generation_limit: usize,

    /// Smallest ruin box width, in cells.
    pub width_min: u32,

    /// Largest ruin box width, in cells.
    pub width_max: u32,

    /// Random seed; the clock is used when unset.
    pub seed: Option<u64>,

    /// Budgets of the path searches run during construction.
    pub search: SearchConfig,
}

impl Default for RuinConfig {
    fn default() -> Self {
        Self {
            generation_limit: 30_000,
            width_min: 4,
            width_max: 5,
            seed: None,
            search: SearchConfig::default(),
        }
    }
}

impl RuinConfig {
    pub fn with_generation_limit(mut self, n: usize) -> Self {
        self.generation_limit = n;
        self
    }

    pub fn with_width(mut self, min: u32, max: u32) -> Self {
        self.width_min = min;
        self.width_max = max;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.generation_limit == 0 {
            return Err("generation_limit must be positive".into());
        }
        if self.width_min > self.width_max {
            return Err(format!(
                "width_min ({}) must be <= width_max ({})",
                self.width_min, self.width_max
            ));
        }
        self.search.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuinConfig::default();
        assert_eq!(config.generation_limit, 30_000);
        assert_eq!((config.width_min, config.width_max), (4, 5));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_generation_limit() {
        let config = RuinConfig::default().with_generation_limit(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_width() {
        let config = RuinConfig::default().with_width(6, 3);
        assert!(config.validate().is_err());
        assert!(RuinConfig::default().with_width(0, 0).validate().is_ok());
    }

    #[test]
    fn test_validate_propagates_search() {
        let config =
            RuinConfig::default().with_search(SearchConfig::default().with_omni_limit(Some(0)));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_chain() {
        let config = RuinConfig::default()
            .with_generation_limit(100)
            .with_width(2, 3)
            .with_seed(7)
            .with_search(SearchConfig::unlimited());

        assert_eq!(config.generation_limit, 100);
        assert_eq!(config.width_min, 2);
        assert_eq!(config.width_max, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.search, SearchConfig::unlimited());
    }
}
