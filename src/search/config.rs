//! Path search configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Expansion budgets for the two search strategies.
///
/// An expansion is one provisional step into an Open neighbor. When a
/// search spends its budget it unwinds and keeps the best path found so
/// far, if any. `None` means unlimited, which makes the search exhaustive
/// and exponential in the worst case.
///
/// # Examples
///
/// ```
/// use u_lattice_route::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_directed_limit(Some(500_000))
///     .with_omni_limit(Some(50_000));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Budget of the monotonic search.
    pub directed_limit: Option<usize>,

    /// Budget of the omni-directional fallback search.
    pub omni_limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            directed_limit: Some(2_000_000),
            omni_limit: Some(200_000),
        }
    }
}

impl SearchConfig {
    /// Both searches exhaustive.
    pub fn unlimited() -> Self {
        Self {
            directed_limit: None,
            omni_limit: None,
        }
    }

    pub fn with_directed_limit(mut self, limit: Option<usize>) -> Self {
        self.directed_limit = limit;
        self
    }

    pub fn with_omni_limit(mut self, limit: Option<usize>) -> Self {
        self.omni_limit = limit;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.directed_limit == Some(0) {
            return Err("directed_limit must be positive when set".into());
        }
        if self.omni_limit == Some(0) {
            return Err("omni_limit must be positive when set".into());
        }
        Ok(())
    }
}
