//! Configuration for subgraph views

/// Settings of a subgraph view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubgraphConfig {
    /// Reject handles that are value-equal to, but not the same instance as,
    /// the base graph's element. Disabling skips a scan over the base on
    /// every insertion; callers must then only pass the base's own handles.
    pub verify_integrity: bool,
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self {
            verify_integrity: true,
        }
    }
}

impl SubgraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verify_integrity(mut self, verify: bool) -> Self {
        self.verify_integrity = verify;
        self
    }
}
