use crate::chain::constants::DEFAULT_MAX_STEPS;

/// Configuration for match generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Search steps allowed while looking for a single match
    pub max_steps: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}
