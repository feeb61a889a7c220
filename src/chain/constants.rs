// Configuration constants for match generation
pub const DEFAULT_MAX_STEPS: usize = 10_000_000;
