// Limits applied while compiling patterns
pub const MAX_WILDCARD_GROUP_WIDTH: usize = 8;
pub const MAX_GROUP_CANDIDATES: usize = 100_000;
