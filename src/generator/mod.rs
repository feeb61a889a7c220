//! Per-fragment candidate generation: pieces, fixed-count expansions and
//! quantifier-driven repeat sequences

mod backrefs;
mod expander;
mod piece;
mod sequencer;

pub use backrefs::Backreferences;
pub use expander::FixedLengthExpander;
pub use piece::PieceGenerator;
pub use sequencer::RepeatSequencer;

#[cfg(test)]
mod tests;
