//! The backtracking chain that turns per-fragment candidates into whole matches

mod chainer;
mod config;
pub mod constants;
mod element;
mod errors;
mod traversal;

pub use chainer::{Chainer, Matches};
pub use config::GeneratorConfig;
pub use element::{ChainElement, Fragments};
pub use errors::GenerationError;
pub use traversal::Traversal;
