//! Pattern compilation: from pattern text to an ordered list of fragments

pub mod alphabet;
mod ast;
mod compiler;
pub mod constants;
mod display;
mod errors;

pub use ast::{FragmentSpec, Quantifier, Unit};
pub use compiler::{CompileResult, PatternCompiler, compile};
pub use errors::PatternError;
