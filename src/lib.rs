//! Genex - A library for generating every string a letter pattern matches
//!
//! Patterns are written in a small regular-expression dialect over the letters
//! `A`-`Z`: literals, classes, wildcard runs, flat alternation groups and
//! single-digit backreferences, each optionally quantified by `?`, `*` or `+`.
//! Matches are produced lazily, one per call, optionally restricted to an exact
//! length, so callers such as puzzle solvers can stop as soon as they have what
//! they need.

pub mod chain;
pub mod generator;
pub mod pattern;

use thiserror::Error;

// Re-export the main public API
pub use chain::{Chainer, GenerationError, GeneratorConfig, Matches};
pub use pattern::{FragmentSpec, PatternError, Quantifier, Unit, compile};

/// Errors from compiling a pattern or generating its matches
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenexError {
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),
}

/// Compile `pattern` into a ready-to-use match generator
///
/// # Arguments
///
/// * `pattern` - The pattern to enumerate
/// * `target_length` - Only produce matches of exactly this length, `None` for all
///
/// # Errors
///
/// Returns [`GenexError::Pattern`] when the pattern does not compile.
///
/// # Examples
///
/// ```
/// use genex::generate;
///
/// let mut chainer = generate("(AB|X)\\1", None)?;
/// assert_eq!(chainer.next_match()?, Some("XX".to_string()));
/// assert_eq!(chainer.next_match()?, Some("ABAB".to_string()));
/// assert_eq!(chainer.next_match()?, None);
/// # Ok::<(), genex::GenexError>(())
/// ```
pub fn generate(pattern: &str, target_length: Option<usize>) -> Result<Chainer, GenexError> {
    Ok(Chainer::new(pattern, target_length)?)
}

/// Count the matches of `pattern`, stopping once `cap` have been seen
///
/// # Errors
///
/// Returns an error if the pattern does not compile or the search exceeds its
/// step budget.
///
/// # Examples
///
/// ```
/// use genex::count_matches;
///
/// assert_eq!(count_matches("[CR]*", Some(8), usize::MAX)?, 256);
/// # Ok::<(), genex::GenexError>(())
/// ```
pub fn count_matches(
    pattern: &str,
    target_length: Option<usize>,
    cap: usize,
) -> Result<usize, GenexError> {
    let mut chainer = Chainer::new(pattern, target_length)?;
    Ok(chainer.count(cap)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_reports_pattern_errors() {
        let result = generate("[AB", None);
        assert!(matches!(
            result,
            Err(GenexError::Pattern(PatternError::UnterminatedClass { .. }))
        ));
    }

    #[test]
    fn test_count_matches_with_cap() {
        assert_eq!(count_matches("[CR]*", Some(8), 100), Ok(100));
        assert_eq!(count_matches("(S|MM|HHH)*", Some(7), usize::MAX), Ok(44));
    }

    #[test]
    fn test_error_display_wraps_source() {
        let err = GenexError::from(GenerationError::StepBudgetExceeded {
            steps: 11,
            limit: 10,
        });
        assert_eq!(
            err.to_string(),
            "Generation error: Search exceeded its step budget (11 steps, limit 10)"
        );
    }
}
