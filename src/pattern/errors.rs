use thiserror::Error;

/// Errors that stop a pattern from compiling
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern cannot be empty")]
    EmptyPattern,
    #[error("Unrecognized pattern at position {position}: '{fragment}'")]
    UnrecognizedToken { position: usize, fragment: String },
    #[error("Unbalanced parenthesis at position {position}: '{fragment}'")]
    UnbalancedParenthesis { position: usize, fragment: String },
    #[error("Unterminated class at position {position}: '{fragment}'")]
    UnterminatedClass { position: usize, fragment: String },
    #[error("Class matches no symbol at position {position}: '{fragment}'")]
    EmptyClass { position: usize, fragment: String },
    #[error("Class member '{member}' is not in the alphabet at position {position}: '{fragment}'")]
    InvalidClassMember {
        position: usize,
        fragment: String,
        member: char,
    },
    #[error("Empty alternative at position {position}: '{fragment}'")]
    EmptyAlternative { position: usize, fragment: String },
    #[error("Group cannot be resolved to literal candidates at position {position}: '{fragment}'")]
    UnresolvableGroup { position: usize, fragment: String },
    #[error("Quantifier has nothing to repeat at position {position}: '{fragment}'")]
    DanglingQuantifier { position: usize, fragment: String },
}

impl PatternError {
    /// Position of the offending substring within the pattern
    pub fn position(&self) -> Option<usize> {
        match self {
            PatternError::EmptyPattern => None,
            PatternError::UnrecognizedToken { position, .. }
            | PatternError::UnbalancedParenthesis { position, .. }
            | PatternError::UnterminatedClass { position, .. }
            | PatternError::EmptyClass { position, .. }
            | PatternError::InvalidClassMember { position, .. }
            | PatternError::EmptyAlternative { position, .. }
            | PatternError::UnresolvableGroup { position, .. }
            | PatternError::DanglingQuantifier { position, .. } => Some(*position),
        }
    }

    /// The offending substring
    pub fn fragment(&self) -> Option<&str> {
        match self {
            PatternError::EmptyPattern => None,
            PatternError::UnrecognizedToken { fragment, .. }
            | PatternError::UnbalancedParenthesis { fragment, .. }
            | PatternError::UnterminatedClass { fragment, .. }
            | PatternError::EmptyClass { fragment, .. }
            | PatternError::InvalidClassMember { fragment, .. }
            | PatternError::EmptyAlternative { fragment, .. }
            | PatternError::UnresolvableGroup { fragment, .. }
            | PatternError::DanglingQuantifier { fragment, .. } => Some(fragment),
        }
    }
}
