use std::fmt;

use crate::pattern::alphabet::{self, ALPHABET_SIZE};
use crate::pattern::ast::{FragmentSpec, Quantifier, Unit};

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Quantifier::One => Ok(()),
            Quantifier::Optional => write!(f, "?"),
            Quantifier::ZeroOrMore => write!(f, "*"),
            Quantifier::OneOrMore => write!(f, "+"),
        }
    }
}

/// Renders the canonical pattern text the fragment compiles from
impl fmt::Display for FragmentSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn write_dots(f: &mut fmt::Formatter, count: usize) -> fmt::Result {
            (0..count).try_for_each(|_| write!(f, "."))
        }

        fn write_class(f: &mut fmt::Formatter, pieces: &[String]) -> fmt::Result {
            let members: Vec<char> = pieces.iter().filter_map(|p| p.chars().next()).collect();
            // Whichever of the class and its negation lists fewer symbols
            if members.len() * 2 > ALPHABET_SIZE {
                let excluded: String = alphabet::complement(&members).into_iter().collect();
                write!(f, "[^{}]", excluded)
            } else {
                let listed: String = members.into_iter().collect();
                write!(f, "[{}]", listed)
            }
        }

        match &self.unit {
            Unit::Literals(pieces) if self.captures() => write!(f, "({})", pieces.join("|"))?,
            Unit::Literals(pieces) => match pieces.as_slice() {
                [single] => write!(f, "{}", single)?,
                _ => write_class(f, pieces)?,
            },
            Unit::Wildcard { width } if self.captures() => {
                write!(f, "(")?;
                write_dots(f, *width)?;
                write!(f, ")")?;
            }
            Unit::Wildcard { .. } => write_dots(f, self.min_run)?,
            Unit::Backreference(index) => write!(f, "\\{}", index)?,
        }

        write!(f, "{}", self.quantifier)
    }
}
