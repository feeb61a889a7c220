use log::debug;
use std::collections::HashSet;

use super::alphabet;
use super::ast::{FragmentSpec, Quantifier, Unit};
use super::constants::{MAX_GROUP_CANDIDATES, MAX_WILDCARD_GROUP_WIDTH};
use super::errors::PatternError;

/// The result of compiling a pattern
pub type CompileResult<T> = Result<T, PatternError>;

/// Compile a pattern into its ordered list of fragments
///
/// # Errors
///
/// Returns a [`PatternError`] naming the offending substring when no grammar
/// form matches at some position or a group cannot be resolved.
pub fn compile(pattern: &str) -> CompileResult<Vec<FragmentSpec>> {
    PatternCompiler::new(pattern).compile()
}

/// One recognized grammar form before its quantifier is attached
struct Atom {
    unit: Unit,
    min_run: usize,
    captures: bool,
}

impl Atom {
    fn plain(unit: Unit) -> Self {
        Self {
            unit,
            min_run: 1,
            captures: false,
        }
    }

    fn capturing(unit: Unit) -> Self {
        Self {
            unit,
            min_run: 1,
            captures: true,
        }
    }
}

/// Left-to-right compiler from pattern text to fragment specs
pub struct PatternCompiler {
    chars: Vec<char>,
    position: usize,
}

impl PatternCompiler {
    pub fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
            position: 0,
        }
    }

    /// Compile the whole pattern
    ///
    /// # Errors
    ///
    /// Fails on the first position where no grammar form matches.
    pub fn compile(mut self) -> CompileResult<Vec<FragmentSpec>> {
        if self.chars.is_empty() {
            return Err(PatternError::EmptyPattern);
        }

        let mut atoms = Vec::new();
        while let Some(c) = self.peek() {
            let atom = match c {
                '(' => self.read_group()?,
                '[' => self.read_class()?,
                '.' => self.read_dot_run(),
                '\\' => self.read_backreference()?,
                ')' => {
                    return Err(PatternError::UnbalancedParenthesis {
                        position: self.position,
                        fragment: self.slice(self.position, self.chars.len()),
                    });
                }
                c if Quantifier::from_suffix(c).is_some() => {
                    return Err(PatternError::DanglingQuantifier {
                        position: self.position,
                        fragment: self.slice(self.position, self.chars.len()),
                    });
                }
                c if alphabet::is_symbol(c) => {
                    self.position += 1;
                    Atom::plain(Unit::Literals(vec![c.to_string()]))
                }
                _ => {
                    return Err(PatternError::UnrecognizedToken {
                        position: self.position,
                        fragment: self.slice(self.position, self.chars.len()),
                    });
                }
            };
            let quantifier = self.read_quantifier()?;
            atoms.push((atom, quantifier));
        }

        let fragments = number_fragments(atoms);
        debug!(
            "Compiled '{}' into {} fragments",
            self.slice(0, self.chars.len()),
            fragments.len()
        );
        Ok(fragments)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    fn slice(&self, from: usize, to: usize) -> String {
        let to = to.min(self.chars.len());
        self.chars
            .get(from..to)
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }

    fn read_quantifier(&mut self) -> CompileResult<Quantifier> {
        let Some(quantifier) = self.peek().and_then(Quantifier::from_suffix) else {
            return Ok(Quantifier::One);
        };
        self.position += 1;

        if self.peek().and_then(Quantifier::from_suffix).is_some() {
            return Err(PatternError::DanglingQuantifier {
                position: self.position,
                fragment: self.slice(self.position - 1, self.position + 1),
            });
        }
        Ok(quantifier)
    }

    /// A run of `k` dots. Unsuffixed it means at least `k` symbols, otherwise
    /// the suffix binds to the last dot
    fn read_dot_run(&mut self) -> Atom {
        let start = self.position;
        while self.peek() == Some('.') {
            self.position += 1;
        }
        Atom {
            unit: Unit::Wildcard { width: 1 },
            min_run: self.position - start,
            captures: false,
        }
    }

    fn read_backreference(&mut self) -> CompileResult<Atom> {
        let start = self.position;
        let index = self
            .char_at(start + 1)
            .and_then(|c| c.to_digit(10))
            .and_then(|digit| usize::try_from(digit).ok())
            .ok_or_else(|| PatternError::UnrecognizedToken {
                position: start,
                fragment: self.slice(start, start + 2),
            })?;
        self.position += 2;
        Ok(Atom::plain(Unit::Backreference(index)))
    }

    fn read_class(&mut self) -> CompileResult<Atom> {
        let open = self.position;
        let close = self.find_class_close(open, self.chars.len())?;
        let members = self.class_members(open, close)?;
        self.position = close + 1;
        Ok(Atom::plain(Unit::Literals(
            members.into_iter().map(String::from).collect(),
        )))
    }

    fn find_class_close(&self, open: usize, limit: usize) -> CompileResult<usize> {
        (open + 1..limit)
            .find(|&index| self.char_at(index) == Some(']'))
            .ok_or_else(|| PatternError::UnterminatedClass {
                position: open,
                fragment: self.slice(open, limit),
            })
    }

    /// Sorted members of the class spanning `open..=close`, negation applied
    fn class_members(&self, open: usize, close: usize) -> CompileResult<Vec<char>> {
        let body = self.chars.get(open + 1..close).unwrap_or(&[]);
        let (negated, listed) = match body.split_first() {
            Some((&'^', rest)) => (true, rest),
            _ => (false, body),
        };

        if let Some(&member) = listed.iter().find(|&&c| !alphabet::is_symbol(c)) {
            return Err(PatternError::InvalidClassMember {
                position: open,
                fragment: self.slice(open, close + 1),
                member,
            });
        }

        let mut members = listed.to_vec();
        members.sort_unstable();
        members.dedup();
        if negated {
            members = alphabet::complement(&members);
        }

        if members.is_empty() {
            return Err(PatternError::EmptyClass {
                position: open,
                fragment: self.slice(open, close + 1),
            });
        }
        Ok(members)
    }

    /// A parenthesized alternation or wildcard run; both capture
    fn read_group(&mut self) -> CompileResult<Atom> {
        let open = self.position;
        let close = self.find_group_close(open)?;
        self.position = close + 1;

        let body = self.chars.get(open + 1..close).unwrap_or(&[]);
        if body.is_empty() {
            return Err(PatternError::EmptyAlternative {
                position: open,
                fragment: self.slice(open, close + 1),
            });
        }

        if body.iter().all(|&c| c == '.') {
            if body.len() > MAX_WILDCARD_GROUP_WIDTH {
                return Err(PatternError::UnresolvableGroup {
                    position: open,
                    fragment: self.slice(open, close + 1),
                });
            }
            return Ok(Atom::capturing(Unit::Wildcard { width: body.len() }));
        }

        let mut pieces = Vec::new();
        let mut seen = HashSet::new();
        let mut alternative_start = open + 1;
        for index in open + 1..=close {
            if index == close || self.char_at(index) == Some('|') {
                for piece in self.resolve_alternative(alternative_start, index, open, close)? {
                    if seen.insert(piece.clone()) {
                        pieces.push(piece);
                    }
                }
                alternative_start = index + 1;
            }
        }

        // Stable, so equal-length alternatives keep their written order
        pieces.sort_by_key(String::len);
        Ok(Atom::capturing(Unit::Literals(pieces)))
    }

    fn find_group_close(&self, open: usize) -> CompileResult<usize> {
        for index in open + 1..self.chars.len() {
            match self.char_at(index) {
                Some(')') => return Ok(index),
                Some('(') => {
                    return Err(PatternError::UnresolvableGroup {
                        position: open,
                        fragment: self.slice(open, index + 1),
                    });
                }
                _ => {}
            }
        }
        Err(PatternError::UnbalancedParenthesis {
            position: open,
            fragment: self.slice(open, self.chars.len()),
        })
    }

    /// Every literal string the alternative spanning `from..to` can stand for
    fn resolve_alternative(
        &self,
        from: usize,
        to: usize,
        open: usize,
        close: usize,
    ) -> CompileResult<Vec<String>> {
        if from == to {
            return Err(PatternError::EmptyAlternative {
                position: from,
                fragment: self.slice(open, close + 1),
            });
        }

        let mut positions: Vec<Vec<char>> = Vec::new();
        let mut index = from;
        while index < to {
            match self.char_at(index) {
                Some('.') => {
                    positions.push(alphabet::symbols().collect());
                    index += 1;
                }
                Some('[') => {
                    let class_close = self.find_class_close(index, to)?;
                    positions.push(self.class_members(index, class_close)?);
                    index = class_close + 1;
                }
                Some(c) if alphabet::is_symbol(c) => {
                    positions.push(vec![c]);
                    index += 1;
                }
                _ => {
                    return Err(PatternError::UnresolvableGroup {
                        position: index,
                        fragment: self.slice(open, close + 1),
                    });
                }
            }
        }

        expand_positions(&positions).ok_or_else(|| PatternError::UnresolvableGroup {
            position: from,
            fragment: self.slice(open, close + 1),
        })
    }
}

/// Cartesian product of per-position choices, `None` past the candidate limit
fn expand_positions(positions: &[Vec<char>]) -> Option<Vec<String>> {
    let mut expanded = vec![String::new()];
    for choices in positions {
        if expanded.len().saturating_mul(choices.len()) > MAX_GROUP_CANDIDATES {
            return None;
        }
        expanded = expanded
            .iter()
            .flat_map(|prefix| {
                choices.iter().map(move |&c| {
                    let mut piece = prefix.clone();
                    piece.push(c);
                    piece
                })
            })
            .collect();
    }
    Some(expanded)
}

/// Assign fragment ids and capture slots in textual order
fn number_fragments(atoms: Vec<(Atom, Quantifier)>) -> Vec<FragmentSpec> {
    let mut next_capture = 0;
    atoms
        .into_iter()
        .enumerate()
        .map(|(id, (atom, quantifier))| {
            let mut spec = FragmentSpec::new(atom.unit, quantifier, atom.min_run);
            spec.id = id;
            if atom.captures {
                spec.capture = Some(next_capture);
                next_capture += 1;
            }
            spec
        })
        .collect()
}
