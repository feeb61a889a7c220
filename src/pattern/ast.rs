use crate::pattern::alphabet;

/// How many times a fragment's base unit repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// No suffix
    One,
    /// `?`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

impl Quantifier {
    pub fn from_suffix(c: char) -> Option<Self> {
        match c {
            '?' => Some(Quantifier::Optional),
            '*' => Some(Quantifier::ZeroOrMore),
            '+' => Some(Quantifier::OneOrMore),
            _ => None,
        }
    }

    /// Smallest repeat count the quantifier allows
    pub fn floor(self) -> usize {
        match self {
            Quantifier::Optional | Quantifier::ZeroOrMore => 0,
            Quantifier::One | Quantifier::OneOrMore => 1,
        }
    }

    /// Largest repeat count the quantifier allows, `None` when unbounded
    pub fn cap(self) -> Option<usize> {
        match self {
            Quantifier::One | Quantifier::Optional => Some(1),
            Quantifier::ZeroOrMore | Quantifier::OneOrMore => None,
        }
    }
}

/// The base unit a fragment repeats
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    /// Literal candidates sorted ascending by length (literal, class or alternation)
    Literals(Vec<String>),
    /// Every string of exactly `width` alphabet symbols
    Wildcard { width: usize },
    /// The current value of an earlier capturing unit, 1-based as written (`\1`)
    Backreference(usize),
}

/// One compiled unit of a pattern together with its quantifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSpec {
    pub(crate) id: usize,
    pub(crate) unit: Unit,
    pub(crate) quantifier: Quantifier,
    pub(crate) min_run: usize,
    pub(crate) capture: Option<usize>,
}

impl FragmentSpec {
    pub(crate) fn new(unit: Unit, quantifier: Quantifier, min_run: usize) -> Self {
        Self {
            id: 0,
            unit,
            quantifier,
            min_run,
            capture: None,
        }
    }

    /// Position of the fragment within its pattern
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// Length of the dot run this fragment was written as (1 for everything else)
    pub fn min_run(&self) -> usize {
        self.min_run
    }

    /// Zero-based capture slot, assigned in textual order
    pub fn capture(&self) -> Option<usize> {
        self.capture
    }

    pub fn captures(&self) -> bool {
        self.capture.is_some()
    }

    /// 1-based index of the captured unit this fragment reproduces
    pub fn backreference(&self) -> Option<usize> {
        match self.unit {
            Unit::Backreference(index) => Some(index),
            _ => None,
        }
    }

    pub fn pieces(&self) -> Option<&[String]> {
        match &self.unit {
            Unit::Literals(pieces) => Some(pieces),
            _ => None,
        }
    }

    /// Inclusive repeat-count range, `None` as the upper bound when unbounded.
    ///
    /// A bare run of `k` dots with no suffix means at least `k` symbols. With a
    /// suffix, the quantifier binds to the last dot, so the whole range shifts
    /// up by `k - 1`. A backreference never repeats.
    pub fn repeat_bounds(&self) -> (usize, Option<usize>) {
        let shift = self.min_run.saturating_sub(1);
        let floor = self.quantifier.floor() + shift;
        let cap = self.quantifier.cap().map(|cap| cap + shift);

        match self.unit {
            Unit::Backreference(_) => (floor.min(1), Some(cap.map_or(1, |cap| cap.min(1)))),
            Unit::Wildcard { .. } if self.min_run > 1 && self.quantifier == Quantifier::One => {
                (floor, None)
            }
            _ => (floor, cap),
        }
    }

    /// Inclusive range of lengths the fragment can produce, `None` as the upper
    /// bound when unbounded or only known at generation time
    pub fn length_bounds(&self) -> (usize, Option<usize>) {
        let (floor, cap) = self.repeat_bounds();
        match self.unit {
            Unit::Backreference(_) => (0, None),
            _ => (
                floor.saturating_mul(self.shortest_piece()),
                cap.and_then(|cap| cap.checked_mul(self.longest_piece())),
            ),
        }
    }

    /// Length of the shortest candidate piece (0 when unknown until generation)
    pub fn shortest_piece(&self) -> usize {
        match &self.unit {
            Unit::Literals(pieces) => pieces.first().map_or(0, String::len),
            Unit::Wildcard { width } => *width,
            Unit::Backreference(_) => 0,
        }
    }

    /// Length of the longest candidate piece (0 when unknown until generation)
    pub fn longest_piece(&self) -> usize {
        match &self.unit {
            Unit::Literals(pieces) => pieces.last().map_or(0, String::len),
            Unit::Wildcard { width } => *width,
            Unit::Backreference(_) => 0,
        }
    }

    /// Longest over shortest candidate length, 1 without literal pieces
    pub fn pieces_ratio(&self) -> f64 {
        match &self.unit {
            Unit::Literals(_) if self.shortest_piece() > 0 => {
                self.longest_piece() as f64 / self.shortest_piece() as f64
            }
            _ => 1.0,
        }
    }

    /// Number of candidate pieces, `None` for backreferences or when it overflows
    pub fn candidate_count(&self) -> Option<u64> {
        match &self.unit {
            Unit::Literals(pieces) => u64::try_from(pieces.len()).ok(),
            Unit::Wildcard { width } => alphabet::wildcard_count(*width),
            Unit::Backreference(_) => None,
        }
    }
}
