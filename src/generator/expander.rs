use crate::generator::backrefs::Backreferences;
use crate::generator::piece::PieceGenerator;
use crate::pattern::{FragmentSpec, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpanderState {
    Fresh,
    Running,
    Exhausted,
}

/// Every concatenation of exactly `count` pieces of one fragment, in odometer
/// order: the last position advances fastest and carries leftward.
#[derive(Debug, Clone)]
pub struct FixedLengthExpander {
    count: usize,
    positions: Vec<PieceGenerator>,
    values: Vec<String>,
    state: ExpanderState,
}

impl FixedLengthExpander {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            positions: Vec::with_capacity(count),
            values: Vec::with_capacity(count),
            state: ExpanderState::Fresh,
        }
    }

    pub fn next(&mut self, spec: &FragmentSpec, backreferences: &Backreferences) -> Option<String> {
        let produced = match self.state {
            ExpanderState::Exhausted => None,
            ExpanderState::Fresh => {
                self.state = ExpanderState::Running;
                self.prime(spec, backreferences)
            }
            ExpanderState::Running => self.turn(spec, backreferences),
        };

        if produced.is_none() {
            self.state = ExpanderState::Exhausted;
        }
        produced
    }

    /// Pull the first piece into every position
    fn prime(&mut self, spec: &FragmentSpec, backreferences: &Backreferences) -> Option<String> {
        if matches!(spec.unit(), Unit::Backreference(_)) && self.count > 1 {
            return None;
        }

        for _ in 0..self.count {
            let mut generator = PieceGenerator::new();
            let value = generator.next(spec.unit(), backreferences)?;
            self.positions.push(generator);
            self.values.push(value);
        }
        Some(self.values.concat())
    }

    /// Advance the rightmost position that still has pieces and restart every
    /// position to its right
    fn turn(&mut self, spec: &FragmentSpec, backreferences: &Backreferences) -> Option<String> {
        let mut position = self.count;
        let advanced = loop {
            position = position.checked_sub(1)?;
            let generator = self.positions.get_mut(position)?;
            if let Some(value) = generator.next(spec.unit(), backreferences) {
                break value;
            }
        };

        if let Some(slot) = self.values.get_mut(position) {
            *slot = advanced;
        }

        for restart in position + 1..self.count {
            let mut generator = PieceGenerator::new();
            let value = generator.next(spec.unit(), backreferences)?;
            if let (Some(slot), Some(value_slot)) =
                (self.positions.get_mut(restart), self.values.get_mut(restart))
            {
                *slot = generator;
                *value_slot = value;
            }
        }

        Some(self.values.concat())
    }
}
