use crate::generator::backrefs::Backreferences;
use crate::generator::expander::FixedLengthExpander;
use crate::pattern::FragmentSpec;

#[derive(Debug, Clone)]
enum SequencerState {
    /// No expander built yet for the current repeat count
    Pending,
    /// Draining the expander for the current repeat count
    Active(FixedLengthExpander),
    /// The quantifier's upper bound has been passed
    Exhausted,
}

/// Candidates for one fragment in increasing repeat count.
///
/// The count starts at the quantifier's floor, so zero-floor quantifiers open
/// with the empty string, and never decreases.
#[derive(Debug, Clone)]
pub struct RepeatSequencer {
    count: usize,
    cap: Option<usize>,
    shortest_piece: usize,
    pieces_ratio: f64,
    state: SequencerState,
}

impl RepeatSequencer {
    pub fn new(spec: &FragmentSpec) -> Self {
        let (floor, cap) = spec.repeat_bounds();
        Self {
            count: floor,
            cap,
            shortest_piece: spec.shortest_piece(),
            pieces_ratio: spec.pieces_ratio(),
            state: SequencerState::Pending,
        }
    }

    /// Repeat count of the candidates currently being produced
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn pieces_ratio(&self) -> f64 {
        self.pieces_ratio
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, SequencerState::Exhausted)
    }

    /// Lower bound on the length of every candidate still to come
    pub fn shortest_remaining(&self) -> usize {
        self.count.saturating_mul(self.shortest_piece)
    }

    /// Jump ahead to repeat count `count`, dropping whatever the current count
    /// had left. Counts never move backwards.
    pub fn skip_to(&mut self, count: usize) {
        if self.is_exhausted() || count <= self.count {
            return;
        }
        match self.cap {
            Some(cap) if count > cap => self.state = SequencerState::Exhausted,
            _ => {
                self.count = count;
                self.state = SequencerState::Pending;
            }
        }
    }

    pub fn next(&mut self, spec: &FragmentSpec, backreferences: &Backreferences) -> Option<String> {
        loop {
            match &mut self.state {
                SequencerState::Exhausted => return None,
                SequencerState::Pending => {
                    self.state = SequencerState::Active(FixedLengthExpander::new(self.count));
                }
                SequencerState::Active(expander) => {
                    if let Some(candidate) = expander.next(spec, backreferences) {
                        return Some(candidate);
                    }
                    self.advance();
                }
            }
        }
    }

    fn advance(&mut self) {
        match self.cap {
            Some(cap) if self.count >= cap => self.state = SequencerState::Exhausted,
            _ => {
                self.count += 1;
                self.state = SequencerState::Pending;
            }
        }
    }
}
