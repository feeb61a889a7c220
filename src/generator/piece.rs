use crate::generator::backrefs::Backreferences;
use crate::pattern::Unit;
use crate::pattern::alphabet;

/// Walks the candidate pieces of one unit in fixed order.
///
/// Once it runs out it keeps returning `None`. A backreference unit yields the
/// captured value on its first call only.
#[derive(Debug, Clone, Default)]
pub struct PieceGenerator {
    index: u64,
    exhausted: bool,
}

impl PieceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, unit: &Unit, backreferences: &Backreferences) -> Option<String> {
        if self.exhausted {
            return None;
        }

        let produced = match unit {
            Unit::Literals(pieces) => usize::try_from(self.index)
                .ok()
                .and_then(|index| pieces.get(index))
                .cloned(),
            Unit::Wildcard { width } => alphabet::wildcard_piece(*width, self.index),
            Unit::Backreference(index) if self.index == 0 => {
                backreferences.get(*index).map(str::to_string)
            }
            Unit::Backreference(_) => None,
        };

        self.index += 1;
        if produced.is_none() {
            self.exhausted = true;
        }
        produced
    }
}
