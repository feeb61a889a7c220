use log::trace;
use std::sync::Arc;

use crate::chain::errors::GenerationError;
use crate::chain::traversal::Traversal;
use crate::generator::RepeatSequencer;
use crate::pattern::FragmentSpec;

/// Compiled fragments shared by every element of one chain
pub type Fragments = Arc<[Arc<FragmentSpec>]>;

/// One link of the backtracking chain.
///
/// Holds its own fragment's current value and lazily builds the element for
/// the remaining fragments, advancing its own value whenever that tail runs
/// out. A target length is split between the two as the search descends.
#[derive(Debug)]
pub struct ChainElement {
    spec: Arc<FragmentSpec>,
    fragments: Fragments,
    position: usize,
    sequencer: RepeatSequencer,
    current: Option<String>,
    tail: Option<Box<ChainElement>>,
    /// Shortest and longest lengths the later fragments can produce together
    tail_bounds: (usize, Option<usize>),
    exhausted: bool,
}

impl ChainElement {
    /// Element for the fragment at `position`, `None` past the last fragment
    pub fn new(fragments: Fragments, position: usize) -> Option<Self> {
        let spec = Arc::clone(fragments.get(position)?);
        let sequencer = RepeatSequencer::new(&spec);
        let tail_bounds = fragments
            .get(position + 1..)
            .unwrap_or_default()
            .iter()
            .fold((0usize, Some(0usize)), |(shortest, longest), later| {
                let (min, max) = later.length_bounds();
                (
                    shortest.saturating_add(min),
                    longest.zip(max).and_then(|(a, b)| a.checked_add(b)),
                )
            });
        Some(Self {
            spec,
            fragments,
            position,
            sequencer,
            current: None,
            tail: None,
            tail_bounds,
            exhausted: false,
        })
    }

    pub fn is_leaf(&self) -> bool {
        self.position + 1 >= self.fragments.len()
    }

    /// Produce the next string for this element and everything after it.
    ///
    /// `remaining` is the exact number of symbols still owed, `None` when
    /// unconstrained. Returns `Ok(None)` once no further string exists.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::StepBudgetExceeded`] when the traversal runs
    /// out of steps.
    pub fn next(
        &mut self,
        traversal: &mut Traversal,
        remaining: Option<usize>,
    ) -> Result<Option<String>, GenerationError> {
        if self.exhausted {
            return Ok(None);
        }

        let produced = if self.is_leaf() {
            self.draw(traversal, remaining)?
        } else {
            self.next_linked(traversal, remaining)?
        };

        if produced.is_none() {
            self.finish(traversal);
        }
        Ok(produced)
    }

    fn next_linked(
        &mut self,
        traversal: &mut Traversal,
        remaining: Option<usize>,
    ) -> Result<Option<String>, GenerationError> {
        loop {
            if self.current.is_none() {
                let Some(candidate) = self.draw(traversal, remaining)? else {
                    return Ok(None);
                };
                self.current = Some(candidate);
                self.tail = None;
            }
            let Some(current) = self.current.as_deref() else {
                return Ok(None);
            };

            // Zero repeats leave the capture unset rather than empty
            if let Some(slot) = self.spec.capture() {
                if current.is_empty() {
                    traversal.backreferences_mut().release(slot);
                } else {
                    traversal.backreferences_mut().capture(slot, current);
                }
            }

            if self.tail.is_none() {
                self.tail =
                    ChainElement::new(Arc::clone(&self.fragments), self.position + 1).map(Box::new);
            }
            let Some(tail) = self.tail.as_mut() else {
                return Ok(None);
            };

            let owed = remaining.map(|limit| limit.saturating_sub(current.len()));
            if let Some(rest) = tail.next(traversal, owed)? {
                let mut produced = String::with_capacity(current.len() + rest.len());
                produced.push_str(current);
                produced.push_str(&rest);
                return Ok(Some(produced));
            }

            trace!(
                "Fragment {} exhausted its tail with '{}', advancing",
                self.spec.id(),
                current
            );
            self.current = None;
        }
    }

    /// Next candidate from the own sequencer that can still fit `remaining`.
    ///
    /// With a target, the fragment's own share must leave the tail a length it
    /// can produce, so repeat counts too short for that window are skipped
    /// whole. Returns `None` for good once the sequencer is drained or the
    /// length bounds show no later candidate can fit.
    fn draw(
        &mut self,
        traversal: &mut Traversal,
        remaining: Option<usize>,
    ) -> Result<Option<String>, GenerationError> {
        let Some(limit) = remaining else {
            traversal.tick()?;
            return Ok(self.sequencer.next(&self.spec, traversal.backreferences()));
        };

        let (tail_shortest, tail_longest) = self.tail_bounds;
        let Some(longest_own) = limit.checked_sub(tail_shortest) else {
            trace!(
                "Fragment {} stops: its tail needs more than {} symbols",
                self.spec.id(),
                limit
            );
            return Ok(None);
        };
        let shortest_own = tail_longest.map_or(0, |longest| limit.saturating_sub(longest));

        let longest_piece = self.spec.longest_piece();
        if longest_piece > 0 {
            self.sequencer.skip_to(shortest_own.div_ceil(longest_piece));
        }

        loop {
            traversal.tick()?;

            if self.sequencer.shortest_remaining() > longest_own {
                trace!(
                    "Fragment {} stops at repeat count {}: nothing fits {} symbols",
                    self.spec.id(),
                    self.sequencer.count(),
                    longest_own
                );
                return Ok(None);
            }

            let Some(candidate) = self.sequencer.next(&self.spec, traversal.backreferences()) else {
                return Ok(None);
            };

            if exceeds_ratio_bound(candidate.len(), limit, self.sequencer.pieces_ratio()) {
                trace!(
                    "Fragment {} stops at '{}': longer than {} x {}",
                    self.spec.id(),
                    candidate,
                    limit,
                    self.sequencer.pieces_ratio()
                );
                return Ok(None);
            }

            if (shortest_own..=longest_own).contains(&candidate.len()) {
                return Ok(Some(candidate));
            }
        }
    }

    fn finish(&mut self, traversal: &mut Traversal) {
        self.exhausted = true;
        self.current = None;
        self.tail = None;
        if let Some(slot) = self.spec.capture() {
            traversal.backreferences_mut().release(slot);
        }
    }
}

/// Candidates arrive in ascending repeat count, so one longer than
/// `limit * ratio` means every count from here on overshoots
fn exceeds_ratio_bound(length: usize, limit: usize, ratio: f64) -> bool {
    length as f64 > limit as f64 * ratio
}
