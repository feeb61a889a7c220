use log::{debug, info, warn};
use std::sync::Arc;

use crate::chain::config::GeneratorConfig;
use crate::chain::element::{ChainElement, Fragments};
use crate::chain::errors::GenerationError;
use crate::chain::traversal::Traversal;
use crate::pattern::{FragmentSpec, PatternError, compile};

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChainerState {
    Active,
    Exhausted,
    Aborted(GenerationError),
}

/// Lazily enumerates every string a pattern matches, optionally only those of
/// an exact length.
///
/// Enumeration is forward-only: once it ends, build a new `Chainer` to start
/// over.
#[derive(Debug)]
pub struct Chainer {
    fragments: Fragments,
    root: ChainElement,
    target_length: Option<usize>,
    config: GeneratorConfig,
    state: ChainerState,
    produced: usize,
}

impl Chainer {
    /// Compile `pattern` with the default configuration
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] when the pattern does not compile.
    pub fn new(pattern: &str, target_length: Option<usize>) -> Result<Self, PatternError> {
        Self::with_config(pattern, target_length, GeneratorConfig::default())
    }

    /// Compile `pattern` with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] when the pattern does not compile.
    pub fn with_config(
        pattern: &str,
        target_length: Option<usize>,
        config: GeneratorConfig,
    ) -> Result<Self, PatternError> {
        let fragments: Fragments = compile(pattern)?.into_iter().map(Arc::new).collect();
        let root =
            ChainElement::new(Arc::clone(&fragments), 0).ok_or(PatternError::EmptyPattern)?;

        info!(
            "Initialized chain for '{}' with {} fragments, target length {:?}",
            pattern,
            fragments.len(),
            target_length
        );

        Ok(Self {
            fragments,
            root,
            target_length,
            config,
            state: ChainerState::Active,
            produced: 0,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &FragmentSpec> {
        self.fragments.iter().map(|spec| spec.as_ref())
    }

    pub fn target_length(&self) -> Option<usize> {
        self.target_length
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of matches produced so far
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Whether enumeration has ended, by exhaustion or abort
    pub fn is_finished(&self) -> bool {
        self.state != ChainerState::Active
    }

    /// Produce the next match, `Ok(None)` once every match has been produced.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::StepBudgetExceeded`] when the search for the
    /// next match runs past the step budget. The chainer stays aborted and
    /// every later call returns the same error.
    pub fn next_match(&mut self) -> Result<Option<String>, GenerationError> {
        match &self.state {
            ChainerState::Active => {}
            ChainerState::Exhausted => return Ok(None),
            ChainerState::Aborted(err) => return Err(err.clone()),
        }

        let mut traversal = Traversal::new(self.config.max_steps);
        match self.root.next(&mut traversal, self.target_length) {
            Ok(Some(found)) => {
                self.produced += 1;
                debug!(
                    "Match {} '{}' after {} steps",
                    self.produced,
                    found,
                    traversal.steps()
                );
                Ok(Some(found))
            }
            Ok(None) => {
                info!("Chain exhausted after {} matches", self.produced);
                self.state = ChainerState::Exhausted;
                Ok(None)
            }
            Err(err) => {
                warn!("Aborting chain after {} matches: {}", self.produced, err);
                self.state = ChainerState::Aborted(err.clone());
                Err(err)
            }
        }
    }

    /// Drain matches until exhaustion or until `cap` have been counted
    ///
    /// # Errors
    ///
    /// Propagates a step-budget abort from [`Chainer::next_match`].
    pub fn count(&mut self, cap: usize) -> Result<usize, GenerationError> {
        let mut counted = 0;
        while counted < cap {
            if self.next_match()?.is_none() {
                break;
            }
            counted += 1;
        }
        Ok(counted)
    }

    /// Iterate over the remaining matches
    pub fn matches(&mut self) -> Matches<'_> {
        Matches { chainer: self }
    }
}

/// Iterator over a chainer's matches; ends after exhaustion or the first error
#[derive(Debug)]
pub struct Matches<'a> {
    chainer: &'a mut Chainer,
}

impl Iterator for Matches<'_> {
    type Item = Result<String, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.chainer.is_finished() {
            return None;
        }
        self.chainer.next_match().transpose()
    }
}
