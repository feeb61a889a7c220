use crate::chain::errors::GenerationError;
use crate::generator::Backreferences;

/// State owned by one descent of the chain: the backreference slots and the
/// step counter guarding against runaway searches
#[derive(Debug)]
pub struct Traversal {
    backreferences: Backreferences,
    steps: usize,
    limit: usize,
}

impl Traversal {
    pub fn new(limit: usize) -> Self {
        Self {
            backreferences: Backreferences::new(),
            steps: 0,
            limit,
        }
    }

    /// Count one search step
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::StepBudgetExceeded`] once the limit is passed.
    pub fn tick(&mut self) -> Result<(), GenerationError> {
        self.steps += 1;
        if self.steps > self.limit {
            return Err(GenerationError::StepBudgetExceeded {
                steps: self.steps,
                limit: self.limit,
            });
        }
        Ok(())
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn backreferences(&self) -> &Backreferences {
        &self.backreferences
    }

    pub fn backreferences_mut(&mut self) -> &mut Backreferences {
        &mut self.backreferences
    }
}
