/// Most recent value of every capturing unit on the current descent.
///
/// Slots are indexed by capture order. A capturing element overwrites its own
/// slot whenever its value changes and clears it when it runs out, so a
/// backreference only ever sees the value currently selected upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Backreferences {
    slots: Vec<Option<String>>,
}

impl Backreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the `index`-th capturing unit, 1-based as written in a pattern
    pub fn get(&self, index: usize) -> Option<&str> {
        let slot = index.checked_sub(1)?;
        self.slots.get(slot)?.as_deref()
    }

    /// Record `value` as the current value of capture `slot`
    pub fn capture(&mut self, slot: usize, value: &str) {
        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, None);
        }
        if let Some(entry) = self.slots.get_mut(slot) {
            match entry {
                Some(existing) if existing == value => {}
                _ => *entry = Some(value.to_string()),
            }
        }
    }

    /// Forget the value of capture `slot`
    pub fn release(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }
}
