use serde::{Deserialize, Serialize};

/// Number of recent inputs an organism remembers.
pub const INPUT_WINDOW: usize = 4;

/// Fixed-size ring of the most recent input values an organism has observed.
///
/// Writes overwrite the slot under the cursor and advance it modulo
/// [`INPUT_WINDOW`]; the buffer never grows. Tasks read the raw slots, so slot
/// `0` is not necessarily the oldest value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputBuffer {
    slots: [f32; INPUT_WINDOW],
    next_slot: usize,
}

impl InputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` in the slot under the cursor and advances the cursor.
    pub fn push(&mut self, value: f32) {
        self.slots[self.next_slot] = value;
        self.next_slot = (self.next_slot + 1) % INPUT_WINDOW;
    }

    /// Raw slot contents in storage order.
    #[must_use]
    pub fn slots(&self) -> &[f32; INPUT_WINDOW] {
        &self.slots
    }

    /// Index of the slot the next write will overwrite.
    #[must_use]
    pub fn next_slot(&self) -> usize {
        self.next_slot
    }

    /// The window ordered oldest to newest.
    #[must_use]
    pub fn chronological(&self) -> [f32; INPUT_WINDOW] {
        let mut out = [0.0; INPUT_WINDOW];
        for (i, v) in out.iter_mut().enumerate() {
            *v = self.slots[(self.next_slot + i) % INPUT_WINDOW];
        }
        out
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
