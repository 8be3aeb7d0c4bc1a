//! Output Slots
//!
//! A slot holds the most recently computed view for one output.
//!
//! # Lifecycle
//!
//! 1. A slot starts `Uninitialized` with no view.
//!
//! 2. The first recomputation stores a view and moves it to `Computed`.
//!
//! 3. Every later recomputation overwrites the view whole. A slot never
//!    returns to `Uninitialized`.
//!
//! # Caching
//!
//! Alongside the view, the slot keeps the input projection it was computed
//! from. View functions are pure and the dataset is immutable, so if the
//! next projection is structurally equal the cached view is already the
//! answer and the computation is skipped.

use super::snapshot::InputSnapshot;

/// Where a slot is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Never computed.
    Uninitialized,

    /// Holds a view.
    Computed,
}

/// The current view of one output.
#[derive(Debug, Clone)]
pub struct OutputSlot<V> {
    state: SlotState,
    view: Option<V>,
    computed_from: Option<InputSnapshot>,
    compute_count: usize,
}

impl<V> OutputSlot<V> {
    pub fn new() -> Self {
        Self {
            state: SlotState::Uninitialized,
            view: None,
            computed_from: None,
            compute_count: 0,
        }
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    /// Inputs the current view was computed from.
    pub fn computed_from(&self) -> Option<&InputSnapshot> {
        self.computed_from.as_ref()
    }

    /// Number of times the view function has actually run for this slot.
    pub fn compute_count(&self) -> usize {
        self.compute_count
    }

    /// Whether the cached view was computed from `inputs`.
    pub fn is_current(&self, inputs: &InputSnapshot) -> bool {
        self.state == SlotState::Computed && self.computed_from.as_ref() == Some(inputs)
    }

    /// Overwrite the view.
    pub(crate) fn store(&mut self, inputs: InputSnapshot, view: V) {
        self.view = Some(view);
        self.computed_from = Some(inputs);
        self.state = SlotState::Computed;
        self.compute_count += 1;
    }
}

impl<V> Default for OutputSlot<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::InputValue;

    fn inputs(site: &str) -> InputSnapshot {
        [("site", InputValue::choice(site))].into_iter().collect()
    }

    #[test]
    fn slot_starts_uninitialized() {
        let slot: OutputSlot<u32> = OutputSlot::new();
        assert_eq!(slot.state(), SlotState::Uninitialized);
        assert!(slot.view().is_none());
        assert!(!slot.is_current(&InputSnapshot::new()));
    }

    #[test]
    fn store_moves_to_computed_and_tracks_inputs() {
        let mut slot = OutputSlot::new();
        slot.store(inputs("S1"), 7);
        assert_eq!(slot.state(), SlotState::Computed);
        assert_eq!(slot.view(), Some(&7));
        assert!(slot.is_current(&inputs("S1")));
        assert!(!slot.is_current(&inputs("S2")));

        slot.store(inputs("S2"), 9);
        assert_eq!(slot.state(), SlotState::Computed);
        assert_eq!(slot.view(), Some(&9));
        assert_eq!(slot.compute_count(), 2);
    }
}
