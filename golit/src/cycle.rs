//! Pointer cycle detection.

use std::collections::HashMap;

use golit_ir::SlotId;

/// Counts how many times each heap slot is on the current traversal path.
///
/// A slot may be entered twice, so a self-referencing value shows one level
/// of its recursion before the back edge is cut.
#[derive(Debug, Default)]
pub(crate) struct CycleGuard {
    active: HashMap<SlotId, usize>,
}

impl CycleGuard {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Enter `slot`. Returns true when the slot is already entered twice;
    /// the caller must then truncate and must not call [`pop`](Self::pop).
    pub(crate) fn push(&mut self, slot: SlotId) -> bool {
        let count = self.active.entry(slot).or_insert(0);
        if *count > 1 {
            return true;
        }
        *count += 1;
        false
    }

    pub(crate) fn pop(&mut self, slot: SlotId) {
        if let Some(count) = self.active.get_mut(&slot) {
            *count = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use golit_ir::{Heap, Value};

    use super::*;

    fn slots(n: usize) -> Vec<SlotId> {
        let mut heap = Heap::new();
        (0..n).map(|_| heap.alloc(Value::Nil)).collect()
    }

    #[test]
    fn test_allows_two_entries() {
        let slot = slots(1)[0];
        let mut guard = CycleGuard::new();
        assert!(!guard.push(slot));
        assert!(!guard.push(slot));
        assert!(guard.push(slot));
        guard.pop(slot);
        assert!(!guard.push(slot));
    }

    #[test]
    fn test_slots_are_independent() {
        let ids = slots(2);
        let mut guard = CycleGuard::new();
        assert!(!guard.push(ids[0]));
        assert!(!guard.push(ids[0]));
        assert!(!guard.push(ids[1]));
    }

    #[test]
    fn test_pop_floors_at_zero() {
        let slot = slots(1)[0];
        let mut guard = CycleGuard::new();
        guard.pop(slot);
        guard.pop(slot);
        assert!(!guard.push(slot));
        assert!(!guard.push(slot));
        assert!(guard.push(slot));
    }
}
