//! Addressable storage for values reached through pointers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{types::TypeTable, value::Value};

/// Identity of a heap slot. Pointers compare by slot, not by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(u32);

impl SlotId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Arena of addressable slots.
///
/// Cycles are built by allocating a slot first and filling it afterwards:
///
/// ```
/// use golit_ir::{Data, Heap, Value};
/// # use golit_ir::TypeTable;
/// # let mut types = TypeTable::new();
/// # let ty = types.int();
///
/// let mut heap = Heap::new();
/// let slot = heap.alloc(Value::Nil);
/// heap.set(slot, Value::typed(ty, Data::Int(1)));
/// assert!(!heap.get(slot).unwrap().is_nil());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heap {
    slots: Vec<Value>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, value: Value) -> SlotId {
        let id = SlotId(self.slots.len() as u32);
        self.slots.push(value);
        id
    }

    /// Replace the value of `slot`, returning the previous one.
    ///
    /// Returns `None` and leaves the heap unchanged if the slot does not exist.
    pub fn set(&mut self, slot: SlotId, value: Value) -> Option<Value> {
        self.slots
            .get_mut(slot.index())
            .map(|current| std::mem::replace(current, value))
    }

    pub fn get(&self, slot: SlotId) -> Option<&Value> {
        self.slots.get(slot.index())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Types and heap that values refer into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub types: TypeTable,
    #[serde(default)]
    pub heap: Heap,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value stored at `slot`.
    pub fn load(&self, slot: SlotId) -> Option<&Value> {
        self.heap.get(slot)
    }
}

/// A snapshot together with the root value to convert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub types: TypeTable,
    #[serde(default)]
    pub heap: Heap,
    #[serde(default)]
    pub root: Value,
}

impl Document {
    pub fn new(snapshot: Snapshot, root: Value) -> Self {
        Self {
            types: snapshot.types,
            heap: snapshot.heap,
            root,
        }
    }

    pub fn into_parts(self) -> (Snapshot, Value) {
        (
            Snapshot {
                types: self.types,
                heap: self.heap,
            },
            self.root,
        )
    }
}
