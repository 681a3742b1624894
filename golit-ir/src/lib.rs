//! Snapshot model of Go values for golit.
//!
//! A conversion works on an explicit picture of the Go value graph rather than
//! on live memory:
//!
//! ```text
//! TypeTable (interned type descriptors)
//! Heap      (addressable slots, the targets of pointers)
//! Value     (the root, referring into both)
//! ```
//!
//! Struct values always carry every field, exported or not. Deciding what may
//! be written is left to the encoder.

mod display;
mod heap;
mod types;
mod value;

pub use display::package_base;
pub use heap::{Document, Heap, SlotId, Snapshot};
pub use types::{ChanDir, Field, Kind, Method, Shape, Type, TypeId, TypeTable, TypeTableError};
pub use value::{Data, MapEntry, Value};
