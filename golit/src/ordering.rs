//! Deterministic ordering of map keys.

use std::cmp::Ordering;

use golit_ir::{Data, Value};

/// Sort key for one map entry.
///
/// Keys order first by kind, then by their natural value, then by rendered
/// text so that keys with no natural order still sort stably. Keys that still
/// tie, such as two NaNs, fall back to the rendered entry value.
/// Interface keys are ordered by the value they hold.
#[derive(Debug)]
pub(crate) struct KeyOrder<'a> {
    rank: u8,
    natural: Natural<'a>,
    text: String,
    value: String,
}

#[derive(Debug)]
enum Natural<'a> {
    None,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(f64, f64),
    Str(&'a str),
    Addr(u64),
}

impl<'a> KeyOrder<'a> {
    pub(crate) fn new(key: &'a Value, text: String) -> Self {
        let (rank, natural) = classify(key);
        Self {
            rank,
            natural,
            text,
            value: String::new(),
        }
    }

    /// Break remaining ties by the entry's rendered value.
    pub(crate) fn then_value(mut self, value: String) -> Self {
        self.value = value;
        self
    }
}

fn classify(value: &Value) -> (u8, Natural<'_>) {
    let Value::Typed { data, .. } = value else {
        return (0, Natural::None);
    };
    match data {
        Data::Interface(held) => classify(held),
        Data::Bool(b) => (1, Natural::Bool(*b)),
        Data::Int(i) => (2, Natural::Int(*i)),
        Data::Uint(u) => (3, Natural::Uint(*u)),
        Data::Float(f) => (4, Natural::Float(*f)),
        Data::Complex { re, im } => (5, Natural::Complex(*re, *im)),
        Data::String(s) => (6, Natural::Str(s)),
        Data::Pointer(slot) => (
            7,
            slot.map_or(Natural::None, |s| Natural::Addr(s.index() as u64 + 1)),
        ),
        Data::UnsafePointer(addr) => (8, Natural::Addr(*addr)),
        Data::Chan { .. } => (9, Natural::None),
        Data::Array(_) => (10, Natural::None),
        Data::Struct(_) => (11, Natural::None),
        Data::Slice(_) | Data::Map(_) | Data::Func { .. } => (12, Natural::None),
    }
}

impl Natural<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Natural::Bool(a), Natural::Bool(b)) => a.cmp(b),
            (Natural::Int(a), Natural::Int(b)) => a.cmp(b),
            (Natural::Uint(a), Natural::Uint(b)) => a.cmp(b),
            (Natural::Float(a), Natural::Float(b)) => a.total_cmp(b),
            (Natural::Complex(ar, ai), Natural::Complex(br, bi)) => {
                ar.total_cmp(br).then_with(|| ai.total_cmp(bi))
            }
            (Natural::Str(a), Natural::Str(b)) => a.cmp(b),
            (Natural::Addr(a), Natural::Addr(b)) => a.cmp(b),
            (Natural::None, Natural::None) => Ordering::Equal,
            (Natural::None, _) => Ordering::Less,
            (_, Natural::None) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}

impl PartialEq for KeyOrder<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyOrder<'_> {}

impl PartialOrd for KeyOrder<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyOrder<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.natural.compare(&other.natural))
            .then_with(|| self.text.cmp(&other.text))
            .then_with(|| self.value.cmp(&other.value))
    }
}
