use std::fmt;

use crate::signature::params::SlotLayout;

/// Per-slot counts in array form.
///
/// Raw counts may exceed what a slot can hold; they are clamped only when
/// packed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Counters(Vec<u64>);

impl Counters {
    pub fn zeroed(slots: usize) -> Self {
        Self(vec![0; slots])
    }

    pub fn from_counts(counts: Vec<u64>) -> Self {
        Self(counts)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count in `slot`, or `0` past the end.
    pub fn get(&self, slot: usize) -> u64 {
        self.0.get(slot).copied().unwrap_or(0)
    }

    /// Adds `n` to `slot`. Out-of-range slots are ignored.
    pub fn add(&mut self, slot: usize, n: u64) {
        if let Some(c) = self.0.get_mut(slot) {
            *c = c.saturating_add(n);
        }
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }
}

/// A packed neighborhood signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature(pub u64);

impl Signature {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Extracts the counter stored in `slot`.
    pub fn slot(self, slot: usize, layout: SlotLayout) -> u64 {
        if slot >= layout.slots() {
            return 0;
        }
        (self.0 >> layout.offset(slot)) & layout.max_count()
    }

    pub fn unpack(self, layout: SlotLayout) -> Counters {
        unpack(self, layout)
    }

    /// True if every slot of `self` is at least the same slot of `other`.
    pub fn dominates(self, other: Signature, layout: SlotLayout) -> bool {
        (0..layout.slots()).all(|i| self.slot(i, layout) >= other.slot(i, layout))
    }

    /// Zero-padded binary literal, e.g. `0b0000…0100`.
    pub fn to_binary(self, layout: SlotLayout) -> String {
        format!("0b{:0width$b}", self.0, width = layout.width() as usize)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Packs counters into a signature, saturating each one.
///
/// The accumulator starts at zero on every call, so the result depends only
/// on `counters` and `layout`. Slots past `layout.slots()` are dropped.
pub fn pack(counters: &Counters, layout: SlotLayout) -> Signature {
    let max = layout.max_count();
    let mut acc = 0u64;
    for (slot, count) in counters.iter().enumerate().take(layout.slots()) {
        acc |= count.min(max) << layout.offset(slot);
    }
    Signature(acc)
}

pub fn unpack(signature: Signature, layout: SlotLayout) -> Counters {
    Counters(
        (0..layout.slots())
            .map(|i| signature.slot(i, layout))
            .collect(),
    )
}
