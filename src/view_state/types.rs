//! Core view-state types

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::model::EntryRef;

/// Direction of the most recent scroll movement.
///
/// `None` at the call sites means "not yet established" (no scroll since the last stop).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward later indices (offset grew).
    Forward,
    /// Toward earlier indices (offset shrank).
    Backward,
}

impl ScrollDirection {
    /// Direction implied by moving from `previous` to `next`, if any.
    pub fn between(previous: u64, next: u64) -> Option<Self> {
        match next.cmp(&previous) {
            std::cmp::Ordering::Greater => Some(Self::Forward),
            std::cmp::Ordering::Less => Some(Self::Backward),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Identity of an ordered item sequence.
///
/// Two sequences with the same documents in the same order share an identity, so
/// re-rendering an unchanged collection keeps its measured sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceId(u64);

impl SequenceId {
    /// Identity of an entry sequence, derived from the ordered document paths.
    pub fn of(entries: &[EntryRef]) -> Self {
        let mut hasher = DefaultHasher::new();
        entries.len().hash(&mut hasher);
        for entry in entries {
            entry.path().hash(&mut hasher);
        }
        Self(hasher.finish())
    }

    /// Raw hash value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Dimensions of the shared scroll viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportDimensions {
    /// Width of the feed container.
    pub width: u32,
    /// Visible height of the scroll element.
    pub height: u32,
}

impl ViewportDimensions {
    /// Create new viewport dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
