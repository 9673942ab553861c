//! notefeed
//!
//! Headless, virtualized feed of inline-editable note cards.
//!
//! The crate turns an ordered collection of note entries into a scrollable feed, either a
//! single column or a masonry grid, where only the cards near the viewport hold a live
//! editor surface. Card heights are learned from measurement and cached per sequence, and
//! editor surfaces are opened asynchronously and always released exactly once.
//!
//! - [`ordering`] sorts entries by an optional property or by natural title order.
//! - [`view_state`] holds the per-column virtualizer and the masonry distribution.
//! - [`mount`] manages one card's editor lifecycle and routes card interactions.
//! - [`state`] composes them into [`state::FeedView`], the root the host drives.

pub mod config;
pub mod logging;
pub mod model;
pub mod mount;
pub mod ordering;
pub mod source;
pub mod state;
pub mod view_state;

// Headless driver used by the binary
pub mod integration;

#[cfg(test)]
mod test_harness;
