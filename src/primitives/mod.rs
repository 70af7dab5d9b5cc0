//! Core data primitives.
//!
//! Similarities are exchanged as condensed upper-triangle arrays, the layout
//! every clustering entry point consumes.

mod condensed;

pub use condensed::{condensed_index, condensed_len, CondensedSimilarity};
pub(crate) use condensed::validate_condensed;

#[cfg(test)]
#[path = "tests_condensed_contract.rs"]
mod tests_condensed_contract;
