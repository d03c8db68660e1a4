//! Presentation helpers shared by the pages.
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready shapes (empty states, status counts, cards)
//! - [`helpers`]: search matching and status tallies

pub mod helpers;
pub mod viewmodel;

pub use helpers::{count_by, matches_query};
pub use viewmodel::{EmptyState, StatCard, StatusCount};
