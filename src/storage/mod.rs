//! Storage layer behind the resource services.
//!
//! Records are held in process memory for the lifetime of a [`crate::Services`]
//! instance, seeded from JSON fixtures. Nothing is persisted.
//!
//! # Modules
//!
//! - `backend`: [`Store`] trait the services are written against
//! - `memory`: `Vec`-backed store implementation
//! - `fixtures`: bundled and directory-based seed data
//! - `latency`: injectable simulated network delay

pub mod backend;
pub mod fixtures;
pub mod latency;
pub mod memory;

pub use backend::Store;
pub use fixtures::Fixtures;
pub use latency::{simulate, FixedLatency, Latency, NetworkLatency, NoLatency};
pub use memory::MemoryStore;
