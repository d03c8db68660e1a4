//! Page layer sitting between an embedding shell and the services.
//!
//! Pages fetch through [`Services`](crate::Services), keep the result in a
//! [`Loadable`] and derive what the shell displays. Data flows one way:
//!
//! ```text
//! shell action → page method → service call(s) → LoadSlot → snapshot / view model
//!                                    │
//!                                    └──► Notices (success / error)
//! ```
//!
//! # Modules
//!
//! - [`state`]: `Loadable`, `LoadTracker`, `LoadSlot` and `Notices`
//! - [`pages`]: dashboard, orders, fleet, routes, analytics, tracking,
//!   settings and the booking wizard

pub mod pages;
pub mod state;

pub use state::{LoadSlot, LoadTicket, LoadTracker, Loadable, Notice, NoticeLevel, Notices};
