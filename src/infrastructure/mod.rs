//! Infrastructure utilities: time, identifiers and paths.

pub mod clock;
pub mod ids;
pub mod paths;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ids::IdGenerator;
pub use paths::expand_tilde;
