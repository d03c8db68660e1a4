//! Structured logging setup.
//!
//! Services and pages emit `tracing` spans and events; this module installs
//! the subscriber that turns them into log lines.
//!
//! # Configuration
//!
//! The level filter is resolved in this order:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `log_level` in the configuration
//! 3. Default: `"info"`
//!
//! Output goes to stderr unless `log_file` is set, in which case lines are
//! appended to that file without ANSI colors.
//!
//! # Usage
//!
//! ```no_run
//! use courier_ops::observability::init_tracing;
//! use courier_ops::Config;
//!
//! init_tracing(&Config::default())?;
//! tracing::info!("dashboard starting");
//! # Ok::<(), courier_ops::CourierError>(())
//! ```

mod init;

pub use init::init_tracing;
