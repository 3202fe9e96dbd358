// src/utils/log.rs

//! Logging for the weighting library.
//!
//! The library only emits records through the `log` facade and never installs
//! a logger itself. Binaries and tests pick a backend, e.g.:
//!
//! ```ignore
//! let _ = env_logger::builder().is_test(true).try_init();
//! ```
//!
//! Per-run summaries go to `debug!`, per-subband regions to `trace!`, and
//! tolerated configuration oddities to `warn!`. Nothing is logged per sample.

pub use ::log::{Level, debug, error, info, log_enabled, trace, warn};
