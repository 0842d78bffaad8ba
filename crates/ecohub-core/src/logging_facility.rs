//! Structured logging facility
//!
//! - One initialization point, `init(profile)`, called by binaries at start-up
//! - Boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`) that
//!   emit the canonical `component` / `op` / `event` fields
//! - A capture layer for asserting on emitted events in tests
//!
//! The async store facade owns boundary events; the core crate only emits
//! `tracing::debug!` for internal detail.
//!
//! ```rust
//! use ecohub_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
