//! # ccsl-core
//!
//! Core types, errors, and utilities for the ccsl status line.
//!
//! This crate provides:
//! - [`CcslError`] - Process-boundary errors with exit-code mapping
//! - [`init_logging`] - stderr-only `tracing` setup
//! - [`SessionInput`] - The session descriptor read from stdin
//! - [`git::probe`] - Best-effort git branch/dirty probe with timeout

pub mod error;
pub mod git;
pub mod input;
pub mod logging;

pub use error::{CcslError, Result};
pub use git::GitStatus;
pub use input::{ModelDescriptor, SessionInput};
pub use logging::{init_logging, init_test_logging};
