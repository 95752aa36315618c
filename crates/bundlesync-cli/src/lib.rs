//! bundlesync library - expose modules for testing
//!
//! This library exposes the command handlers and shared CLI types.

pub mod commands;
pub mod common;

pub use bundlesync_logger as logger;
pub use common::GlobalOpts;
