#![forbid(unsafe_code)]

//! Test harness for the keyboard-friendly scene view.

pub mod cli;
pub mod error;
pub mod logging;
pub mod report;
pub mod scene_file;
pub mod session;

pub use cli::{Cli, run, run_from_env};
pub use error::{DemoError, Result};
