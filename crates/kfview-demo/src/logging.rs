#![forbid(unsafe_code)]

//! Log subscriber setup for the demo binary.

use tracing_subscriber::EnvFilter;

use crate::error::{DemoError, Result};

/// Install a stderr subscriber filtered by `directives` (`EnvFilter` syntax).
pub fn init(directives: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_new(directives)
        .map_err(|err| DemoError::invalid(format!("log filter {directives:?}: {err}")))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| DemoError::Logging {
        message: err.to_string(),
    })
}
