//! JSON output for CLI commands

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a pretty-printed JSON document to stdout
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)
        .map_err(|e| super::errors::CliError::io_error(format!("JSON error: {}", e)))?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
