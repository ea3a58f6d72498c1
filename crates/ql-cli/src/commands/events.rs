//! Events command for inspecting how a log tokenizes.
//!
//! This module outputs every parsable line as JSONL for debugging.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use ql_core::{BUFFER_SIZE, EventCursor, ReaderLines};

/// Runs the events command, outputting events as JSONL to stdout.
pub fn run(path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut events = EventCursor::new(ReaderLines::new(BufReader::with_capacity(
        BUFFER_SIZE,
        file,
    )));

    while let Some(event) = events
        .next_event()
        .with_context(|| format!("failed to read {}", path.display()))?
    {
        let json = serde_json::to_string(&event)?;
        println!("{json}");
    }

    tracing::info!(discarded_lines = events.discarded(), "events dumped");
    Ok(())
}
