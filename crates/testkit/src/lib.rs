#![warn(missing_docs)]
//! Deterministic testing surfaces: the interaction event stream and small
//! level/player fixtures.

mod fixtures;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tetherstone_core::SimTick;

pub use fixtures::*;

/// Primary event record captured by headless runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label (e.g. the command verb).
    pub kind: String,
    /// Free-form payload describing the outcome.
    pub payload: String,
}

impl EventRecord {
    /// Build a record.
    pub fn new(tick: SimTick, kind: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            tick,
            kind: kind.into(),
            payload: payload.into(),
        }
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// Read back an event log written by [`JsonlSink`].
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<EventRecord>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read event log {}", path.display()))?;
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("invalid event on line {} of {}", i + 1, path.display()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn event_log_round_trips() {
        let path = std::env::temp_dir().join(format!(
            "tetherstone-events-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let events = vec![
            EventRecord::new(SimTick(1), "use", "success"),
            EventRecord::new(SimTick(2), "use_air", "pass"),
        ];
        let mut sink = JsonlSink::create(&path).expect("sink create");
        for event in &events {
            sink.write(event).expect("write succeeds");
        }
        drop(sink);

        let back = read_events(&path).expect("readable");
        assert_eq!(back, events);
        let _ = fs::remove_file(&path);
    }
}
