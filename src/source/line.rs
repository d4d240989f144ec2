//! Newline-delimited call events
//!
//! Each line is either a JSON object:
//! ```text
//! {"state": "RINGING", "number": "3001234567", "line": 1}
//! ```
//! or whitespace-separated text, `STATE [NUMBER|-] [line=ID]`:
//! ```text
//! RINGING 3001234567 line=1
//! RINGING +57 300 123 4567
//! OFFHOOK
//! IDLE
//! ```
//! Everything between the state and an optional `line=` field is the number,
//! so numbers may be written with spaces; `-` stands for an unknown number.
//! States are the telephony names or numeric codes (0 idle, 1 ringing,
//! 2 off-hook). Blank lines and lines starting with `#` are ignored.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::warn;

use super::CallEventSource;
use crate::{CallEvent, CallPhase};

/// Error type for event line parsing
#[derive(Debug, thiserror::Error)]
pub enum EventParseError {
    #[error("Unknown call state: {0}")]
    UnknownState(String),

    #[error("Invalid line id: {0}")]
    InvalidLine(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawState {
    Code(i64),
    Name(String),
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(alias = "phase")]
    state: RawState,
    #[serde(default)]
    number: Option<String>,
    #[serde(default, alias = "line_id")]
    line: Option<i32>,
}

/// Parse one input line.
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_event_line(line: &str) -> Result<Option<CallEvent>, EventParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if line.starts_with('{') {
        return parse_json(line).map(Some);
    }

    parse_text(line).map(Some)
}

fn parse_json(line: &str) -> Result<CallEvent, EventParseError> {
    let raw: RawEvent = serde_json::from_str(line)?;
    let phase = match raw.state {
        RawState::Code(code) => {
            CallPhase::from_code(code).ok_or_else(|| EventParseError::UnknownState(code.to_string()))?
        }
        RawState::Name(name) => {
            CallPhase::from_raw(&name).ok_or(EventParseError::UnknownState(name))?
        }
    };

    let mut event = CallEvent::new(phase).with_number(raw.number.as_deref());
    event.line_id = raw.line;
    Ok(event)
}

fn parse_text(line: &str) -> Result<CallEvent, EventParseError> {
    let mut fields: Vec<&str> = line.split_whitespace().collect();

    // Non-empty after trim, so there is at least one field
    let state = fields.remove(0);
    let phase =
        CallPhase::from_raw(state).ok_or_else(|| EventParseError::UnknownState(state.to_string()))?;

    let mut line_id = None;
    if let Some(last) = fields.last() {
        if let Some(id) = last.strip_prefix("line=") {
            line_id = Some(
                id.parse()
                    .map_err(|_| EventParseError::InvalidLine(id.to_string()))?,
            );
            fields.pop();
        }
    }

    let number = match fields.as_slice() {
        [] | ["-"] => None,
        parts => Some(parts.join(" ")),
    };

    let mut event = CallEvent::new(phase).with_number(number.as_deref());
    event.line_id = line_id;
    Ok(event)
}

/// Event source reading one event per line from an async reader.
///
/// Lines that fail to parse are logged and skipped; a read error ends the
/// stream.
pub struct LineSource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: AsyncBufRead + Unpin + Send> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl LineSource<BufReader<tokio::io::Stdin>> {
    /// Read events from standard input
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl LineSource<BufReader<tokio::fs::File>> {
    /// Read events from a file
    pub async fn open(path: &Path) -> std::io::Result<Self> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Self::new(BufReader::new(file)))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> CallEventSource for LineSource<R> {
    async fn next_event(&mut self) -> Option<CallEvent> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    warn!(line = self.line_no + 1, "Failed to read event input: {}", e);
                    return None;
                }
            };
            self.line_no += 1;

            match parse_event_line(&line) {
                Ok(Some(event)) => return Some(event),
                Ok(None) => continue,
                Err(e) => warn!(line = self.line_no, "Skipping event line: {}", e),
            }
        }
    }
}
