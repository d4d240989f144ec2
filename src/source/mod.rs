//! Call-state event sources
//!
//! The tracker never talks to a telephony stack directly. Hosts hand it an
//! implementation of [`CallEventSource`]: a channel fed by platform callbacks,
//! or a line-oriented reader for scripted and piped input.

mod channel;
mod line;

pub use channel::{CallEventSender, ChannelSource};
pub use line::{EventParseError, LineSource, parse_event_line};

use async_trait::async_trait;

use crate::CallEvent;

/// Delivers call-state events one at a time, in order
#[async_trait]
pub trait CallEventSource: Send {
    /// Wait for the next event. `None` means the source is exhausted.
    async fn next_event(&mut self) -> Option<CallEvent>;
}

/// Whether an event belongs to the selected line.
///
/// Events that do not say which line they came from are always accepted.
pub fn accepts_line(selected_line: Option<i32>, event: &CallEvent) -> bool {
    match (selected_line, event.line_id) {
        (Some(selected), Some(line)) => selected == line,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_line() {
        let untagged = CallEvent::idle();
        let line_1 = CallEvent::idle().on_line(1);
        let line_2 = CallEvent::idle().on_line(2);

        assert!(accepts_line(None, &line_1));
        assert!(accepts_line(Some(1), &untagged));
        assert!(accepts_line(Some(1), &line_1));
        assert!(!accepts_line(Some(1), &line_2));
    }
}
