use async_trait::async_trait;
use tokio::sync::mpsc;

use super::CallEventSource;
use crate::{CallEvent, CallPhase};

/// Producer side of a [`ChannelSource`].
///
/// Platform callbacks hold one of these and push events as they arrive.
#[derive(Debug, Clone)]
pub struct CallEventSender {
    tx: mpsc::Sender<CallEvent>,
}

impl CallEventSender {
    /// Queue an event. Fails only when the source has been dropped.
    pub async fn send(&self, event: CallEvent) -> Result<(), mpsc::error::SendError<CallEvent>> {
        self.tx.send(event).await
    }

    /// Queue a state change from a synchronous callback thread
    pub fn blocking_notify(
        &self,
        phase: CallPhase,
        number: Option<&str>,
    ) -> Result<(), mpsc::error::SendError<CallEvent>> {
        self.tx.blocking_send(CallEvent::new(phase).with_number(number))
    }
}

/// Event source backed by a bounded channel
#[derive(Debug)]
pub struct ChannelSource {
    rx: mpsc::Receiver<CallEvent>,
}

impl ChannelSource {
    /// Create a source and the sender that feeds it
    pub fn new(buffer: usize) -> (CallEventSender, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (CallEventSender { tx }, Self { rx })
    }
}

#[async_trait]
impl CallEventSource for ChannelSource {
    async fn next_event(&mut self) -> Option<CallEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (tx, mut source) = ChannelSource::new(8);
        tx.send(CallEvent::ringing(Some("3001234567"))).await.unwrap();
        tx.send(CallEvent::idle()).await.unwrap();
        drop(tx);

        assert_eq!(source.next_event().await.unwrap().phase, CallPhase::Ringing);
        assert_eq!(source.next_event().await.unwrap().phase, CallPhase::Idle);
        assert!(source.next_event().await.is_none());
    }

    #[tokio::test]
    async fn test_blocking_notify_from_thread() {
        let (tx, mut source) = ChannelSource::new(8);
        std::thread::spawn(move || {
            tx.blocking_notify(CallPhase::Ringing, Some("3009876543")).unwrap();
        });

        let event = source.next_event().await.unwrap();
        assert_eq!(event.number.as_deref(), Some("3009876543"));
        assert!(source.next_event().await.is_none());
    }
}
