//! Call service: drives the tracker from an event source and hands missed
//! calls to the dispatcher.
//!
//! Events are processed strictly one at a time. Dispatch runs on its own
//! task fed through a channel, so a slow browser launch never delays the
//! next call-state change.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::SharedSettings;
use crate::dispatch::Dispatcher;
use crate::source::{CallEventSource, accepts_line};
use crate::tracker::CallOutcomeTracker;
use crate::MissedCallAction;

/// Pending actions the dispatch task may hold before the service waits
const DISPATCH_QUEUE: usize = 32;

/// Counters reported when the service stops
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceStats {
    /// Events read from the source
    pub events_received: usize,
    /// Events dropped because they came from another line
    pub events_filtered: usize,
    /// Unanswered calls detected
    pub missed_calls: usize,
    /// Actions delivered (opened or notified)
    pub delivered: usize,
    /// Actions that could not be delivered
    pub skipped: usize,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct ServiceReport {
    pub started_at: DateTime<Utc>,
    pub stopped_at: DateTime<Utc>,
    pub stats: ServiceStats,
}

pub struct CallService<S> {
    source: S,
    tracker: CallOutcomeTracker,
    settings: SharedSettings,
    dispatcher: Arc<Dispatcher>,
}

impl<S: CallEventSource> CallService<S> {
    pub fn new(source: S, settings: SharedSettings, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            source,
            tracker: CallOutcomeTracker::new(settings.clone()),
            settings,
            dispatcher,
        }
    }

    /// Process events until the source is exhausted, then wait for pending
    /// dispatches to finish.
    pub async fn run(mut self) -> Result<ServiceReport> {
        let started_at = Utc::now();
        let mut stats = ServiceStats::default();

        let (action_tx, action_rx) = mpsc::channel::<MissedCallAction>(DISPATCH_QUEUE);
        let worker = tokio::spawn(dispatch_worker(self.dispatcher.clone(), action_rx));

        info!(mode = %self.dispatcher.mode(), "Listening for call state changes");

        while let Some(event) = self.source.next_event().await {
            stats.events_received += 1;

            let selected_line = self.settings.selected_line_id();
            if !accepts_line(selected_line, &event) {
                debug!(
                    line = ?event.line_id,
                    selected = ?selected_line,
                    "Ignoring event from unselected line"
                );
                stats.events_filtered += 1;
                continue;
            }

            if let Some(action) = self.tracker.handle(&event) {
                stats.missed_calls += 1;
                if action_tx.send(action).await.is_err() {
                    warn!("Dispatch task stopped, dropping missed call");
                }
            }
        }

        drop(action_tx);
        let (delivered, skipped) = worker.await?;
        stats.delivered = delivered;
        stats.skipped = skipped;

        info!(
            events = stats.events_received,
            missed = stats.missed_calls,
            delivered = stats.delivered,
            "Event source closed, service stopped"
        );

        Ok(ServiceReport {
            started_at,
            stopped_at: Utc::now(),
            stats,
        })
    }
}

/// Dispatch actions as they arrive. Returns (delivered, skipped) counts.
async fn dispatch_worker(
    dispatcher: Arc<Dispatcher>,
    mut rx: mpsc::Receiver<MissedCallAction>,
) -> (usize, usize) {
    let mut delivered = 0;
    let mut skipped = 0;

    while let Some(action) = rx.recv().await {
        let dispatcher = dispatcher.clone();
        // Platform calls may spawn processes
        let outcome = tokio::task::spawn_blocking(move || dispatcher.dispatch(&action)).await;

        match outcome {
            Ok(outcome) if outcome.is_delivered() => delivered += 1,
            Ok(_) => skipped += 1,
            Err(e) => {
                warn!("Dispatch task panicked: {}", e);
                skipped += 1;
            }
        }
    }

    (delivered, skipped)
}
