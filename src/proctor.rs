// src/proctor.rs

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::attempt::FocusEvent;
use crate::session::Shared;

/// The focus-loss reporter.
///
/// Enabled when an attempt starts; the embedder pushes every
/// focused→unfocused transition into the channel handed out by
/// [`FocusReporter::sender`]. Each event becomes one fire-and-forget
/// notification to the backend. Delivery failures are logged and dropped:
/// they never interrupt the attempt, never retry, never reach the student.
///
/// The listener task exits on the session's shutdown signal, so events
/// arriving after the attempt ended go nowhere.
pub struct FocusReporter {
    events: mpsc::UnboundedSender<FocusEvent>,
    handle: Option<JoinHandle<()>>,
}

impl FocusReporter {
    pub(crate) fn enable(shared: Arc<Shared>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut shutdown = shared.shutdown_rx();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.changed() => break,
                    event = rx.recv() => {
                        let Some(event) = event else { break };
                        report(&shared, event).await;
                    }
                }
            }
        });

        Self {
            events: tx,
            handle: Some(handle),
        }
    }

    /// Channel the embedder feeds focus transitions into. Sends after
    /// teardown fail silently.
    pub fn sender(&self) -> mpsc::UnboundedSender<FocusEvent> {
        self.events.clone()
    }

    /// Removes the listener. Safe to call more than once.
    pub fn disable(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for FocusReporter {
    fn drop(&mut self) {
        self.disable();
    }
}

async fn report(shared: &Shared, event: FocusEvent) {
    // Snapshot under the lock; a nulled attempt swallows the event.
    let (quiz_id, question_number) = {
        let slot = shared.slot.lock().await;
        match slot.as_ref() {
            Some(attempt) => (attempt.quiz_id(), attempt.question_number()),
            None => return,
        }
    };

    if let Err(e) = shared
        .backend
        .report_focus_loss(quiz_id, event, question_number)
        .await
    {
        tracing::warn!("Focus-loss report dropped: {}", e);
    }
}
