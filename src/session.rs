// src/session.rs

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, watch};

use crate::{
    api::QuizBackend,
    attempt::Attempt,
    error::ClientError,
    models::{
        attempt::{FocusEvent, QuizResult},
        question::OptionKey,
        quiz::QuizSummary,
    },
    proctor::FocusReporter,
    timer::{DeadlineTimer, TimeRemaining},
};

/// State shared between the session and its timer/reporter tasks.
pub(crate) struct Shared {
    pub(crate) backend: Arc<dyn QuizBackend>,

    /// The single active-attempt slot. `None` means no attempt is live;
    /// whichever submit path takes the attempt out owns the submission.
    pub(crate) slot: Mutex<Option<Attempt>>,

    /// Grade recorded by whichever submit path completed.
    outcome: Arc<Mutex<Option<QuizResult>>>,

    /// Flipped once when the attempt ends; timer and reporter exit on it.
    shutdown: watch::Sender<bool>,
}

impl Shared {
    fn new(
        backend: Arc<dyn QuizBackend>,
        attempt: Attempt,
        outcome: Arc<Mutex<Option<QuizResult>>>,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            backend,
            slot: Mutex::new(Some(attempt)),
            outcome,
            shutdown,
        }
    }

    pub(crate) fn shutdown_rx(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    fn trigger_shutdown(&self) {
        let _ = self.shutdown.send(true);
    }
}

/// The attempt unit: state slot, countdown and proctor listener. The three
/// come up together on start and go down together on every exit path.
struct ActiveAttempt {
    shared: Arc<Shared>,
    timer: DeadlineTimer,
    reporter: FocusReporter,
}

/// One student's quiz-taking session.
///
/// Replaces what a browser client would keep in ambient globals with an
/// explicit context object: at most one attempt is active at a time, and
/// its timer and focus reporter share its lifecycle exactly.
pub struct QuizSession {
    backend: Arc<dyn QuizBackend>,
    active: Option<ActiveAttempt>,
    last_result: Arc<Mutex<Option<QuizResult>>>,
}

impl QuizSession {
    pub fn new(backend: Arc<dyn QuizBackend>) -> Self {
        Self {
            backend,
            active: None,
            last_result: Arc::new(Mutex::new(None)),
        }
    }

    /// The student's quiz catalog, with prior attempts attached.
    pub async fn quizzes(&self) -> Result<Vec<QuizSummary>, ClientError> {
        self.backend.student_quizzes().await
    }

    /// Starts an attempt on `quiz_id`.
    ///
    /// On backend rejection (quiz locked, already attempted, unreachable)
    /// nothing is created. On success the attempt slot, deadline timer and
    /// focus reporter come up as one unit. A still-active previous attempt
    /// is discarded first, so at most one tick source is ever live.
    pub async fn start(&mut self, quiz_id: i64) -> Result<(), ClientError> {
        if self.active.is_some() {
            tracing::warn!(quiz_id, "starting a new attempt over a live one");
            self.discard().await;
        }

        let started = self.backend.start_attempt(quiz_id).await?;
        if started.questions.is_empty() {
            return Err(ClientError::Start("quiz has no questions".to_string()));
        }

        tracing::info!(
            quiz_id,
            attempt_id = started.attempt_id,
            duration_minutes = started.duration_minutes,
            "attempt started"
        );

        *self.last_result.lock().await = None;

        let attempt = Attempt::new(quiz_id, started);
        let deadline = attempt.deadline();
        let shared = Arc::new(Shared::new(
            self.backend.clone(),
            attempt,
            self.last_result.clone(),
        ));

        let timer = DeadlineTimer::start(deadline, shared.clone());
        let reporter = FocusReporter::enable(shared.clone());

        self.active = Some(ActiveAttempt {
            shared,
            timer,
            reporter,
        });
        Ok(())
    }

    pub fn has_active_attempt(&self) -> bool {
        self.active.is_some()
    }

    /// Cloned snapshot of the attempt for the presentation layer, `None`
    /// once the attempt ended.
    pub async fn attempt(&self) -> Option<Attempt> {
        let active = self.active.as_ref()?;
        active.shared.slot.lock().await.clone()
    }

    /// Records an answer. Returns false when there is no active attempt or
    /// the question id is not part of it.
    pub async fn select_answer(&self, question_id: i64, key: OptionKey) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        let mut slot = active.shared.slot.lock().await;
        match slot.as_mut() {
            Some(attempt) => attempt.select_answer(question_id, key),
            None => false,
        }
    }

    /// Moves to the next question. Returns false at the last question or
    /// when no attempt is active.
    pub async fn advance(&self) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        let mut slot = active.shared.slot.lock().await;
        match slot.as_mut() {
            Some(attempt) => attempt.advance(),
            None => false,
        }
    }

    /// Countdown channel for the presentation layer.
    pub fn remaining(&self) -> Option<watch::Receiver<TimeRemaining>> {
        self.active.as_ref().map(|a| a.timer.remaining())
    }

    /// Channel for feeding focus-loss transitions to the proctor reporter.
    pub fn focus_events(&self) -> Option<mpsc::UnboundedSender<FocusEvent>> {
        self.active.as_ref().map(|a| a.reporter.sender())
    }

    /// Submits the attempt.
    ///
    /// `Ok(None)` means there was nothing to submit: no attempt was ever
    /// started, or the deadline timer already auto-submitted this one. On
    /// `Err` the attempt is terminated all the same; the time is spent and
    /// no score will come.
    pub async fn submit(&mut self) -> Result<Option<QuizResult>, ClientError> {
        let Some(active) = self.active.take() else {
            return Ok(None);
        };
        submit_taken(&active.shared).await
    }

    /// Abandons the active attempt without submitting (navigation away).
    pub async fn discard(&mut self) {
        if let Some(active) = self.active.take() {
            let dropped = active.shared.slot.lock().await.take();
            active.shared.trigger_shutdown();
            if let Some(attempt) = dropped {
                tracing::info!(
                    quiz_id = attempt.quiz_id(),
                    attempt_id = attempt.attempt_id(),
                    "attempt discarded"
                );
            }
        }
    }

    /// Grade recorded by whichever submit path completed, if any.
    pub async fn last_result(&self) -> Option<QuizResult> {
        *self.last_result.lock().await
    }
}

/// Takes the attempt out of the slot and submits it. The take decides the
/// manual-vs-timer race: the loser finds the slot empty and no-ops.
async fn submit_taken(shared: &Shared) -> Result<Option<QuizResult>, ClientError> {
    let attempt = { shared.slot.lock().await.take() };
    let Some(attempt) = attempt else {
        return Ok(None);
    };

    // The attempt is over from here on, whatever the backend says.
    shared.trigger_shutdown();

    match shared
        .backend
        .submit_attempt(attempt.quiz_id(), attempt.attempt_id(), attempt.answers())
        .await
    {
        Ok(result) => {
            tracing::info!(
                score = result.score,
                total = result.total_questions,
                "attempt submitted"
            );
            *shared.outcome.lock().await = Some(result);
            Ok(Some(result))
        }
        Err(e) => {
            tracing::error!("Submission failed, attempt closed without a score: {}", e);
            Err(e)
        }
    }
}

/// Expiry path, called by the deadline timer exactly once.
pub(crate) async fn auto_submit(shared: &Shared) {
    match submit_taken(shared).await {
        Ok(Some(result)) => {
            tracing::info!(
                score = result.score,
                total = result.total_questions,
                "time expired, attempt auto-submitted"
            );
        }
        // A manual submit won the race.
        Ok(None) => {}
        Err(e) => tracing::error!("Auto-submit failed: {}", e),
    }
}
