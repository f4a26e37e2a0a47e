//! Application state machine: Idle → Analyzing → Success | Error.

use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    coordinator::AnalysisCoordinator,
    error::AnalysisError,
    gemini::GenerativeModel,
    types::PhilosophicalAnalysis,
};

pub const TITLE_ERROR_MESSAGE: &str =
    "Lo siento, hubo un error al analizar la película. Por favor intenta nuevamente.";
pub const IMAGE_ERROR_MESSAGE: &str = "Lo siento, no pudimos identificar o analizar la imagen de la película. Asegúrate de que sea clara.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationState {
    Idle,
    Analyzing,
    Success(PhilosophicalAnalysis),
    Error(String),
}

impl ApplicationState {
    pub fn name(&self) -> &'static str {
        match self {
            ApplicationState::Idle => "idle",
            ApplicationState::Analyzing => "analyzing",
            ApplicationState::Success(_) => "success",
            ApplicationState::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Title,
    Image,
}

impl SearchMode {
    /// The only message a user ever sees for a failed search.
    pub fn error_message(self) -> &'static str {
        match self {
            SearchMode::Title => TITLE_ERROR_MESSAGE,
            SearchMode::Image => IMAGE_ERROR_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Title(String),
    Image(Vec<u8>),
}

impl Submission {
    pub fn mode(&self) -> SearchMode {
        match self {
            Submission::Title(_) => SearchMode::Title,
            Submission::Image(_) => SearchMode::Image,
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Submission::Title(title) => title.trim().is_empty(),
            Submission::Image(bytes) => bytes.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("nothing to analyze")]
    EmptyInput,
    #[error("an analysis is already in progress")]
    Busy,
}

/// Proof that a submission entered `Analyzing`; hand it back to
/// [`AppController::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub mode: SearchMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Success,
    Error,
    /// A newer request was started; this result was dropped.
    Stale,
}

pub struct AppController {
    session_id: Uuid,
    state: Mutex<ApplicationState>,
    latest_seq: AtomicU64,
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}

impl AppController {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            state: Mutex::new(ApplicationState::Idle),
            latest_seq: AtomicU64::new(0),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn snapshot(&self) -> ApplicationState {
        self.state.lock().expect("AppController poisoned").clone()
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            *self.state.lock().expect("AppController poisoned"),
            ApplicationState::Analyzing
        )
    }

    /// Enter `Analyzing`, dropping any previous result or error.
    pub fn begin(&self, submission: &Submission) -> Result<RequestTicket, SubmitRejected> {
        if submission.is_blank() {
            return Err(SubmitRejected::EmptyInput);
        }

        let mut state = self.state.lock().expect("AppController poisoned");
        if matches!(*state, ApplicationState::Analyzing) {
            return Err(SubmitRejected::Busy);
        }

        *state = ApplicationState::Analyzing;
        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let mode = submission.mode();

        info!(session = %self.session_id, seq, ?mode, "analysis started");
        Ok(RequestTicket { seq, mode })
    }

    /// Record the outcome of the request behind `ticket`.
    pub fn complete(
        &self,
        ticket: RequestTicket,
        outcome: Result<PhilosophicalAnalysis, AnalysisError>,
    ) -> Commit {
        let mut state = self.state.lock().expect("AppController poisoned");
        if !self.is_current(ticket, &state) {
            return Commit::Stale;
        }

        match outcome {
            Ok(analysis) => {
                info!(session = %self.session_id, seq = ticket.seq, title = %analysis.movie_title, "analysis succeeded");
                *state = ApplicationState::Success(analysis);
                Commit::Success
            }
            Err(e) => {
                warn!(session = %self.session_id, seq = ticket.seq, kind = ?e.kind(), error = %e, "analysis failed");
                *state = ApplicationState::Error(ticket.mode.error_message().to_string());
                Commit::Error
            }
        }
    }

    /// Give up on the request behind `ticket` when no outcome will ever
    /// arrive, e.g. the task running it panicked.
    pub fn abort(&self, ticket: RequestTicket) -> Commit {
        let mut state = self.state.lock().expect("AppController poisoned");
        if !self.is_current(ticket, &state) {
            return Commit::Stale;
        }

        warn!(session = %self.session_id, seq = ticket.seq, "analysis abandoned");
        *state = ApplicationState::Error(ticket.mode.error_message().to_string());
        Commit::Error
    }

    fn is_current(&self, ticket: RequestTicket, state: &ApplicationState) -> bool {
        let latest = self.latest_seq.load(Ordering::SeqCst);
        if ticket.seq == latest && matches!(state, ApplicationState::Analyzing) {
            return true;
        }

        warn!(
            session = %self.session_id,
            seq = ticket.seq,
            latest,
            state = state.name(),
            "discarding stale analysis result"
        );
        false
    }

    /// Run one submission end to end and return the resulting state.
    pub async fn submit<M: GenerativeModel>(
        &self,
        coordinator: &AnalysisCoordinator<M>,
        submission: Submission,
    ) -> Result<ApplicationState, SubmitRejected> {
        let ticket = self.begin(&submission)?;

        let outcome = coordinator.analyze(&submission).await;
        self.complete(ticket, outcome);
        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PhilosophicalAnalysis {
        PhilosophicalAnalysis {
            movie_title: "Solaris".into(),
            synopsis: "Un planeta que piensa.".into(),
            poster_url: None,
            trailer_url: None,
            philosophical_themes: vec!["Memoria".into()],
            related_authors: vec!["Lem".into()],
            analysis: "...".into(),
            activities: vec![],
        }
    }

    #[test]
    fn starts_idle() {
        let controller = AppController::new();
        assert_eq!(controller.snapshot(), ApplicationState::Idle);
        assert!(!controller.is_busy());
    }

    #[test]
    fn blank_title_keeps_idle() {
        let controller = AppController::new();
        assert_eq!(
            controller.begin(&Submission::Title("  \t".into())),
            Err(SubmitRejected::EmptyInput)
        );
        assert_eq!(
            controller.begin(&Submission::Image(Vec::new())),
            Err(SubmitRejected::EmptyInput)
        );
        assert_eq!(controller.snapshot(), ApplicationState::Idle);
    }

    #[test]
    fn second_submission_while_analyzing_is_busy() {
        let controller = AppController::new();
        controller
            .begin(&Submission::Title("Solaris".into()))
            .unwrap();
        assert_eq!(
            controller.begin(&Submission::Title("Stalker".into())),
            Err(SubmitRejected::Busy)
        );
        assert!(controller.is_busy());
    }

    #[test]
    fn begin_clears_previous_result() {
        let controller = AppController::new();
        let ticket = controller
            .begin(&Submission::Title("Solaris".into()))
            .unwrap();
        assert_eq!(controller.complete(ticket, Ok(sample())), Commit::Success);

        controller
            .begin(&Submission::Image(vec![1, 2, 3]))
            .unwrap();
        assert_eq!(controller.snapshot(), ApplicationState::Analyzing);
    }

    #[test]
    fn error_message_depends_on_mode_only() {
        let controller = AppController::new();
        let ticket = controller.begin(&Submission::Image(vec![1])).unwrap();
        let commit = controller.complete(ticket, Err(AnalysisError::EmptyResponse));
        assert_eq!(commit, Commit::Error);
        assert_eq!(
            controller.snapshot(),
            ApplicationState::Error(IMAGE_ERROR_MESSAGE.to_string())
        );

        let ticket = controller
            .begin(&Submission::Title("Solaris".into()))
            .unwrap();
        controller.complete(
            ticket,
            Err(AnalysisError::MissingApiKey {
                env_var: "GEMINI_API_KEY".into(),
            }),
        );
        assert_eq!(
            controller.snapshot(),
            ApplicationState::Error(TITLE_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn late_result_of_older_request_is_dropped() {
        let controller = AppController::new();
        let first = controller
            .begin(&Submission::Title("Solaris".into()))
            .unwrap();
        controller.complete(first, Err(AnalysisError::EmptyResponse));

        let second = controller
            .begin(&Submission::Title("Stalker".into()))
            .unwrap();
        assert!(second.seq > first.seq);

        assert_eq!(controller.complete(first, Ok(sample())), Commit::Stale);
        assert_eq!(controller.snapshot(), ApplicationState::Analyzing);

        assert_eq!(controller.complete(second, Ok(sample())), Commit::Success);
    }

    #[test]
    fn resolved_ticket_cannot_commit_twice() {
        let controller = AppController::new();
        let ticket = controller
            .begin(&Submission::Title("Solaris".into()))
            .unwrap();
        assert_eq!(controller.complete(ticket, Ok(sample())), Commit::Success);
        assert_eq!(
            controller.complete(ticket, Err(AnalysisError::EmptyResponse)),
            Commit::Stale
        );
        assert!(matches!(controller.snapshot(), ApplicationState::Success(_)));
    }

    #[test]
    fn abort_releases_the_session() {
        let controller = AppController::new();
        let ticket = controller
            .begin(&Submission::Title("Solaris".into()))
            .unwrap();

        assert_eq!(controller.abort(ticket), Commit::Error);
        assert_eq!(
            controller.snapshot(),
            ApplicationState::Error(TITLE_ERROR_MESSAGE.to_string())
        );
        assert!(!controller.is_busy());
        assert!(controller.begin(&Submission::Title("Stalker".into())).is_ok());
        assert_eq!(controller.abort(ticket), Commit::Stale);
    }

    #[test]
    fn each_controller_gets_its_own_session() {
        assert_ne!(AppController::new().session_id(), AppController::new().session_id());
    }
}
