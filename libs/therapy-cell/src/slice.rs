use tracing::{debug, warn};
use uuid::Uuid;

use shared_store::{FetchGate, Reducer};

use crate::models::{SessionFeedback, SessionFilters, SessionStatus, TherapySession, TherapyType};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TherapyState {
    pub sessions: Vec<TherapySession>,
    pub therapy_types: Vec<TherapyType>,
    pub current: Option<Uuid>,
    pub filters: SessionFilters,
    pub is_loading: bool,
    pub error: Option<String>,
    pub fetch_gate: FetchGate,
}

impl TherapyState {
    pub fn current(&self) -> Option<&TherapySession> {
        let id = self.current?;
        self.sessions.iter().find(|s| s.id == id)
    }
}

#[derive(Debug)]
pub enum TherapyAction {
    FetchPending { seq: u64 },
    FetchFulfilled { seq: u64, sessions: Vec<TherapySession> },
    FetchRejected { seq: u64, message: String },
    TypesFulfilled(Vec<TherapyType>),
    BookPending,
    BookFulfilled(Box<TherapySession>),
    BookRejected { message: String },
    CancelFulfilled { id: Uuid },
    /// Reschedule and notes updates both return the fresh entity.
    SessionReplaced(Box<TherapySession>),
    FeedbackFulfilled(Box<SessionFeedback>),
    MutationRejected { message: String },
    SetCurrent(Option<Uuid>),
    SetFilters(SessionFilters),
    ClearFilters,
    ClearError,
}

impl Reducer for TherapyState {
    type Action = TherapyAction;

    fn reduce(&mut self, action: TherapyAction) {
        match action {
            TherapyAction::FetchPending { seq: _ } => {
                self.is_loading = true;
                self.error = None;
            }
            TherapyAction::FetchFulfilled { seq, sessions } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale session fetch (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = None;
                self.sessions = sessions;
            }
            TherapyAction::FetchRejected { seq, message } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale session fetch failure (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = Some(message);
            }
            TherapyAction::TypesFulfilled(types) => {
                self.therapy_types = types;
            }
            TherapyAction::BookPending => {
                self.is_loading = true;
                self.error = None;
            }
            TherapyAction::BookFulfilled(session) => {
                self.is_loading = false;
                self.error = None;
                self.sessions.insert(0, *session);
            }
            TherapyAction::BookRejected { message } => {
                self.is_loading = false;
                self.error = Some(message);
            }
            TherapyAction::CancelFulfilled { id } => {
                match self.sessions.iter_mut().find(|s| s.id == id) {
                    Some(session) => session.status = SessionStatus::Cancelled,
                    None => warn!("Cancel for session {} not in the visible set", id),
                }
            }
            TherapyAction::SessionReplaced(session) => {
                match self.sessions.iter_mut().find(|s| s.id == session.id) {
                    Some(existing) => *existing = *session,
                    None => warn!("Update for session {} not in the visible set", session.id),
                }
            }
            TherapyAction::FeedbackFulfilled(feedback) => {
                match self.sessions.iter_mut().find(|s| s.id == feedback.session_id) {
                    Some(session) => session.feedback = Some(*feedback),
                    None => {
                        warn!("Feedback for session {} not in the visible set", feedback.session_id)
                    }
                }
            }
            TherapyAction::MutationRejected { message } => {
                self.error = Some(message);
            }
            TherapyAction::SetCurrent(id) => {
                self.current = id;
            }
            TherapyAction::SetFilters(filters) => {
                self.filters = filters;
            }
            TherapyAction::ClearFilters => {
                self.filters = SessionFilters::default();
            }
            TherapyAction::ClearError => {
                self.error = None;
            }
        }
    }
}
