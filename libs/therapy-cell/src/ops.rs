use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use shared_store::{Dispatch, FetchSeq};

use crate::models::{SessionFeedback, SessionFilters, TherapyBookingRequest};
use crate::services::TherapyService;
use crate::slice::TherapyAction;

pub struct TherapyOps {
    service: TherapyService,
    fetch_seq: FetchSeq,
}

impl TherapyOps {
    pub fn new(service: TherapyService) -> Self {
        Self {
            service,
            fetch_seq: FetchSeq::new(),
        }
    }

    pub async fn fetch_sessions<D: Dispatch<TherapyAction>>(&self, dispatch: &D, filters: SessionFilters) {
        let seq = self.fetch_seq.next();
        dispatch.dispatch(TherapyAction::FetchPending { seq });

        match self.service.sessions(&filters).await {
            Ok(sessions) => dispatch.dispatch(TherapyAction::FetchFulfilled { seq, sessions }),
            Err(e) => dispatch.dispatch(TherapyAction::FetchRejected {
                seq,
                message: e.to_string(),
            }),
        }
    }

    pub async fn fetch_types<D: Dispatch<TherapyAction>>(&self, dispatch: &D) {
        match self.service.therapy_types().await {
            Ok(types) => dispatch.dispatch(TherapyAction::TypesFulfilled(types)),
            Err(e) => dispatch.dispatch(TherapyAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn book<D: Dispatch<TherapyAction>>(&self, dispatch: &D, request: TherapyBookingRequest) {
        dispatch.dispatch(TherapyAction::BookPending);

        match self.service.book(&request).await {
            Ok(session) => dispatch.dispatch(TherapyAction::BookFulfilled(Box::new(session))),
            Err(e) => dispatch.dispatch(TherapyAction::BookRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn cancel<D: Dispatch<TherapyAction>>(&self, dispatch: &D, id: Uuid) {
        match self.service.cancel(id).await {
            Ok(()) => dispatch.dispatch(TherapyAction::CancelFulfilled { id }),
            Err(e) => dispatch.dispatch(TherapyAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn reschedule<D: Dispatch<TherapyAction>>(
        &self,
        dispatch: &D,
        id: Uuid,
        new_date: NaiveDate,
        new_time: NaiveTime,
    ) {
        match self.service.reschedule(id, new_date, new_time).await {
            Ok(session) => dispatch.dispatch(TherapyAction::SessionReplaced(Box::new(session))),
            Err(e) => dispatch.dispatch(TherapyAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn submit_feedback<D: Dispatch<TherapyAction>>(&self, dispatch: &D, feedback: SessionFeedback) {
        match self.service.submit_feedback(&feedback).await {
            Ok(saved) => dispatch.dispatch(TherapyAction::FeedbackFulfilled(Box::new(saved))),
            Err(e) => dispatch.dispatch(TherapyAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn update_notes<D: Dispatch<TherapyAction>>(&self, dispatch: &D, id: Uuid, notes: &str) {
        match self.service.update_notes(id, notes).await {
            Ok(session) => dispatch.dispatch(TherapyAction::SessionReplaced(Box::new(session))),
            Err(e) => dispatch.dispatch(TherapyAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }
}
