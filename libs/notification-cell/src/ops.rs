use uuid::Uuid;

use shared_store::{Dispatch, FetchSeq};

use crate::models::NotificationQuery;
use crate::services::NotificationService;
use crate::slice::NotificationAction;

/// Async operations for the notification slice: each bridges one
/// service call to the store through the pending/fulfilled/rejected
/// convention. Fetches take a sequence ticket so the slice can discard
/// responses that arrive out of order.
pub struct NotificationOps {
    service: NotificationService,
    fetch_seq: FetchSeq,
}

impl NotificationOps {
    pub fn new(service: NotificationService) -> Self {
        Self {
            service,
            fetch_seq: FetchSeq::new(),
        }
    }

    pub async fn fetch<D: Dispatch<NotificationAction>>(&self, dispatch: &D, query: NotificationQuery) {
        let seq = self.fetch_seq.next();
        dispatch.dispatch(NotificationAction::FetchPending { seq });

        match self.service.list(&query).await {
            Ok(page) => dispatch.dispatch(NotificationAction::FetchFulfilled {
                seq,
                notifications: page.notifications,
            }),
            Err(e) => dispatch.dispatch(NotificationAction::FetchRejected {
                seq,
                message: e.to_string(),
            }),
        }
    }

    pub async fn mark_read<D: Dispatch<NotificationAction>>(&self, dispatch: &D, id: Uuid) {
        match self.service.mark_read(id).await {
            Ok(notification) => dispatch.dispatch(NotificationAction::MarkReadFulfilled {
                notification: Box::new(notification),
            }),
            Err(e) => dispatch.dispatch(NotificationAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn mark_all_read<D: Dispatch<NotificationAction>>(&self, dispatch: &D) {
        match self.service.mark_all_read().await {
            Ok(()) => dispatch.dispatch(NotificationAction::MarkAllReadFulfilled),
            Err(e) => dispatch.dispatch(NotificationAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn delete<D: Dispatch<NotificationAction>>(&self, dispatch: &D, id: Uuid) {
        match self.service.delete(id).await {
            Ok(()) => dispatch.dispatch(NotificationAction::DeleteFulfilled { id }),
            Err(e) => dispatch.dispatch(NotificationAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }
}
