use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use shared_store::{Dispatch, FetchSeq};

use crate::models::{
    AppointmentQuery, CompleteAppointmentRequest, CreateAppointmentRequest,
    UpdateAppointmentRequest,
};
use crate::services::AppointmentService;
use crate::slice::AppointmentAction;

pub struct AppointmentOps {
    service: AppointmentService,
    fetch_seq: FetchSeq,
}

impl AppointmentOps {
    pub fn new(service: AppointmentService) -> Self {
        Self {
            service,
            fetch_seq: FetchSeq::new(),
        }
    }

    pub async fn fetch<D: Dispatch<AppointmentAction>>(&self, dispatch: &D, query: AppointmentQuery) {
        let seq = self.fetch_seq.next();
        dispatch.dispatch(AppointmentAction::FetchPending { seq });

        match self.service.list(&query).await {
            Ok(page) => dispatch.dispatch(AppointmentAction::FetchFulfilled {
                seq,
                appointments: page.appointments,
            }),
            Err(e) => dispatch.dispatch(AppointmentAction::FetchRejected {
                seq,
                message: e.to_string(),
            }),
        }
    }

    pub async fn create<D: Dispatch<AppointmentAction>>(
        &self,
        dispatch: &D,
        request: CreateAppointmentRequest,
    ) {
        dispatch.dispatch(AppointmentAction::CreatePending);

        match self.service.create(&request).await {
            Ok(appointment) => {
                dispatch.dispatch(AppointmentAction::CreateFulfilled(Box::new(appointment)))
            }
            Err(e) => dispatch.dispatch(AppointmentAction::CreateRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn cancel<D: Dispatch<AppointmentAction>>(&self, dispatch: &D, id: Uuid, reason: &str) {
        match self.service.cancel(id, reason).await {
            Ok(appointment) => {
                dispatch.dispatch(AppointmentAction::UpdateFulfilled(Box::new(appointment)))
            }
            Err(e) => dispatch.dispatch(AppointmentAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn reschedule<D: Dispatch<AppointmentAction>>(
        &self,
        dispatch: &D,
        id: Uuid,
        new_date: NaiveDate,
        new_time: NaiveTime,
    ) {
        match self.service.reschedule(id, new_date, new_time).await {
            Ok(appointment) => {
                dispatch.dispatch(AppointmentAction::UpdateFulfilled(Box::new(appointment)))
            }
            Err(e) => dispatch.dispatch(AppointmentAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn complete<D: Dispatch<AppointmentAction>>(
        &self,
        dispatch: &D,
        id: Uuid,
        consultation: CompleteAppointmentRequest,
    ) {
        match self.service.complete(id, &consultation).await {
            Ok(appointment) => {
                dispatch.dispatch(AppointmentAction::UpdateFulfilled(Box::new(appointment)))
            }
            Err(e) => dispatch.dispatch(AppointmentAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn update<D: Dispatch<AppointmentAction>>(
        &self,
        dispatch: &D,
        id: Uuid,
        request: UpdateAppointmentRequest,
    ) {
        match self.service.update(id, &request).await {
            Ok(appointment) => {
                dispatch.dispatch(AppointmentAction::UpdateFulfilled(Box::new(appointment)))
            }
            Err(e) => dispatch.dispatch(AppointmentAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }
}
