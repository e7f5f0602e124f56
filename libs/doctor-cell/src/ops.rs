use uuid::Uuid;

use shared_store::{Dispatch, FetchSeq};

use crate::models::{DoctorQuery, DoctorSchedule, UpdateDoctorRequest};
use crate::services::DoctorService;
use crate::slice::DoctorAction;

pub struct DoctorOps {
    service: DoctorService,
    fetch_seq: FetchSeq,
}

impl DoctorOps {
    pub fn new(service: DoctorService) -> Self {
        Self {
            service,
            fetch_seq: FetchSeq::new(),
        }
    }

    pub async fn fetch<D: Dispatch<DoctorAction>>(&self, dispatch: &D, query: DoctorQuery) {
        let seq = self.fetch_seq.next();
        dispatch.dispatch(DoctorAction::FetchPending { seq });

        match self.service.list(&query).await {
            Ok(page) => dispatch.dispatch(DoctorAction::FetchFulfilled {
                seq,
                doctors: page.doctors,
            }),
            Err(e) => dispatch.dispatch(DoctorAction::FetchRejected {
                seq,
                message: e.to_string(),
            }),
        }
    }

    pub async fn update<D: Dispatch<DoctorAction>>(
        &self,
        dispatch: &D,
        id: Uuid,
        request: UpdateDoctorRequest,
    ) {
        match self.service.update(id, &request).await {
            Ok(doctor) => dispatch.dispatch(DoctorAction::UpdateFulfilled(Box::new(doctor))),
            Err(e) => dispatch.dispatch(DoctorAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn update_availability<D: Dispatch<DoctorAction>>(
        &self,
        dispatch: &D,
        id: Uuid,
        availability: DoctorSchedule,
        consultation_fee: Option<f64>,
    ) {
        match self
            .service
            .update_availability(id, &availability, consultation_fee)
            .await
        {
            Ok(doctor) => dispatch.dispatch(DoctorAction::UpdateFulfilled(Box::new(doctor))),
            Err(e) => dispatch.dispatch(DoctorAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }
}
