use serde_json::Value;
use uuid::Uuid;

use shared_store::{Dispatch, FetchSeq};

use crate::models::{MedicalHistoryEntry, PatientQuery};
use crate::services::PatientService;
use crate::slice::PatientAction;

pub struct PatientOps {
    service: PatientService,
    fetch_seq: FetchSeq,
}

impl PatientOps {
    pub fn new(service: PatientService) -> Self {
        Self {
            service,
            fetch_seq: FetchSeq::new(),
        }
    }

    pub async fn fetch<D: Dispatch<PatientAction>>(&self, dispatch: &D, query: PatientQuery) {
        let seq = self.fetch_seq.next();
        dispatch.dispatch(PatientAction::FetchPending { seq });

        match self.service.list(&query).await {
            Ok(page) => dispatch.dispatch(PatientAction::FetchFulfilled {
                seq,
                patients: page.patients,
            }),
            Err(e) => dispatch.dispatch(PatientAction::FetchRejected {
                seq,
                message: e.to_string(),
            }),
        }
    }

    pub async fn fetch_by_id<D: Dispatch<PatientAction>>(&self, dispatch: &D, id: Uuid) {
        match self.service.get(id).await {
            Ok(patient) => dispatch.dispatch(PatientAction::FetchOneFulfilled(Box::new(patient))),
            Err(e) => dispatch.dispatch(PatientAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn update<D: Dispatch<PatientAction>>(&self, dispatch: &D, id: Uuid, update: Value) {
        match self.service.update(id, update).await {
            Ok(patient) => dispatch.dispatch(PatientAction::UpdateFulfilled(Box::new(patient))),
            Err(e) => dispatch.dispatch(PatientAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn add_medical_history<D: Dispatch<PatientAction>>(
        &self,
        dispatch: &D,
        id: Uuid,
        entry: MedicalHistoryEntry,
    ) {
        match self.service.add_medical_history(id, &entry).await {
            Ok(patient) => dispatch.dispatch(PatientAction::UpdateFulfilled(Box::new(patient))),
            Err(e) => dispatch.dispatch(PatientAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }
}
