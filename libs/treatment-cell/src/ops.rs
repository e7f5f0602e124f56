use uuid::Uuid;

use shared_store::{Dispatch, FetchSeq};

use crate::cache::PlanCache;
use crate::models::{
    DayFeedback, SaveTreatmentPlanRequest, UpdateTreatmentPlanRequest,
};
use crate::services::{PlannerService, TreatmentService};
use crate::slice::TreatmentAction;

pub struct TreatmentOps {
    service: TreatmentService,
    planner: PlannerService,
    cache: PlanCache,
    fetch_seq: FetchSeq,
}

impl TreatmentOps {
    pub fn new(service: TreatmentService, planner: PlannerService, cache: PlanCache) -> Self {
        Self {
            service,
            planner,
            cache,
            fetch_seq: FetchSeq::new(),
        }
    }

    pub async fn fetch_all<D: Dispatch<TreatmentAction>>(&self, dispatch: &D) {
        let seq = self.fetch_seq.next();
        dispatch.dispatch(TreatmentAction::FetchPending { seq });

        match self.service.list().await {
            Ok(plans) => dispatch.dispatch(TreatmentAction::FetchFulfilled { seq, plans }),
            Err(e) => dispatch.dispatch(TreatmentAction::FetchRejected {
                seq,
                message: e.to_string(),
            }),
        }
    }

    /// Authoritative fetch for one patient. A success invalidates the
    /// deprecated local cache entry; a failure falls back to it once
    /// so an offline doctor still sees the last known plan.
    pub async fn fetch_for_patient<D: Dispatch<TreatmentAction>>(&self, dispatch: &D, patient_id: Uuid) {
        match self.service.get_by_patient(patient_id).await {
            Ok(plan) => {
                self.cache.invalidate(patient_id);
                dispatch.dispatch(TreatmentAction::PlanUpserted(Box::new(plan)));
            }
            Err(e) => match self.cache.fallback_plan(patient_id) {
                Some(plan) => dispatch.dispatch(TreatmentAction::PlanUpserted(Box::new(plan))),
                None => dispatch.dispatch(TreatmentAction::MutationRejected {
                    message: e.to_string(),
                }),
            },
        }
    }

    /// Generate a plan from the free-text report, then persist it.
    /// The AI response is never stored client-side without the save.
    pub async fn generate_and_save<D: Dispatch<TreatmentAction>>(
        &self,
        dispatch: &D,
        report: &str,
        patient_id: Uuid,
        doctor_id: Uuid,
        patient_name: &str,
    ) {
        dispatch.dispatch(TreatmentAction::GeneratePending);

        let generated = match self.planner.generate(report).await {
            Ok(generated) => generated,
            Err(e) => {
                dispatch.dispatch(TreatmentAction::MutationRejected {
                    message: e.to_string(),
                });
                return;
            }
        };

        let request = SaveTreatmentPlanRequest {
            patient_id,
            doctor_id,
            patient_name: patient_name.to_string(),
            summary: generated.summary,
            schedule: generated.schedule,
            form_data: None,
        };

        match self.service.save(&request).await {
            Ok(plan) => dispatch.dispatch(TreatmentAction::PlanUpserted(Box::new(plan))),
            Err(e) => dispatch.dispatch(TreatmentAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn update<D: Dispatch<TreatmentAction>>(
        &self,
        dispatch: &D,
        id: Uuid,
        request: UpdateTreatmentPlanRequest,
    ) {
        match self.service.update(id, &request).await {
            Ok(plan) => dispatch.dispatch(TreatmentAction::PlanUpserted(Box::new(plan))),
            Err(e) => dispatch.dispatch(TreatmentAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn submit_day_feedback<D: Dispatch<TreatmentAction>>(
        &self,
        dispatch: &D,
        id: Uuid,
        day: u32,
        feedback: DayFeedback,
    ) {
        match self.service.submit_day_feedback(id, day, &feedback).await {
            Ok(plan) => dispatch.dispatch(TreatmentAction::PlanUpserted(Box::new(plan))),
            Err(e) => dispatch.dispatch(TreatmentAction::MutationRejected {
                message: e.to_string(),
            }),
        }
    }
}
