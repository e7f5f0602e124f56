use tracing::debug;
use uuid::Uuid;

use shared_store::{FetchGate, Reducer};

use crate::models::TreatmentPlan;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreatmentState {
    pub plans: Vec<TreatmentPlan>,
    pub current: Option<Uuid>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub fetch_gate: FetchGate,
}

impl TreatmentState {
    pub fn current(&self) -> Option<&TreatmentPlan> {
        let id = self.current?;
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn plan_for_patient(&self, patient_id: Uuid) -> Option<&TreatmentPlan> {
        self.plans.iter().find(|p| p.patient_id == patient_id)
    }
}

#[derive(Debug)]
pub enum TreatmentAction {
    FetchPending { seq: u64 },
    FetchFulfilled { seq: u64, plans: Vec<TreatmentPlan> },
    FetchRejected { seq: u64, message: String },
    /// Save, single fetch, doctor edit and feedback submission all
    /// resolve to the fresh plan: upsert and point `current` at it.
    PlanUpserted(Box<TreatmentPlan>),
    GeneratePending,
    MutationRejected { message: String },
    SetCurrent(Option<Uuid>),
    ClearError,
}

impl Reducer for TreatmentState {
    type Action = TreatmentAction;

    fn reduce(&mut self, action: TreatmentAction) {
        match action {
            TreatmentAction::FetchPending { seq: _ } | TreatmentAction::GeneratePending => {
                self.is_loading = true;
                self.error = None;
            }
            TreatmentAction::FetchFulfilled { seq, plans } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale plan fetch (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = None;
                self.plans = plans;
            }
            TreatmentAction::FetchRejected { seq, message } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale plan fetch failure (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = Some(message);
            }
            TreatmentAction::PlanUpserted(plan) => {
                self.is_loading = false;
                self.error = None;
                let id = plan.id;
                match self.plans.iter_mut().find(|p| p.id == id) {
                    Some(existing) => *existing = *plan,
                    None => self.plans.push(*plan),
                }
                self.current = Some(id);
            }
            TreatmentAction::MutationRejected { message } => {
                self.is_loading = false;
                self.error = Some(message);
            }
            TreatmentAction::SetCurrent(id) => {
                self.current = id;
            }
            TreatmentAction::ClearError => {
                self.error = None;
            }
        }
    }
}
