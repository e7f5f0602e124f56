use tracing::{debug, warn};
use uuid::Uuid;

use shared_store::{FetchGate, Reducer};

use crate::models::Patient;

/// `current` is an id into the canonical list, resolved on read. A
/// detached copy of the current patient could drift from the list
/// after updates; the pointer form makes that bug unrepresentable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatientsState {
    pub patients: Vec<Patient>,
    pub current: Option<Uuid>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub fetch_gate: FetchGate,
}

impl PatientsState {
    pub fn current(&self) -> Option<&Patient> {
        let id = self.current?;
        self.patients.iter().find(|p| p.id() == id)
    }
}

#[derive(Debug)]
pub enum PatientAction {
    FetchPending { seq: u64 },
    FetchFulfilled { seq: u64, patients: Vec<Patient> },
    FetchRejected { seq: u64, message: String },
    /// Single-patient fetch: upsert into the list and point `current`
    /// at it.
    FetchOneFulfilled(Box<Patient>),
    UpdateFulfilled(Box<Patient>),
    MutationRejected { message: String },
    SetCurrent(Option<Uuid>),
    ClearError,
}

impl Reducer for PatientsState {
    type Action = PatientAction;

    fn reduce(&mut self, action: PatientAction) {
        match action {
            PatientAction::FetchPending { seq: _ } => {
                self.is_loading = true;
                self.error = None;
            }
            PatientAction::FetchFulfilled { seq, patients } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale patient fetch (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = None;
                self.patients = patients;
            }
            PatientAction::FetchRejected { seq, message } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale patient fetch failure (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = Some(message);
            }
            PatientAction::FetchOneFulfilled(patient) => {
                let id = patient.id();
                match self.patients.iter_mut().find(|p| p.id() == id) {
                    Some(existing) => *existing = *patient,
                    None => self.patients.push(*patient),
                }
                self.current = Some(id);
            }
            PatientAction::UpdateFulfilled(patient) => {
                match self.patients.iter_mut().find(|p| p.id() == patient.id()) {
                    Some(existing) => *existing = *patient,
                    None => warn!("Update for patient {} not in the visible set", patient.id()),
                }
            }
            PatientAction::MutationRejected { message } => {
                self.error = Some(message);
            }
            PatientAction::SetCurrent(id) => {
                self.current = id;
            }
            PatientAction::ClearError => {
                self.error = None;
            }
        }
    }
}
