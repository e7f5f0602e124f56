use tracing::{debug, warn};

use shared_store::{FetchGate, Reducer};

use crate::models::Doctor;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DoctorsState {
    pub doctors: Vec<Doctor>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub fetch_gate: FetchGate,
}

#[derive(Debug)]
pub enum DoctorAction {
    FetchPending { seq: u64 },
    FetchFulfilled { seq: u64, doctors: Vec<Doctor> },
    FetchRejected { seq: u64, message: String },
    UpdateFulfilled(Box<Doctor>),
    MutationRejected { message: String },
    ClearError,
}

impl Reducer for DoctorsState {
    type Action = DoctorAction;

    fn reduce(&mut self, action: DoctorAction) {
        match action {
            DoctorAction::FetchPending { seq: _ } => {
                self.is_loading = true;
                self.error = None;
            }
            DoctorAction::FetchFulfilled { seq, doctors } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale doctor fetch (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = None;
                self.doctors = doctors;
            }
            DoctorAction::FetchRejected { seq, message } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale doctor fetch failure (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = Some(message);
            }
            DoctorAction::UpdateFulfilled(doctor) => {
                match self.doctors.iter_mut().find(|d| d.id() == doctor.id()) {
                    Some(existing) => *existing = *doctor,
                    None => warn!("Update for doctor {} not in the visible set", doctor.id()),
                }
            }
            DoctorAction::MutationRejected { message } => {
                self.error = Some(message);
            }
            DoctorAction::ClearError => {
                self.error = None;
            }
        }
    }
}
