use tracing::{debug, warn};
use uuid::Uuid;

use shared_store::{FetchGate, Reducer};

use crate::models::Appointment;

/// Client-side copy of the user's appointments. `current` is an id
/// pointer resolved against the canonical list on read, so an update
/// to the list can never leave a detached stale copy behind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppointmentsState {
    pub appointments: Vec<Appointment>,
    pub current: Option<Uuid>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub fetch_gate: FetchGate,
}

impl AppointmentsState {
    pub fn current(&self) -> Option<&Appointment> {
        let id = self.current?;
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn find(&self, id: Uuid) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }
}

#[derive(Debug)]
pub enum AppointmentAction {
    FetchPending { seq: u64 },
    FetchFulfilled { seq: u64, appointments: Vec<Appointment> },
    FetchRejected { seq: u64, message: String },
    CreatePending,
    CreateFulfilled(Box<Appointment>),
    CreateRejected { message: String },
    /// Result of any status-changing server operation (cancel,
    /// reschedule, complete, update): patch the returned entity in
    /// place by id.
    UpdateFulfilled(Box<Appointment>),
    MutationRejected { message: String },
    SetCurrent(Option<Uuid>),
    ClearError,
}

impl Reducer for AppointmentsState {
    type Action = AppointmentAction;

    fn reduce(&mut self, action: AppointmentAction) {
        match action {
            AppointmentAction::FetchPending { seq: _ } => {
                self.is_loading = true;
                self.error = None;
            }
            AppointmentAction::FetchFulfilled { seq, appointments } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale appointment fetch (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = None;
                self.appointments = appointments;
            }
            AppointmentAction::FetchRejected { seq, message } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale appointment fetch failure (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = Some(message);
            }
            AppointmentAction::CreatePending => {
                self.is_loading = true;
                self.error = None;
            }
            AppointmentAction::CreateFulfilled(appointment) => {
                self.is_loading = false;
                self.error = None;
                self.appointments.insert(0, *appointment);
            }
            AppointmentAction::CreateRejected { message } => {
                self.is_loading = false;
                self.error = Some(message);
            }
            AppointmentAction::UpdateFulfilled(appointment) => {
                match self.appointments.iter_mut().find(|a| a.id == appointment.id) {
                    Some(existing) => *existing = *appointment,
                    None => {
                        warn!("Update for appointment {} not in the visible set", appointment.id);
                    }
                }
            }
            AppointmentAction::MutationRejected { message } => {
                self.error = Some(message);
            }
            AppointmentAction::SetCurrent(id) => {
                self.current = id;
            }
            AppointmentAction::ClearError => {
                self.error = None;
            }
        }
    }
}
