use shared_store::{Reducer, Store};

use appointment_cell::{AppointmentAction, AppointmentsState};
use auth_cell::{AuthAction, AuthState};
use doctor_cell::{DoctorAction, DoctorsState};
use notification_cell::{NotificationAction, NotificationsState};
use patient_cell::{PatientAction, PatientsState};
use therapy_cell::{TherapyAction, TherapyState};
use treatment_cell::{TreatmentAction, TreatmentState};

use crate::theme::{ThemeAction, ThemeState};

/// The composed application state: one slice per domain, all driven
/// by the single reducer task.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub theme: ThemeState,
    pub notifications: NotificationsState,
    pub appointments: AppointmentsState,
    pub doctors: DoctorsState,
    pub patients: PatientsState,
    pub therapy: TherapyState,
    pub treatment: TreatmentState,
}

#[derive(Debug)]
pub enum AppAction {
    Auth(AuthAction),
    Theme(ThemeAction),
    Notification(NotificationAction),
    Appointment(AppointmentAction),
    Doctor(DoctorAction),
    Patient(PatientAction),
    Therapy(TherapyAction),
    Treatment(TreatmentAction),
}

impl From<AuthAction> for AppAction {
    fn from(action: AuthAction) -> Self {
        AppAction::Auth(action)
    }
}

impl From<ThemeAction> for AppAction {
    fn from(action: ThemeAction) -> Self {
        AppAction::Theme(action)
    }
}

impl From<NotificationAction> for AppAction {
    fn from(action: NotificationAction) -> Self {
        AppAction::Notification(action)
    }
}

impl From<AppointmentAction> for AppAction {
    fn from(action: AppointmentAction) -> Self {
        AppAction::Appointment(action)
    }
}

impl From<DoctorAction> for AppAction {
    fn from(action: DoctorAction) -> Self {
        AppAction::Doctor(action)
    }
}

impl From<PatientAction> for AppAction {
    fn from(action: PatientAction) -> Self {
        AppAction::Patient(action)
    }
}

impl From<TherapyAction> for AppAction {
    fn from(action: TherapyAction) -> Self {
        AppAction::Therapy(action)
    }
}

impl From<TreatmentAction> for AppAction {
    fn from(action: TreatmentAction) -> Self {
        AppAction::Treatment(action)
    }
}

impl Reducer for AppState {
    type Action = AppAction;

    fn reduce(&mut self, action: AppAction) {
        match action {
            AppAction::Auth(action) => self.auth.reduce(action),
            AppAction::Theme(action) => self.theme.reduce(action),
            AppAction::Notification(action) => self.notifications.reduce(action),
            AppAction::Appointment(action) => self.appointments.reduce(action),
            AppAction::Doctor(action) => self.doctors.reduce(action),
            AppAction::Patient(action) => self.patients.reduce(action),
            AppAction::Therapy(action) => self.therapy.reduce(action),
            AppAction::Treatment(action) => self.treatment.reduce(action),
        }
    }
}

pub type AppStore = Store<AppState>;
