pub mod models;
pub mod ops;
pub mod services;
pub mod slice;

pub use models::*;
pub use ops::PatientOps;
pub use services::PatientService;
pub use slice::{PatientAction, PatientsState};
