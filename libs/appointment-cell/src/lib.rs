pub mod models;
pub mod ops;
pub mod services;
pub mod slice;

pub use models::*;
pub use ops::AppointmentOps;
pub use services::AppointmentService;
pub use slice::{AppointmentAction, AppointmentsState};
