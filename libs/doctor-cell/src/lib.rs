pub mod models;
pub mod ops;
pub mod services;
pub mod slice;

pub use models::*;
pub use ops::DoctorOps;
pub use services::DoctorService;
pub use slice::{DoctorAction, DoctorsState};
