pub mod models;
pub mod ops;
pub mod services;
pub mod slice;

pub use models::*;
pub use ops::TherapyOps;
pub use services::TherapyService;
pub use slice::{TherapyAction, TherapyState};
