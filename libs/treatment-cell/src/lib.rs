pub mod cache;
pub mod models;
pub mod ops;
pub mod services;
pub mod slice;

pub use cache::PlanCache;
pub use models::*;
pub use ops::TreatmentOps;
pub use services::{PlannerService, TreatmentService};
pub use slice::{TreatmentAction, TreatmentState};
