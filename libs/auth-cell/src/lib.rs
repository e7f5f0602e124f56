pub mod models;
pub mod ops;
pub mod services;
pub mod slice;

pub use models::*;
pub use ops::AuthOps;
pub use services::AuthService;
pub use slice::{AuthAction, AuthState};
