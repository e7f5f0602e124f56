pub mod models;
pub mod ops;
pub mod services;
pub mod slice;

pub use models::*;
pub use ops::NotificationOps;
pub use services::NotificationService;
pub use slice::{NotificationAction, NotificationsState};
