pub mod channel;
pub mod error;
pub mod models;
pub mod transport;

pub use channel::{ChannelConfig, RealtimeChannel};
pub use error::RealtimeError;
pub use models::{ClientFrame, ServerFrame};
pub use transport::{Connector, PushTransport, WsConnector};
