use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use crate::error::RealtimeError;
use crate::models::{ClientFrame, ServerFrame};

/// One live push connection. JSON text frames in both directions.
#[async_trait]
pub trait PushTransport: Send {
    async fn send(&mut self, frame: ClientFrame) -> Result<(), RealtimeError>;

    /// Next server frame; `None` once the connection is gone.
    async fn next_frame(&mut self) -> Option<ServerFrame>;

    async fn close(&mut self);
}

/// Seam for establishing connections, so the channel's reconnect loop
/// can be driven by an in-memory transport in tests.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn PushTransport>, RealtimeError>;
}

pub struct WsConnector {
    url: String,
}

impl WsConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self) -> Result<Box<dyn PushTransport>, RealtimeError> {
        let (stream, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| RealtimeError::Connect(e.to_string()))?;
        debug!("Websocket connected to {}", self.url);
        Ok(Box::new(WsTransport { stream }))
    }
}

struct WsTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl PushTransport for WsTransport {
    async fn send(&mut self, frame: ClientFrame) -> Result<(), RealtimeError> {
        let body = serde_json::to_string(&frame)?;
        self.stream
            .send(Message::Text(body))
            .await
            .map_err(|e| RealtimeError::Send(e.to_string()))
    }

    async fn next_frame(&mut self) -> Option<ServerFrame> {
        while let Some(message) = self.stream.next().await {
            match message {
                Ok(Message::Text(body)) => match serde_json::from_str::<ServerFrame>(&body) {
                    Ok(frame) => return Some(frame),
                    Err(e) => {
                        warn!("Dropping undecodable push frame: {}", e);
                    }
                },
                Ok(Message::Close(_)) => return None,
                // Pings are answered by the protocol layer; binary
                // frames are not part of this protocol.
                Ok(_) => {}
                Err(e) => {
                    warn!("Websocket read error: {}", e);
                    return None;
                }
            }
        }
        None
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            debug!("Websocket close handshake failed: {}", e);
        }
    }
}
