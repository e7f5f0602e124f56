use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use notification_cell::{NotificationAction, NotificationOps, NotificationQuery};
use shared_store::Dispatch;

use crate::models::{ClientFrame, ServerFrame};
use crate::transport::Connector;

#[derive(Debug, Clone)]
pub struct ChannelConfig {
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// The one live push connection of an authenticated session.
///
/// Opened when authentication resolves, torn down at logout. After
/// connecting it announces the user with a `join` frame, then relays
/// every `new_notification` push into the notification slice. Pushes
/// are at-most-once with no replay, so a drop is handled by
/// exponential-backoff reconnect plus a full resync fetch that covers
/// the gap.
pub struct RealtimeChannel {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RealtimeChannel {
    pub fn connect<D>(
        connector: Arc<dyn Connector>,
        user_id: Uuid,
        dispatch: D,
        ops: Arc<NotificationOps>,
    ) -> Self
    where
        D: Dispatch<NotificationAction> + 'static,
    {
        Self::connect_with_config(connector, user_id, dispatch, ops, ChannelConfig::default())
    }

    pub fn connect_with_config<D>(
        connector: Arc<dyn Connector>,
        user_id: Uuid,
        dispatch: D,
        ops: Arc<NotificationOps>,
        config: ChannelConfig,
    ) -> Self
    where
        D: Dispatch<NotificationAction> + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_channel(connector, user_id, dispatch, ops, config, shutdown_rx));

        Self {
            shutdown: shutdown_tx,
            handle,
        }
    }

    /// Tear the connection down and wait for the task to finish.
    pub async fn close(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

async fn run_channel<D>(
    connector: Arc<dyn Connector>,
    user_id: Uuid,
    dispatch: D,
    ops: Arc<NotificationOps>,
    config: ChannelConfig,
    mut shutdown: watch::Receiver<bool>,
) where
    D: Dispatch<NotificationAction> + 'static,
{
    let mut backoff = config.initial_backoff;
    let mut reconnecting = false;

    loop {
        if *shutdown.borrow() {
            break;
        }

        match connector.connect().await {
            Ok(mut transport) => {
                if let Err(e) = transport.send(ClientFrame::Join { user_id }).await {
                    warn!("Failed to announce user on push channel: {}", e);
                } else {
                    info!("Realtime channel open for user {}", user_id);
                    backoff = config.initial_backoff;

                    if reconnecting {
                        // Pushes during the gap are gone for good;
                        // resync the whole visible set instead.
                        debug!("Resyncing notifications after reconnect");
                        ops.fetch(&dispatch, NotificationQuery::default()).await;
                    }
                    reconnecting = true;

                    loop {
                        let mut closing = false;
                        tokio::select! {
                            _ = shutdown.changed() => {
                                closing = true;
                            }
                            frame = transport.next_frame() => match frame {
                                Some(ServerFrame::NewNotification(notification)) => {
                                    // Toast analog for the headless client.
                                    info!("New notification: {}", notification.title);
                                    dispatch.dispatch(NotificationAction::LiveInserted(notification));
                                }
                                Some(ServerFrame::Unknown) => {
                                    debug!("Ignoring unrecognized push event");
                                }
                                None => {
                                    warn!("Push connection lost, scheduling reconnect");
                                    break;
                                }
                            }
                        }
                        if closing {
                            transport.close().await;
                            info!("Realtime channel closed for user {}", user_id);
                            return;
                        }
                    }
                }
            }
            Err(e) => {
                warn!("Push connection attempt failed: {}", e);
            }
        }

        tokio::select! {
            _ = shutdown.changed() => return,
            _ = tokio::time::sleep(backoff) => {}
        }
        backoff = (backoff * 2).min(config.max_backoff);
    }
}
