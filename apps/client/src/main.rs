use std::sync::Arc;

use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod store;
mod theme;

use appointment_cell::{AppointmentOps, AppointmentQuery, AppointmentService};
use auth_cell::{AuthOps, AuthService};
use doctor_cell::{DoctorOps, DoctorQuery, DoctorService};
use notification_cell::{NotificationOps, NotificationQuery, NotificationService};
use patient_cell::{PatientOps, PatientQuery, PatientService};
use realtime_cell::{RealtimeChannel, WsConnector};
use shared_api::ApiClient;
use shared_config::AppConfig;
use shared_models::auth::UserRole;
use shared_store::Store;
use shared_utils::storage::TokenStore;
use shared_utils::LocalStore;
use therapy_cell::{SessionFilters, TherapyOps, TherapyService};
use treatment_cell::{PlanCache, PlannerService, TreatmentOps, TreatmentService};

use crate::store::{AppState, AppStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AyurSutra sync client");

    // Load configuration and persisted local state
    let config = AppConfig::from_env();
    let storage = LocalStore::open(&config.storage_path);
    let api = ApiClient::new(&config, TokenStore::new(storage.clone()));

    let store: AppStore = Store::spawn(AppState::default());
    if storage.get(shared_utils::keys::THEME).is_some() {
        theme::restore(&storage, &store);
    } else {
        theme::set_mode(&storage, &store, theme::ThemeMode::default());
    }

    let auth_ops = AuthOps::new(AuthService::new(api.clone()), storage.clone());
    let notification_ops = Arc::new(NotificationOps::new(NotificationService::new(api.clone())));
    let appointment_ops = AppointmentOps::new(AppointmentService::new(api.clone()));
    let doctor_ops = DoctorOps::new(DoctorService::new(api.clone()));
    let patient_ops = PatientOps::new(PatientService::new(api.clone()));
    let therapy_ops = TherapyOps::new(TherapyService::new(api.clone()));
    let treatment_ops = TreatmentOps::new(
        TreatmentService::new(api.clone()),
        PlannerService::new(&config),
        PlanCache::new(storage.clone()),
    );

    // The push channel opens only once authentication resolves.
    let mut channel = None;

    if let Some(user) = auth_ops.restore_session(&store) {
        // Initial sync of the slices this role works with.
        notification_ops.fetch(&store, NotificationQuery::default()).await;
        appointment_ops.fetch(&store, AppointmentQuery::default()).await;
        therapy_ops.fetch_sessions(&store, SessionFilters::default()).await;
        doctor_ops.fetch(&store, DoctorQuery::default()).await;

        match user.role {
            UserRole::Doctor => {
                patient_ops.fetch(&store, PatientQuery::default()).await;
                treatment_ops.fetch_all(&store).await;
            }
            UserRole::Patient => {
                treatment_ops.fetch_for_patient(&store, user.id).await;
            }
            UserRole::Admin => {}
        }

        let connector = Arc::new(WsConnector::new(config.realtime_url.clone()));
        channel = Some(RealtimeChannel::connect(
            connector,
            user.id,
            store.clone(),
            notification_ops.clone(),
        ));
    } else {
        info!("No persisted session; log in through the API to start syncing");
    }

    // Surface unread-count movements until shutdown.
    let mut updates = store.subscribe();
    let mut last_unread = store.state().notifications.unread_count;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let unread = updates.borrow().notifications.unread_count;
                if unread != last_unread {
                    info!("Unread notifications: {}", unread);
                    last_unread = unread;
                }
            }
        }
    }

    if let Some(channel) = channel {
        channel.close().await;
    }
    info!("Shutting down");
    Ok(())
}
