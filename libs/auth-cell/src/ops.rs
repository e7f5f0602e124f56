use tracing::{info, warn};

use shared_models::auth::User;
use shared_store::Dispatch;
use shared_utils::{keys, LocalStore};

use crate::models::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::services::AuthService;
use crate::slice::AuthAction;

/// Auth operations own the persisted credential lifecycle: the token
/// and cached user are written exactly once per login and removed at
/// logout; nothing else writes those keys.
pub struct AuthOps {
    service: AuthService,
    storage: LocalStore,
}

impl AuthOps {
    pub fn new(service: AuthService, storage: LocalStore) -> Self {
        Self { service, storage }
    }

    pub async fn login<D: Dispatch<AuthAction>>(&self, dispatch: &D, request: LoginRequest) {
        dispatch.dispatch(AuthAction::LoginPending);

        match self.service.login(&request).await {
            Ok(payload) => {
                self.persist_session(&payload.user, &payload.token);
                info!("Logged in as {}", payload.user.email);
                dispatch.dispatch(AuthAction::LoginFulfilled(Box::new(payload.user)));
            }
            Err(e) => dispatch.dispatch(AuthAction::LoginRejected {
                message: e.to_string(),
            }),
        }
    }

    pub async fn register<D: Dispatch<AuthAction>>(&self, dispatch: &D, request: RegisterRequest) {
        dispatch.dispatch(AuthAction::LoginPending);

        match self.service.register(&request).await {
            Ok(payload) => {
                self.persist_session(&payload.user, &payload.token);
                dispatch.dispatch(AuthAction::LoginFulfilled(Box::new(payload.user)));
            }
            Err(e) => dispatch.dispatch(AuthAction::LoginRejected {
                message: e.to_string(),
            }),
        }
    }

    /// Local state is cleared even when the server-side logout fails;
    /// the session must not survive a network hiccup.
    pub async fn logout<D: Dispatch<AuthAction>>(&self, dispatch: &D) {
        if let Err(e) = self.service.logout().await {
            warn!("Server-side logout failed: {}", e);
        }

        self.storage.remove(keys::AUTH_TOKEN);
        self.storage.remove(keys::USER_DATA);
        dispatch.dispatch(AuthAction::LoggedOut);
    }

    /// Rebuild the session from persisted state at startup. Returns
    /// the restored user so callers can wire up the push channel.
    pub fn restore_session<D: Dispatch<AuthAction>>(&self, dispatch: &D) -> Option<User> {
        let token = self.storage.get_as::<String>(keys::AUTH_TOKEN)?;
        if token.is_empty() {
            return None;
        }
        let user = self.storage.get_as::<User>(keys::USER_DATA)?;

        info!("Restored session for {}", user.email);
        dispatch.dispatch(AuthAction::SessionRestored(Box::new(user.clone())));
        Some(user)
    }

    pub async fn fetch_profile<D: Dispatch<AuthAction>>(&self, dispatch: &D) {
        match self.service.get_profile().await {
            Ok(user) => {
                self.storage.set(keys::USER_DATA, &user);
                dispatch.dispatch(AuthAction::ProfileUpdated(Box::new(user)));
            }
            Err(e) => warn!("Profile refresh failed: {}", e),
        }
    }

    pub async fn update_profile<D: Dispatch<AuthAction>>(
        &self,
        dispatch: &D,
        request: UpdateProfileRequest,
    ) {
        match self.service.update_profile(&request).await {
            Ok(user) => {
                self.storage.set(keys::USER_DATA, &user);
                dispatch.dispatch(AuthAction::ProfileUpdated(Box::new(user)));
            }
            Err(e) => dispatch.dispatch(AuthAction::LoginRejected {
                message: e.to_string(),
            }),
        }
    }

    fn persist_session(&self, user: &User, token: &str) {
        self.storage.set(keys::AUTH_TOKEN, &token);
        self.storage.set(keys::USER_DATA, user);
    }
}
