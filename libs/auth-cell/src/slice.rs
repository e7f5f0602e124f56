use shared_models::auth::User;
use shared_store::Reducer;

/// Session state. The real-time channel watches
/// `is_authenticated && user` to decide when a push connection should
/// be live.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub enum AuthAction {
    LoginPending,
    LoginFulfilled(Box<User>),
    LoginRejected { message: String },
    /// Rebuilt from the persisted token + cached user at startup.
    SessionRestored(Box<User>),
    ProfileUpdated(Box<User>),
    LoggedOut,
    ClearError,
}

impl Reducer for AuthState {
    type Action = AuthAction;

    fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::LoginPending => {
                self.is_loading = true;
                self.error = None;
            }
            AuthAction::LoginFulfilled(user) | AuthAction::SessionRestored(user) => {
                self.is_loading = false;
                self.error = None;
                self.user = Some(*user);
                self.is_authenticated = true;
            }
            AuthAction::LoginRejected { message } => {
                self.is_loading = false;
                self.error = Some(message);
                self.user = None;
                self.is_authenticated = false;
            }
            AuthAction::ProfileUpdated(user) => {
                self.user = Some(*user);
            }
            AuthAction::LoggedOut => {
                self.user = None;
                self.is_authenticated = false;
                self.error = None;
            }
            AuthAction::ClearError => {
                self.error = None;
            }
        }
    }
}
