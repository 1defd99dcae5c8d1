use crate::api::UserProfile;

/// The three-state machine replacing the loading/user flag pair: `Unknown`
/// only exists between process start and the first session check, after
/// which the state is terminal until `login`/`logout` move it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Unknown,
    Authenticated(UserProfile),
    Anonymous,
}

impl AuthState {
    /// Callers must not render protected content while this is true.
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Unknown)
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
