//! Login and registration from the browser.
//!
//! A successful call persists the returned user as the current session and
//! sends the user to the matching profile page. A failure is shown as a
//! notification and leaves the stored session untouched.

use std::rc::Rc;

use shared::{
    ApiError, GaunRootsClient, SessionError, SessionRecord, SessionRepository, UserKind,
    models::Credentials,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::navigation::{Destination, Navigator};
use crate::notifications::{Notification, Notifier};

pub const LOGGING_IN_MESSAGE: &str = "Logging in...";
pub const REGISTERING_MESSAGE: &str = "Creating your account...";

/// Which account call a form submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Raw values of a login or registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub name: String,
    /// `buyer` or `seller`; blank means buyer.
    pub kind: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Unknown account type '{0}'")]
    UnknownKind(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("The server sent an unexpected account record.")]
    InvalidRecord(#[from] serde_json::Error),
    #[error("Could not save your session: {0}")]
    Session(#[from] SessionError),
}

impl AuthError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Validates the form into the request body.
///
/// # Errors
/// Returns [`AuthError`] for a blank name or an unknown account type.
pub fn build_credentials(form: &AuthForm) -> Result<Credentials, AuthError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AuthError::MissingName);
    }
    let kind = match form.kind.trim() {
        "" => UserKind::Buyer,
        raw => raw
            .parse()
            .map_err(|_| AuthError::UnknownKind(raw.to_string()))?,
    };
    Ok(Credentials::new(name, kind))
}

/// Drives the login and registration forms.
pub struct AuthFlow<S, V, N> {
    client: GaunRootsClient,
    session: Rc<S>,
    navigator: Rc<V>,
    notifier: N,
}

impl<S, V, N> std::fmt::Debug for AuthFlow<S, V, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthFlow")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl<S, V, N> AuthFlow<S, V, N>
where
    S: SessionRepository,
    V: Navigator,
    N: Notifier,
{
    pub fn new(client: GaunRootsClient, session: Rc<S>, navigator: Rc<V>, notifier: N) -> Self {
        Self {
            client,
            session,
            navigator,
            notifier,
        }
    }

    /// Logs in or registers, stores the session and opens the profile page.
    ///
    /// # Errors
    /// Returns [`AuthError`] when the form is invalid, the backend rejects the
    /// call, its response is not a usable account or the session cannot be
    /// stored. The user has already been notified and nothing was stored.
    pub async fn submit(
        &self,
        mode: AuthMode,
        form: &AuthForm,
    ) -> Result<SessionRecord, AuthError> {
        let record = match self.authenticate(mode, form).await {
            Ok(record) => record,
            Err(err) => {
                self.notifier.notify(&Notification::error(err.user_message()));
                return Err(err);
            }
        };

        info!(user = %record.name, kind = %record.kind, "session stored");
        self.navigator.navigate(Destination::profile_for(&record));
        Ok(record)
    }

    async fn authenticate(&self, mode: AuthMode, form: &AuthForm) -> Result<SessionRecord, AuthError> {
        let credentials = build_credentials(form)?;
        debug!(?mode, name = %credentials.name, "submitting account form");

        let response = match mode {
            AuthMode::Login => {
                self.notifier.notify(&Notification::info(LOGGING_IN_MESSAGE));
                self.client.login(&credentials).await?
            }
            AuthMode::Register => {
                self.notifier.notify(&Notification::info(REGISTERING_MESSAGE));
                self.client.register(&credentials).await?
            }
        };

        let record = SessionRecord::from_value(response)?;
        self.session.set_current_user(&record)?;
        Ok(record)
    }
}
