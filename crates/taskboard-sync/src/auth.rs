//! Sign-in and Registration
//!
//! Login stores the returned token in the session. Registration checks the
//! password locally before anything is sent.

use std::rc::Rc;

use crate::client::{Api, ResourceClient};
use crate::error::{AuthError, ValidationError};
use crate::in_flight::{InFlight, InFlightGuard};
use crate::models::{Credentials, Registration};
use crate::session::{Session, View};
use crate::state::SharedState;

const MIN_PASSWORD_LEN: usize = 6;
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(ValidationError::PasswordMissingSpecial);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AuthAction {
    Login,
    Register,
}

pub struct Auth<C> {
    api: Api<C>,
    session: Rc<Session>,
    state: SharedState,
    in_flight: InFlight<AuthAction>,
}

impl<C: ResourceClient> Auth<C> {
    pub fn new(client: Rc<C>, session: Rc<Session>, state: SharedState) -> Self {
        Self {
            api: Api::new(client),
            session,
            state,
            in_flight: InFlight::default(),
        }
    }

    /// Exchange credentials for a token; on success the dashboard is next
    pub async fn login(&self, email: &str, password: &str) -> Result<View, AuthError> {
        let _guard = self.begin(AuthAction::Login)?;
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self.api.login(&credentials).await {
            Ok(response) => {
                // drop anything cached for a previous user
                self.state.borrow_mut().reset();
                self.session.init(response.token);
                Ok(View::Dashboard)
            }
            Err(err) => {
                log::warn!("[AUTH] login failed: {}", err);
                Err(AuthError::LoginFailed(err))
            }
        }
    }

    /// Create an account. The user signs in separately afterwards.
    pub async fn register(&self, registration: &Registration) -> Result<(), AuthError> {
        validate_password(&registration.password)?;
        let _guard = self.begin(AuthAction::Register)?;

        match self.api.register(registration).await {
            Ok(()) => {
                self.state
                    .borrow_mut()
                    .notices
                    .success("Registration Successful! Please login.");
                Ok(())
            }
            Err(err) if err.is_rejection() => {
                log::warn!("[AUTH] registration rejected: {}", err);
                Err(AuthError::AccountExists)
            }
            Err(err) => {
                log::warn!("[AUTH] registration failed: {}", err);
                Err(AuthError::RegistrationFailed(err))
            }
        }
    }

    fn begin(&self, action: AuthAction) -> Result<InFlightGuard<'_, AuthAction>, AuthError> {
        self.in_flight.begin(action).ok_or_else(|| {
            log::warn!("[AUTH] {:?} already in progress", action);
            AuthError::Busy
        })
    }
}
