//! Session state and login form
//!
//! The session is a single authenticated flag owned by the application. The
//! login form checks its fields against the demo credentials and flips the
//! flag on success.

use thiserror::Error;
use tracing::info;

/// Username accepted by the login form
pub const DEMO_USERNAME: &str = "admin";

/// Password accepted by the login form
pub const DEMO_PASSWORD: &str = "password";

/// Minimum password length suggested while typing
pub const MIN_PASSWORD_LEN: usize = 6;

/// Errors shown on the login form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Username or password is blank
    #[error("Both fields are required")]
    MissingFields,

    /// Fields are filled in but do not match the demo credentials
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Whether the user is logged in
///
/// Starts logged out; there is no identity, token or expiry.
#[derive(Debug, Clone, Default)]
pub struct Session {
    authenticated: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn login(&mut self) {
        self.authenticated = true;
        info!("session logged in");
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        info!("session logged out");
    }
}

/// Which login field receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Contents of the login screen
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// Error from the last submission, cleared on dismiss
    pub error: Option<LoginError>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a character to the focused field
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    /// Removes the last character of the focused field
    pub fn pop_char(&mut self) {
        match self.focus {
            LoginField::Username => self.username.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    /// Moves focus to the other field
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Inline hint for a password that is too short
    pub fn password_hint(&self) -> Option<&'static str> {
        let len = self.password.chars().count();
        (len > 0 && len < MIN_PASSWORD_LEN).then_some("Password must be at least 6 characters long")
    }

    /// Checks the fields against the demo credentials
    pub fn validate(&self) -> Result<(), LoginError> {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(LoginError::MissingFields);
        }
        if self.username != DEMO_USERNAME || self.password != DEMO_PASSWORD {
            return Err(LoginError::InvalidCredentials);
        }
        Ok(())
    }

    /// Validates the form and logs `session` in on success
    ///
    /// On failure the error is kept on the form and the session is untouched.
    pub fn submit(&mut self, session: &mut Session) -> Result<(), LoginError> {
        match self.validate() {
            Ok(()) => {
                self.error = None;
                session.login();
                Ok(())
            }
            Err(e) => {
                info!(error = %e, "login rejected");
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }
}
