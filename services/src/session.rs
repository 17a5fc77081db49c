//! Who is logged in right now.
//!
//! The gate lives in process memory only. A fresh process always starts
//! [`SessionState::Anonymous`]; the role label persisted by the repository is
//! never used to restore a session.

use serde::Serialize;
use std::fmt;
use util::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Staff,
}

impl Role {
    /// Label stored as the informational "last role".
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("Student"),
            Role::Staff => f.write_str("Staff"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum SessionState {
    Anonymous,
    Student { username: String },
    Staff { username: String },
}

impl SessionState {
    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Student { .. } => Some(Role::Student),
            SessionState::Staff { .. } => Some(Role::Staff),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Student { username } | SessionState::Staff { username } => {
                Some(username)
            }
        }
    }
}

/// Decides which role, if any, a username/password pair belongs to.
///
/// Implementations must not reveal whether the username or the password was
/// wrong.
pub trait CredentialCheck: Send {
    fn check(&self, username: &str, password: &str) -> Option<Role>;
}

/// The two fixed demo accounts, compared by plain string equality.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    pub student: (String, String),
    pub staff: (String, String),
}

impl StaticCredentials {
    pub fn from_config() -> Self {
        Self {
            student: config::student_credentials(),
            staff: config::staff_credentials(),
        }
    }
}

impl CredentialCheck for StaticCredentials {
    fn check(&self, username: &str, password: &str) -> Option<Role> {
        if (username, password) == (self.student.0.as_str(), self.student.1.as_str()) {
            Some(Role::Student)
        } else if (username, password) == (self.staff.0.as_str(), self.staff.1.as_str()) {
            Some(Role::Staff)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Already logged in")]
    AlreadyAuthenticated,
}

pub struct SessionGate {
    state: SessionState,
    credentials: Box<dyn CredentialCheck>,
}

impl SessionGate {
    pub fn new(credentials: impl CredentialCheck + 'static) -> Self {
        Self {
            state: SessionState::Anonymous,
            credentials: Box::new(credentials),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// `Anonymous -> Student | Staff`. Username and password are trimmed
    /// before the check. On failure the state is unchanged.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Role, LoginError> {
        if self.state != SessionState::Anonymous {
            return Err(LoginError::AlreadyAuthenticated);
        }

        let (username, password) = (username.trim(), password.trim());
        let role = self
            .credentials
            .check(username, password)
            .ok_or(LoginError::InvalidCredentials)?;

        let username = username.to_owned();
        self.state = match role {
            Role::Student => SessionState::Student { username },
            Role::Staff => SessionState::Staff { username },
        };
        Ok(role)
    }

    /// Back to `Anonymous`. Returns the role that was logged out, if any.
    pub fn logout(&mut self) -> Option<Role> {
        let previous = self.state.role();
        self.state = SessionState::Anonymous;
        previous
    }
}
