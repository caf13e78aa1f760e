//! Session store
//!
//! Holds the authenticated identity for the lifetime of one console
//! context. Construct it empty, fill it after login, clear it on logout.

use shared::models::{Company, Employee, User};

/// Authenticated identity: user, employee and company
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
    employee: Option<Employee>,
    company: Option<Company>,
}

impl Session {
    /// Creates an empty (anonymous) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the identity after a successful login.
    pub fn set_auth(&mut self, user: User, employee: Option<Employee>, company: Option<Company>) {
        tracing::debug!(user = %user.username, "session identity set");
        self.user = Some(user);
        self.employee = employee;
        self.company = company;
    }

    /// Resets all three parts of the identity.
    pub fn clear_auth(&mut self) {
        self.user = None;
        self.employee = None;
        self.company = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn employee(&self) -> Option<&Employee> {
        self.employee.as_ref()
    }

    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }
}
