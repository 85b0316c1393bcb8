//! Signed-in session state
//!
//! Created from a successful auth outcome and dropped on sign-out.
//! Nothing here is persisted; credentials are discarded the moment the
//! collaborator accepts them.

use chrono::{DateTime, Local};

use crate::core::routing::{destination_for_role, Destination};

/// The signed-in user for the lifetime of this run
#[derive(Debug, Clone)]
pub struct Session {
    /// Normalized email the user signed in with
    pub email: String,
    /// Display name, when registration supplied one
    pub display_name: Option<String>,
    /// Role string as resolved by the auth collaborator
    pub role: String,
    /// Landing destination derived from the role
    pub destination: Destination,
    /// When the session started
    pub signed_in_at: DateTime<Local>,
}

impl Session {
    pub fn new(email: String, display_name: Option<String>, role: String) -> Self {
        let destination = destination_for_role(&role);
        Self {
            email,
            display_name,
            role,
            destination,
            signed_in_at: Local::now(),
        }
    }

    /// Short label for the header bar
    pub fn who(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_follows_role() {
        let s = Session::new("prof@asu.edu".into(), None, "teacher".into());
        assert_eq!(s.destination, Destination::Instructor);

        let s = Session::new("sparky@asu.edu".into(), Some("Sparky".into()), "student".into());
        assert_eq!(s.destination, Destination::Student);
        assert_eq!(s.who(), "Sparky");
    }
}
