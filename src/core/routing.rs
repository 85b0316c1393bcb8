//! Role-based routing after authentication
//!
//! The flow controller never decides where a signed-in user lands; it
//! hands the resolved role to this mapping. One canonical scheme:
//! professors (the backend may also say "teacher") land on the
//! instructor dashboard, everyone else on the student home.

/// Landing destination after a successful auth outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Instructor,
    Student,
}

impl Destination {
    /// Canonical path string, used by logs and the CLI
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Instructor => "/teacher",
            Destination::Student => "/student",
        }
    }
}

/// Map a collaborator-resolved role onto a landing destination
pub fn destination_for_role(role: &str) -> Destination {
    match role.trim().to_ascii_lowercase().as_str() {
        "professor" | "teacher" => Destination::Instructor,
        _ => Destination::Student,
    }
}
