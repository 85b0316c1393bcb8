//! Core functionality for lectern
//!
//! This module contains shared business logic including:
//! - The multi-step auth flow state machine
//! - Local credential validation
//! - Role-based routing after authentication
//! - Course module catalog
//! - Application configuration
//! - Signed-in session state

pub mod config;
pub mod flow;
pub mod modules;
pub mod routing;
pub mod session;
pub mod validate;

pub use config::Config;
pub use flow::{AuthFlow, FlowScreen, Journey, Role, Track};
pub use routing::{destination_for_role, Destination};
pub use session::Session;
pub use validate::{AuthRequest, ValidationError, ValidationPolicy};
