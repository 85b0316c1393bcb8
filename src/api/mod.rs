//! Course platform API module
//!
//! This module provides all collaborator-facing functionality:
//! - Auth service (login / register)
//! - Quiz generation
//! - Analytics data sources (fixture and HTTP)
//! - Shared HTTP client plumbing

pub mod analytics;
pub mod auth;
pub mod client;
pub mod quiz;

pub use analytics::{
    AnalyticsSource, FixtureAnalytics, HttpAnalytics, MissedQuestion, StudentDetail,
    StudentProgress,
};
pub use auth::{AuthService, AuthSuccess, HttpAuthService};
pub use client::ApiClient;
pub use quiz::{Choice, HttpQuizService, Question, Quiz, QuizService};
