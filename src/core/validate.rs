//! Local credential validation
//!
//! Every submit runs these checks before anything is sent to the auth
//! collaborator. Each failure maps to a distinct user-visible message;
//! recovery is always the same: edit the form and resubmit.

use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::SecretString;
use thiserror::Error;

use crate::core::flow::{Journey, Role, Track};

/// Local part of an institutional address, before the '@'
static EMAIL_LOCAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+$").unwrap());

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 4;

/// A validation failure, surfaced inline next to the form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter email and password.")]
    MissingCredentials,

    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Please use your @{0} email address.")]
    InvalidEmail(String),

    #[error("Password must be at least 4 characters long.")]
    PasswordTooShort,

    #[error("Invalid professor key.")]
    InvalidProfessorKey,

    #[error("Please select Computer Science or Cybersecurity.")]
    MissingJourney,

    #[error("Please select a track.")]
    MissingTrack,
}

/// Values the forms are validated against, taken from [`crate::core::Config`]
#[derive(Debug, Clone)]
pub struct ValidationPolicy {
    /// Key professors must supply to create an account
    pub professor_key: String,
    /// Accepted email domain, without the '@'
    pub email_domain: String,
}

impl ValidationPolicy {
    pub fn from_config(config: &crate::core::Config) -> Self {
        Self {
            professor_key: config.professor_key.clone(),
            email_domain: config.email_domain.clone(),
        }
    }
}

/// Role-specific registration extras forwarded to the collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleExtras {
    Professor,
    Student { journey: Journey, track: Track },
}

/// A validated, normalized login request
#[derive(Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
    pub role: Role,
}

/// A validated, normalized registration request
#[derive(Debug)]
pub struct RegisterRequest {
    pub display_name: String,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
    pub extras: RoleExtras,
}

/// What a successful validation pass produced
#[derive(Debug)]
pub enum AuthRequest {
    Login(LoginRequest),
    Register(RegisterRequest),
}

/// Trim and lowercase an address before comparison or transmission
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_email(email: &str, domain: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidEmail(domain.to_string());

    let (local, addr_domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || !EMAIL_LOCAL_RE.is_match(local) {
        return Err(invalid());
    }
    if !addr_domain.eq_ignore_ascii_case(domain) {
        return Err(invalid());
    }
    Ok(())
}

fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Validate a sign-in form
pub fn validate_sign_in(
    email: &str,
    password: &str,
    role: Role,
    policy: &ValidationPolicy,
) -> Result<LoginRequest, ValidationError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    check_email(&email, &policy.email_domain)?;
    check_password(password)?;

    Ok(LoginRequest {
        email,
        password: SecretString::from(password.to_string()),
        role,
    })
}

/// Validate the professor sign-up form
///
/// The key is checked first, before anything else, so a wrong key is
/// reported even on an otherwise empty form.
pub fn validate_professor_sign_up(
    professor_key: &str,
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
    policy: &ValidationPolicy,
) -> Result<RegisterRequest, ValidationError> {
    if professor_key != policy.professor_key {
        return Err(ValidationError::InvalidProfessorKey);
    }

    let name = name.trim();
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() || confirm_password.is_empty() || name.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    check_email(&email, &policy.email_domain)?;
    check_password(password)?;

    Ok(RegisterRequest {
        display_name: name.to_string(),
        email,
        password: SecretString::from(password.to_string()),
        role: Role::Professor,
        extras: RoleExtras::Professor,
    })
}

/// Validate the student sign-up form
pub fn validate_student_sign_up(
    journey: Option<Journey>,
    track: Option<Track>,
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
    policy: &ValidationPolicy,
) -> Result<RegisterRequest, ValidationError> {
    let journey = journey.ok_or(ValidationError::MissingJourney)?;
    let track = track.ok_or(ValidationError::MissingTrack)?;

    let name = name.trim();
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() || confirm_password.is_empty() || name.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    check_email(&email, &policy.email_domain)?;
    check_password(password)?;

    Ok(RegisterRequest {
        display_name: name.to_string(),
        email,
        password: SecretString::from(password.to_string()),
        role: Role::Student,
        extras: RoleExtras::Student { journey, track },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ValidationPolicy {
        ValidationPolicy {
            professor_key: "PROF2024".to_string(),
            email_domain: "asu.edu".to_string(),
        }
    }

    #[test]
    fn test_sign_in_requires_both_fields() {
        let err = validate_sign_in("", "hunter2", Role::Student, &policy()).unwrap_err();
        assert_eq!(err, ValidationError::MissingCredentials);

        let err = validate_sign_in("sparky@asu.edu", "", Role::Student, &policy()).unwrap_err();
        assert_eq!(err, ValidationError::MissingCredentials);
    }

    #[test]
    fn test_sign_in_rejects_foreign_domain() {
        let err =
            validate_sign_in("sparky@gmail.com", "hunter2", Role::Student, &policy()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail("asu.edu".to_string()));
    }

    #[test]
    fn test_sign_in_rejects_malformed_local_part() {
        for email in ["@asu.edu", "two words@asu.edu", "a@b@asu.edu"] {
            let err = validate_sign_in(email, "hunter2", Role::Student, &policy()).unwrap_err();
            assert_eq!(err, ValidationError::InvalidEmail("asu.edu".to_string()));
        }
    }

    #[test]
    fn test_sign_in_rejects_short_password() {
        let err =
            validate_sign_in("sparky@asu.edu", "abc", Role::Student, &policy()).unwrap_err();
        assert_eq!(err, ValidationError::PasswordTooShort);
    }

    #[test]
    fn test_sign_in_normalizes_email() {
        let req =
            validate_sign_in("  Sparky@ASU.EDU ", "hunter2", Role::Professor, &policy()).unwrap();
        assert_eq!(req.email, "sparky@asu.edu");
        assert_eq!(req.role, Role::Professor);
    }

    #[test]
    fn test_professor_key_checked_before_anything_else() {
        let err = validate_professor_sign_up("WRONG", "", "", "", "", &policy()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidProfessorKey);
    }

    #[test]
    fn test_professor_sign_up_password_mismatch() {
        let err = validate_professor_sign_up(
            "PROF2024",
            "Ada Lovelace",
            "ada@asu.edu",
            "hunter2",
            "hunter3",
            &policy(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::PasswordMismatch);
    }

    #[test]
    fn test_professor_sign_up_happy_path() {
        let req = validate_professor_sign_up(
            "PROF2024",
            " Ada Lovelace ",
            "ada@asu.edu",
            "hunter2",
            "hunter2",
            &policy(),
        )
        .unwrap();
        assert_eq!(req.display_name, "Ada Lovelace");
        assert_eq!(req.role, Role::Professor);
        assert_eq!(req.extras, RoleExtras::Professor);
    }

    #[test]
    fn test_student_sign_up_requires_journey_then_track() {
        let err = validate_student_sign_up(
            None,
            None,
            "Sparky",
            "sparky@asu.edu",
            "hunter2",
            "hunter2",
            &policy(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingJourney);

        let err = validate_student_sign_up(
            Some(Journey::ComputerScience),
            None,
            "Sparky",
            "sparky@asu.edu",
            "hunter2",
            "hunter2",
            &policy(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingTrack);
    }

    #[test]
    fn test_student_sign_up_happy_path() {
        let req = validate_student_sign_up(
            Some(Journey::Cybersecurity),
            Some(Track::X86),
            "Sparky",
            "sparky@asu.edu",
            "hunter2",
            "hunter2",
            &policy(),
        )
        .unwrap();
        assert_eq!(req.role, Role::Student);
        assert_eq!(
            req.extras,
            RoleExtras::Student {
                journey: Journey::Cybersecurity,
                track: Track::X86,
            }
        );
    }

    #[test]
    fn test_student_sign_up_missing_fields() {
        let err = validate_student_sign_up(
            Some(Journey::ComputerScience),
            Some(Track::Mips),
            "",
            "sparky@asu.edu",
            "hunter2",
            "hunter2",
            &policy(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingFields);
    }
}
