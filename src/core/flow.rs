//! Multi-step auth flow state machine
//!
//! Holds the current screen, role/journey/track selections and form
//! fields for the sign-in/sign-up experience. Transitions form a
//! directed graph rooted at [`FlowScreen::Welcome`]; every screen has a
//! back transition and selections are cleared whenever the user
//! branches away from the sub-flow that set them. The flow never talks
//! to the network itself: [`AuthFlow::build_submit`] only produces a
//! validated request for the caller to dispatch.

use crate::core::validate::{
    self, AuthRequest, ValidationError, ValidationPolicy,
};

/// Account role, selected before a role-specific form is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Professor,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Professor => "Professor",
        }
    }

    /// Wire value sent to the auth collaborator
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professor => "professor",
        }
    }
}

/// Student degree journey, picked during sign-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Journey {
    ComputerScience,
    Cybersecurity,
}

impl Journey {
    pub fn label(&self) -> &'static str {
        match self {
            Journey::ComputerScience => "Computer Science",
            Journey::Cybersecurity => "Cybersecurity",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Journey::ComputerScience => "cs",
            Journey::Cybersecurity => "cybersecurity",
        }
    }

    /// Tracks offered for this journey
    pub fn tracks(&self) -> &'static [Track] {
        match self {
            Journey::ComputerScience => &[Track::Mips, Track::RiscV],
            Journey::Cybersecurity => &[Track::X86],
        }
    }
}

/// Instruction-set track within a journey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Mips,
    RiscV,
    X86,
}

impl Track {
    pub fn label(&self) -> &'static str {
        match self {
            Track::Mips => "MIPS",
            Track::RiscV => "RISC-V",
            Track::X86 => "x86",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Track::Mips => "mips",
            Track::RiscV => "riscv",
            Track::X86 => "x86",
        }
    }
}

/// One step of the auth flow; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowScreen {
    /// Entry point: Sign Up / Sign In choice
    Welcome,
    /// Choose Student / Professor before signing in
    SignInRole,
    /// Role-specific sign-in form
    SignInForm(Role),
    /// Choose Student / Professor before creating an account
    SignUpRole,
    /// Professor sign-up form (with key)
    SignUpProfessorForm,
    /// Pick Computer Science / Cybersecurity
    SignUpStudentJourney,
    /// Pick a track within the chosen journey
    SignUpStudentTrack,
    /// Student sign-up form
    SignUpStudentForm,
}

impl FlowScreen {
    /// Whether this screen carries editable form fields
    pub fn is_form(&self) -> bool {
        matches!(
            self,
            FlowScreen::SignInForm(_)
                | FlowScreen::SignUpProfessorForm
                | FlowScreen::SignUpStudentForm
        )
    }
}

/// State of the multi-step sign-in/sign-up flow
#[derive(Debug)]
pub struct AuthFlow {
    /// Currently displayed screen
    pub screen: FlowScreen,
    /// Selected role, set by the role-choice screens
    pub role: Option<Role>,
    /// Selected student journey
    pub journey: Option<Journey>,
    /// Selected student track
    pub track: Option<Track>,
    /// Display name field (sign-up)
    pub name: String,
    /// Email field
    pub email: String,
    /// Password field
    pub password: String,
    /// Password confirmation field (sign-up)
    pub confirm_password: String,
    /// Professor key field (professor sign-up)
    pub professor_key: String,
    /// Inline error shown next to the form, cleared on edit
    pub error: Option<String>,
    /// A submission is in flight; inputs are disabled
    pub submitting: bool,
    /// Bumped whenever an in-flight submission is abandoned, so a late
    /// reply can be recognized and dropped
    epoch: u64,
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthFlow {
    pub fn new() -> Self {
        Self {
            screen: FlowScreen::Welcome,
            role: None,
            journey: None,
            track: None,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            professor_key: String::new(),
            error: None,
            submitting: false,
            epoch: 0,
        }
    }

    /// Epoch of the current flow attempt
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True when a reply stamped with `epoch` belongs to the current attempt
    pub fn accepts_epoch(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// Clear form fields and the error; keeps journey/track selections
    fn reset_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.password.clear();
        self.confirm_password.clear();
        self.professor_key.clear();
        self.error = None;
    }

    /// Clear everything: fields, role, journey and track
    fn reset_all(&mut self) {
        self.abandon_submission();
        self.reset_fields();
        self.role = None;
        self.journey = None;
        self.track = None;
    }

    /// Abandon an in-flight submission; its eventual reply is stale
    fn abandon_submission(&mut self) {
        if self.submitting {
            self.submitting = false;
            self.epoch = self.epoch.wrapping_add(1);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Welcome → sign-in role choice (also the cross-link from sign-up)
    pub fn begin_sign_in(&mut self) {
        self.reset_all();
        self.screen = FlowScreen::SignInRole;
    }

    /// Welcome → sign-up role choice (also the cross-link from sign-in)
    pub fn begin_sign_up(&mut self) {
        self.reset_all();
        self.screen = FlowScreen::SignUpRole;
    }

    /// Role picked on the sign-in role screen
    pub fn pick_sign_in_role(&mut self, role: Role) {
        self.reset_all();
        self.role = Some(role);
        self.screen = FlowScreen::SignInForm(role);
    }

    /// Role picked on the sign-up role screen
    pub fn pick_sign_up_role(&mut self, role: Role) {
        self.reset_all();
        self.role = Some(role);
        self.screen = match role {
            Role::Professor => FlowScreen::SignUpProfessorForm,
            Role::Student => FlowScreen::SignUpStudentJourney,
        };
    }

    /// Journey picked during student sign-up; clears any earlier track
    pub fn pick_journey(&mut self, journey: Journey) {
        self.journey = Some(journey);
        self.track = None;
        self.screen = FlowScreen::SignUpStudentTrack;
    }

    /// Track picked during student sign-up
    pub fn pick_track(&mut self, track: Track) {
        debug_assert!(self.journey.is_some());
        self.track = Some(track);
        self.reset_fields();
        self.screen = FlowScreen::SignUpStudentForm;
    }

    /// One step toward the screen's predecessor; no screen is a dead end
    pub fn back(&mut self) {
        self.abandon_submission();
        match self.screen {
            FlowScreen::Welcome => {}
            FlowScreen::SignInRole | FlowScreen::SignUpRole => self.to_welcome(),
            FlowScreen::SignInForm(_) => {
                // "Change" affordance: clears the stale role with the rest
                self.reset_all();
                self.screen = FlowScreen::SignInRole;
            }
            FlowScreen::SignUpProfessorForm => {
                self.reset_all();
                self.screen = FlowScreen::SignUpRole;
            }
            FlowScreen::SignUpStudentJourney => {
                self.reset_all();
                self.screen = FlowScreen::SignUpRole;
            }
            FlowScreen::SignUpStudentTrack => {
                self.track = None;
                self.error = None;
                self.screen = FlowScreen::SignUpStudentJourney;
            }
            FlowScreen::SignUpStudentForm => {
                self.track = None;
                self.reset_fields();
                self.screen = FlowScreen::SignUpStudentTrack;
            }
        }
    }

    /// Always-available return to the entry screen; discards everything
    pub fn to_welcome(&mut self) {
        self.abandon_submission();
        self.reset_all();
        self.screen = FlowScreen::Welcome;
    }

    /// Dismiss the inline error; called whenever a field is edited
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate the current form and produce a request for the auth
    /// collaborator. Returns `None` on screens without a form. On
    /// validation failure the error is NOT stored here; the caller
    /// decides how to surface it.
    pub fn build_submit(
        &self,
        policy: &ValidationPolicy,
    ) -> Option<std::result::Result<AuthRequest, ValidationError>> {
        let result = match self.screen {
            FlowScreen::SignInForm(role) => {
                validate::validate_sign_in(&self.email, &self.password, role, policy)
                    .map(AuthRequest::Login)
            }
            FlowScreen::SignUpProfessorForm => validate::validate_professor_sign_up(
                &self.professor_key,
                &self.name,
                &self.email,
                &self.password,
                &self.confirm_password,
                policy,
            )
            .map(AuthRequest::Register),
            FlowScreen::SignUpStudentForm => validate::validate_student_sign_up(
                self.journey,
                self.track,
                &self.name,
                &self.email,
                &self.password,
                &self.confirm_password,
                policy,
            )
            .map(AuthRequest::Register),
            _ => return None,
        };
        Some(result)
    }

    /// Mark a submission as in flight; refuses while one already is
    pub fn begin_submission(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.error = None;
        self.submitting = true;
        true
    }

    /// Collaborator reported failure: show the reason, keep the fields
    pub fn submission_failed(&mut self, reason: String) {
        self.submitting = false;
        self.error = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// All user actions available on a given screen, as flow mutations
    fn actions_for(screen: FlowScreen) -> Vec<fn(&mut AuthFlow)> {
        let mut actions: Vec<fn(&mut AuthFlow)> = vec![|f| f.back(), |f| f.to_welcome()];
        match screen {
            FlowScreen::Welcome => {
                actions.push(|f| f.begin_sign_in());
                actions.push(|f| f.begin_sign_up());
            }
            FlowScreen::SignInRole => {
                actions.push(|f| f.pick_sign_in_role(Role::Student));
                actions.push(|f| f.pick_sign_in_role(Role::Professor));
                actions.push(|f| f.begin_sign_up());
            }
            FlowScreen::SignUpRole => {
                actions.push(|f| f.pick_sign_up_role(Role::Student));
                actions.push(|f| f.pick_sign_up_role(Role::Professor));
                actions.push(|f| f.begin_sign_in());
            }
            FlowScreen::SignUpStudentJourney => {
                actions.push(|f| f.pick_journey(Journey::ComputerScience));
                actions.push(|f| f.pick_journey(Journey::Cybersecurity));
            }
            FlowScreen::SignUpStudentTrack => {
                actions.push(|f| {
                    if let Some(journey) = f.journey {
                        f.pick_track(journey.tracks()[0]);
                    }
                });
            }
            FlowScreen::SignInForm(_)
            | FlowScreen::SignUpProfessorForm
            | FlowScreen::SignUpStudentForm => {}
        }
        actions
    }

    /// Replay a sequence of actions from a fresh flow
    fn drive(actions: &[fn(&mut AuthFlow)]) -> AuthFlow {
        let mut flow = AuthFlow::new();
        for action in actions {
            action(&mut flow);
        }
        flow
    }

    #[test]
    fn test_every_screen_reachable_from_welcome() {
        // BFS over action sequences
        let mut seen: HashSet<FlowScreen> = HashSet::new();
        let mut frontier: Vec<Vec<fn(&mut AuthFlow)>> = vec![vec![]];
        seen.insert(FlowScreen::Welcome);

        for _ in 0..8 {
            let mut next = Vec::new();
            for path in &frontier {
                let screen = drive(path).screen;
                for action in actions_for(screen) {
                    let mut extended = path.clone();
                    extended.push(action);
                    let reached = drive(&extended).screen;
                    if seen.insert(reached) {
                        next.push(extended);
                    }
                }
            }
            frontier = next;
        }

        let expected = [
            FlowScreen::Welcome,
            FlowScreen::SignInRole,
            FlowScreen::SignInForm(Role::Student),
            FlowScreen::SignInForm(Role::Professor),
            FlowScreen::SignUpRole,
            FlowScreen::SignUpProfessorForm,
            FlowScreen::SignUpStudentJourney,
            FlowScreen::SignUpStudentTrack,
            FlowScreen::SignUpStudentForm,
        ];
        for screen in expected {
            assert!(seen.contains(&screen), "{screen:?} unreachable");
        }
    }

    #[test]
    fn test_no_screen_is_a_dead_end() {
        // From any reachable screen, repeated back() returns to Welcome
        let paths: Vec<Vec<fn(&mut AuthFlow)>> = vec![
            vec![|f| f.begin_sign_in()],
            vec![|f| f.begin_sign_in(), |f| f.pick_sign_in_role(Role::Professor)],
            vec![|f| f.begin_sign_up()],
            vec![|f| f.begin_sign_up(), |f| f.pick_sign_up_role(Role::Professor)],
            vec![|f| f.begin_sign_up(), |f| f.pick_sign_up_role(Role::Student)],
            vec![
                |f| f.begin_sign_up(),
                |f| f.pick_sign_up_role(Role::Student),
                |f| f.pick_journey(Journey::ComputerScience),
            ],
            vec![
                |f| f.begin_sign_up(),
                |f| f.pick_sign_up_role(Role::Student),
                |f| f.pick_journey(Journey::ComputerScience),
                |f| f.pick_track(Track::Mips),
            ],
        ];

        for path in paths {
            let mut flow = drive(&path);
            for _ in 0..6 {
                if flow.screen == FlowScreen::Welcome {
                    break;
                }
                flow.back();
            }
            assert_eq!(flow.screen, FlowScreen::Welcome);
        }
    }

    #[test]
    fn test_to_welcome_clears_everything() {
        let mut flow = AuthFlow::new();
        flow.begin_sign_up();
        flow.pick_sign_up_role(Role::Student);
        flow.pick_journey(Journey::ComputerScience);
        flow.pick_track(Track::RiscV);
        flow.name = "Sparky".to_string();
        flow.email = "sparky@asu.edu".to_string();
        flow.password = "hunter2".to_string();
        flow.confirm_password = "hunter2".to_string();
        flow.error = Some("Passwords do not match.".to_string());

        flow.to_welcome();

        assert_eq!(flow.screen, FlowScreen::Welcome);
        assert_eq!(flow.role, None);
        assert_eq!(flow.journey, None);
        assert_eq!(flow.track, None);
        assert!(flow.name.is_empty());
        assert!(flow.email.is_empty());
        assert!(flow.password.is_empty());
        assert!(flow.confirm_password.is_empty());
        assert!(flow.professor_key.is_empty());
        assert_eq!(flow.error, None);
    }

    #[test]
    fn test_back_from_sign_in_form_clears_stale_role() {
        let mut flow = AuthFlow::new();
        flow.begin_sign_in();
        flow.pick_sign_in_role(Role::Professor);
        assert_eq!(flow.role, Some(Role::Professor));

        flow.back();
        assert_eq!(flow.screen, FlowScreen::SignInRole);
        assert_eq!(flow.role, None);
    }

    #[test]
    fn test_journey_survives_back_from_track_screen() {
        let mut flow = AuthFlow::new();
        flow.begin_sign_up();
        flow.pick_sign_up_role(Role::Student);
        flow.pick_journey(Journey::ComputerScience);
        flow.pick_track(Track::Mips);

        // "Change" on the form clears the track but keeps the journey
        flow.back();
        assert_eq!(flow.screen, FlowScreen::SignUpStudentTrack);
        assert_eq!(flow.journey, Some(Journey::ComputerScience));
        assert_eq!(flow.track, None);

        // Backing out of the track screen keeps the journey too
        flow.back();
        assert_eq!(flow.screen, FlowScreen::SignUpStudentJourney);
        assert_eq!(flow.journey, Some(Journey::ComputerScience));

        // Leaving the student sub-flow entirely clears it
        flow.back();
        assert_eq!(flow.screen, FlowScreen::SignUpRole);
        assert_eq!(flow.journey, None);
    }

    #[test]
    fn test_picking_a_new_journey_clears_the_track() {
        let mut flow = AuthFlow::new();
        flow.begin_sign_up();
        flow.pick_sign_up_role(Role::Student);
        flow.pick_journey(Journey::ComputerScience);
        flow.pick_track(Track::Mips);
        flow.back();
        flow.back();

        flow.pick_journey(Journey::Cybersecurity);
        assert_eq!(flow.track, None);
        assert_eq!(flow.journey, Some(Journey::Cybersecurity));
    }

    #[test]
    fn test_double_submission_refused() {
        let mut flow = AuthFlow::new();
        assert!(flow.begin_submission());
        assert!(!flow.begin_submission());
        flow.submission_failed("Login failed.".to_string());
        assert!(flow.begin_submission());
    }

    #[test]
    fn test_abandoning_a_submission_bumps_the_epoch() {
        let mut flow = AuthFlow::new();
        flow.begin_sign_in();
        flow.pick_sign_in_role(Role::Student);
        let epoch = flow.epoch();
        flow.begin_submission();

        flow.to_welcome();
        assert!(!flow.submitting);
        assert!(!flow.accepts_epoch(epoch));
    }

    #[test]
    fn test_failure_keeps_fields_for_resubmission() {
        let mut flow = AuthFlow::new();
        flow.begin_sign_in();
        flow.pick_sign_in_role(Role::Student);
        flow.email = "sparky@asu.edu".to_string();
        flow.password = "hunter2".to_string();
        flow.begin_submission();

        flow.submission_failed("Unknown credentials.".to_string());
        assert_eq!(flow.error.as_deref(), Some("Unknown credentials."));
        assert_eq!(flow.email, "sparky@asu.edu");
        assert_eq!(flow.password, "hunter2");
        assert_eq!(flow.screen, FlowScreen::SignInForm(Role::Student));
    }

    #[test]
    fn test_build_submit_only_on_form_screens() {
        let policy = ValidationPolicy {
            professor_key: "PROF2024".to_string(),
            email_domain: "asu.edu".to_string(),
        };
        let mut flow = AuthFlow::new();
        assert!(flow.build_submit(&policy).is_none());

        flow.begin_sign_in();
        assert!(flow.build_submit(&policy).is_none());

        flow.pick_sign_in_role(Role::Student);
        assert!(flow.build_submit(&policy).is_some());
    }
}
