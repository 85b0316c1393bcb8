//! Main TUI application state and logic

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::api::analytics::source_from_config;
use crate::api::{
    AnalyticsSource, ApiClient, AuthService, HttpAuthService, HttpQuizService, MissedQuestion,
    Quiz, QuizService, StudentDetail, StudentProgress,
};
use crate::core::config::QUESTION_COUNT_CHOICES;
use crate::core::modules::course_modules;
use crate::core::validate::AuthRequest;
use crate::core::{AuthFlow, Config, Destination, FlowScreen, Journey, Role, Session, ValidationPolicy};
use crate::error::{LecternError, Result};
use crate::tui::event::{is_back_key, is_quit_key, AppEvent, EventHandler};
use crate::tui::ui;

/// Message type for async operation results
#[derive(Debug)]
pub enum AsyncMessage {
    /// Auth collaborator accepted the submission
    AuthSucceeded {
        /// Flow attempt this reply belongs to
        epoch: u64,
        /// Role as resolved by the collaborator
        role: String,
        email: String,
        display_name: Option<String>,
    },
    /// Auth collaborator rejected the submission
    AuthFailed { epoch: u64, reason: String },
    /// Roster and most-missed questions loaded
    DashboardLoaded {
        roster: Vec<StudentProgress>,
        missed: Vec<MissedQuestion>,
    },
    /// Dashboard load failed
    DashboardError(String),
    /// Student detail loaded
    StudentDetailLoaded(Box<StudentDetail>),
    /// Student id unknown to the analytics source
    StudentDetailMissing(String),
    /// Student detail load failed
    StudentDetailError(String),
    /// Quiz generated successfully
    QuizGenerated(Box<Quiz>),
    /// Quiz generation failed
    QuizError(String),
}

/// Current screen in the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The multi-step sign-in/sign-up flow; the active step lives in
    /// [`AuthFlow::screen`]
    Auth,
    /// Student landing: module picker and quiz setup
    StudentHome,
    /// Taking a generated quiz
    QuizTake,
    /// Instructor landing: roster and most-missed questions
    InstructorDashboard,
    /// Detail report for one student
    StudentDetail(String),
}

/// List selection state
#[derive(Debug, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total items in the list
    pub total: usize,
}

impl ListState {
    pub fn new(total: usize) -> Self {
        Self { selected: 0, total }
    }

    pub fn next(&mut self) {
        if self.total > 0 {
            self.selected = (self.selected + 1) % self.total;
        }
    }

    pub fn previous(&mut self) {
        if self.total > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.total - 1);
        }
    }
}

/// Main TUI application
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current screen
    pub screen: Screen,
    /// The auth flow state machine
    pub flow: AuthFlow,
    /// Focused field index on flow form screens
    pub form_focus: usize,
    /// Selection on flow choice screens (welcome, roles, journey, track)
    pub choice_selection: ListState,
    /// Signed-in session, when authenticated
    pub session: Option<Session>,
    /// Status message to display
    pub status_message: Option<String>,
    /// Whether to show the help overlay
    pub show_help: bool,
    /// Tick counter for spinner animation
    pub tick_counter: u64,

    /// Validation policy from the configuration
    policy: ValidationPolicy,

    // ─────────────────────────────────────────────────────────────────────────
    // Collaborators
    // ─────────────────────────────────────────────────────────────────────────
    auth_service: Arc<dyn AuthService>,
    quiz_service: Arc<dyn QuizService>,
    analytics: Arc<dyn AnalyticsSource>,

    // ─────────────────────────────────────────────────────────────────────────
    // Async communication
    // ─────────────────────────────────────────────────────────────────────────
    /// Sender for async messages (cloned into tasks)
    pub async_tx: mpsc::Sender<AsyncMessage>,
    /// Receiver for async messages
    pub async_rx: mpsc::Receiver<AsyncMessage>,

    // ─────────────────────────────────────────────────────────────────────────
    // Quiz setup (student home)
    // ─────────────────────────────────────────────────────────────────────────
    /// Module picker selection
    pub module_selection: ListState,
    /// Index into [`QUESTION_COUNT_CHOICES`]
    pub count_index: usize,
    /// Whether a quiz is being generated
    pub quiz_loading: bool,
    /// Error from the last generation attempt
    pub quiz_error: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Quiz taking
    // ─────────────────────────────────────────────────────────────────────────
    /// The generated quiz being taken
    pub quiz: Option<Quiz>,
    /// Index of the current question
    pub quiz_index: usize,
    /// Choice selection within the current question
    pub quiz_choice: ListState,
    /// Locked-in answer for the current question
    pub quiz_answer: Option<usize>,
    /// Questions answered correctly so far
    pub quiz_score: usize,
    /// All questions answered; summary shown
    pub quiz_finished: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Instructor dashboard
    // ─────────────────────────────────────────────────────────────────────────
    /// Student progress roster
    pub roster: Vec<StudentProgress>,
    /// Most-missed questions
    pub missed: Vec<MissedQuestion>,
    /// Whether dashboard data is loading
    pub dashboard_loading: bool,
    /// Whether we've attempted to fetch dashboard data
    pub dashboard_fetched: bool,
    /// Error message if the fetch failed
    pub dashboard_error: Option<String>,
    /// Roster row selection
    pub roster_selection: ListState,
    /// When the dashboard data was last refreshed
    pub refreshed_at: Option<DateTime<Local>>,

    // ─────────────────────────────────────────────────────────────────────────
    // Student detail
    // ─────────────────────────────────────────────────────────────────────────
    /// Loaded detail for the open student
    pub detail: Option<StudentDetail>,
    /// Whether the detail is loading
    pub detail_loading: bool,
    /// Set when the id was not found
    pub detail_missing: Option<String>,
    /// Error message if the detail fetch failed
    pub detail_error: Option<String>,
}

impl App {
    /// Create the app with HTTP collaborators built from the configuration
    pub fn new(config: &Config) -> Result<Self> {
        let auth_service: Arc<dyn AuthService> =
            Arc::new(HttpAuthService::new(ApiClient::new(&config.api_base_url)?));
        let quiz_service: Arc<dyn QuizService> =
            Arc::new(HttpQuizService::new(ApiClient::new(&config.api_base_url)?));
        let analytics = source_from_config(config)?;

        let mut app = Self::with_services(
            ValidationPolicy::from_config(config),
            auth_service,
            quiz_service,
            analytics,
        );
        app.count_index = QUESTION_COUNT_CHOICES
            .iter()
            .position(|&c| c == config.default_question_count)
            .unwrap_or(1);
        Ok(app)
    }

    /// Create the app with injected collaborators
    pub fn with_services(
        policy: ValidationPolicy,
        auth_service: Arc<dyn AuthService>,
        quiz_service: Arc<dyn QuizService>,
        analytics: Arc<dyn AnalyticsSource>,
    ) -> Self {
        let (async_tx, async_rx) = mpsc::channel(32);

        Self {
            running: true,
            screen: Screen::Auth,
            flow: AuthFlow::new(),
            form_focus: 0,
            choice_selection: ListState::new(2),
            session: None,
            status_message: None,
            show_help: false,
            tick_counter: 0,

            policy,

            auth_service,
            quiz_service,
            analytics,

            async_tx,
            async_rx,

            module_selection: ListState::new(course_modules().len()),
            count_index: 1,
            quiz_loading: false,
            quiz_error: None,

            quiz: None,
            quiz_index: 0,
            quiz_choice: ListState::default(),
            quiz_answer: None,
            quiz_score: 0,
            quiz_finished: false,

            roster: Vec::new(),
            missed: Vec::new(),
            dashboard_loading: false,
            dashboard_fetched: false,
            dashboard_error: None,
            roster_selection: ListState::default(),
            refreshed_at: None,

            detail: None,
            detail_loading: false,
            detail_missing: None,
            detail_error: None,
        }
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| LecternError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| LecternError::Terminal(e.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| LecternError::Terminal(e.to_string()))?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| LecternError::Terminal(e.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| LecternError::Terminal(e.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|e| LecternError::Terminal(e.to_string()))?;
        Ok(())
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let mut events = EventHandler::new(Duration::from_millis(250));

        // Main event loop
        while self.running {
            // Draw the UI
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|e| LecternError::Terminal(e.to_string()))?;

            // Check for async messages (non-blocking)
            while let Ok(msg) = self.async_rx.try_recv() {
                self.handle_async_message(msg);
            }

            // Handle events
            if let Some(event) = events.next().await {
                match event {
                    AppEvent::Key(key) => self.handle_key_event(key),
                    AppEvent::Tick => {
                        self.tick_counter = self.tick_counter.wrapping_add(1);
                    }
                }
            }
        }

        Self::restore_terminal(&mut terminal)?;
        Ok(())
    }

    fn quit(&mut self) {
        self.running = false;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Async message handling
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle async message from background tasks
    pub fn handle_async_message(&mut self, msg: AsyncMessage) {
        match msg {
            AsyncMessage::AuthSucceeded {
                epoch,
                role,
                email,
                display_name,
            } => {
                // A reply for an abandoned attempt must not touch state
                if !self.flow.submitting || !self.flow.accepts_epoch(epoch) {
                    tracing::debug!(epoch, "dropping stale auth reply");
                    return;
                }

                let session = Session::new(email, display_name, role);
                let destination = session.destination;
                self.status_message = Some(format!("Signed in as {}", session.who()));
                self.session = Some(session);

                // Credentials are discarded the moment they are accepted
                self.flow.to_welcome();
                self.sync_flow_widgets();

                match destination {
                    Destination::Instructor => {
                        self.screen = Screen::InstructorDashboard;
                        self.fetch_dashboard();
                    }
                    Destination::Student => {
                        self.screen = Screen::StudentHome;
                        self.module_selection = ListState::new(course_modules().len());
                    }
                }
            }
            AsyncMessage::AuthFailed { epoch, reason } => {
                if !self.flow.submitting || !self.flow.accepts_epoch(epoch) {
                    tracing::debug!(epoch, "dropping stale auth failure");
                    return;
                }
                // Reason shown verbatim next to the form; fields preserved
                self.flow.submission_failed(reason);
            }
            AsyncMessage::DashboardLoaded { roster, missed } => {
                if !self.dashboard_loading {
                    return;
                }
                self.dashboard_loading = false;
                self.dashboard_fetched = true;
                self.dashboard_error = None;
                self.roster_selection = ListState::new(roster.len());
                self.roster = roster;
                self.missed = missed;
                self.refreshed_at = Some(Local::now());
                self.status_message = Some(format!("Loaded {} students", self.roster.len()));
            }
            AsyncMessage::DashboardError(err) => {
                if !self.dashboard_loading {
                    return;
                }
                self.dashboard_loading = false;
                self.dashboard_fetched = true;
                self.dashboard_error = Some(err.clone());
                self.status_message = Some(format!("Error: {}", err));
            }
            AsyncMessage::StudentDetailLoaded(detail) => {
                if !self.detail_loading {
                    return;
                }
                self.detail_loading = false;
                self.detail = Some(*detail);
            }
            AsyncMessage::StudentDetailMissing(id) => {
                if !self.detail_loading {
                    return;
                }
                self.detail_loading = false;
                self.detail_missing = Some(id);
            }
            AsyncMessage::StudentDetailError(err) => {
                if !self.detail_loading {
                    return;
                }
                self.detail_loading = false;
                self.detail_error = Some(err.clone());
                self.status_message = Some(format!("Error: {}", err));
            }
            AsyncMessage::QuizGenerated(quiz) => {
                if !self.quiz_loading {
                    return;
                }
                self.quiz_loading = false;
                self.quiz_error = None;
                self.quiz_index = 0;
                self.quiz_choice = ListState::new(quiz.questions.first().map_or(0, |q| q.choices.len()));
                self.quiz_answer = None;
                self.quiz_score = 0;
                self.quiz_finished = quiz.questions.is_empty();
                self.status_message = Some(format!("{} questions ready", quiz.questions.len()));
                self.quiz = Some(*quiz);
                self.screen = Screen::QuizTake;
            }
            AsyncMessage::QuizError(err) => {
                if !self.quiz_loading {
                    return;
                }
                self.quiz_loading = false;
                self.quiz_error = Some(err);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Spawned operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate the current form and, when it passes, delegate to the
    /// auth collaborator in a background task
    pub fn submit_auth(&mut self) {
        if self.flow.submitting {
            return; // One submission at a time
        }

        let Some(validated) = self.flow.build_submit(&self.policy) else {
            return;
        };

        let request = match validated {
            Err(e) => {
                // Local failure: surfaced inline, no collaborator call
                self.flow.error = Some(e.to_string());
                return;
            }
            Ok(request) => request,
        };

        self.flow.begin_submission();
        let epoch = self.flow.epoch();
        let service = Arc::clone(&self.auth_service);
        let tx = self.async_tx.clone();

        tokio::spawn(async move {
            let (email, display_name) = match &request {
                AuthRequest::Login(r) => (r.email.clone(), None),
                AuthRequest::Register(r) => (r.email.clone(), Some(r.display_name.clone())),
            };

            let result = match &request {
                AuthRequest::Login(r) => service.login(r).await,
                AuthRequest::Register(r) => service.register(r).await,
            };

            let msg = match result {
                Ok(success) => AsyncMessage::AuthSucceeded {
                    epoch,
                    role: success.role,
                    email,
                    display_name,
                },
                Err(e) => AsyncMessage::AuthFailed {
                    epoch,
                    reason: first_line(&e.to_string()),
                },
            };
            let _ = tx.send(msg).await;
        });
    }

    /// Spawn a task to fetch roster and most-missed questions
    pub fn fetch_dashboard(&mut self) {
        if self.dashboard_loading {
            return;
        }

        self.dashboard_loading = true;
        self.dashboard_error = None;
        self.status_message = Some("Loading dashboard...".to_string());

        let analytics = Arc::clone(&self.analytics);
        let tx = self.async_tx.clone();

        tokio::spawn(async move {
            let result = async {
                let roster = analytics.student_progress().await?;
                let missed = analytics.most_missed().await?;
                Ok::<_, LecternError>((roster, missed))
            }
            .await;

            let msg = match result {
                Ok((roster, missed)) => AsyncMessage::DashboardLoaded { roster, missed },
                Err(e) => AsyncMessage::DashboardError(first_line(&e.to_string())),
            };
            let _ = tx.send(msg).await;
        });
    }

    /// Open the detail screen for a student and fetch their report
    pub fn open_student_detail(&mut self, id: String) {
        if self.detail_loading {
            return;
        }

        self.screen = Screen::StudentDetail(id.clone());
        self.detail = None;
        self.detail_missing = None;
        self.detail_error = None;
        self.detail_loading = true;

        let analytics = Arc::clone(&self.analytics);
        let tx = self.async_tx.clone();

        tokio::spawn(async move {
            let msg = match analytics.student_detail(&id).await {
                Ok(Some(detail)) => AsyncMessage::StudentDetailLoaded(Box::new(detail)),
                Ok(None) => AsyncMessage::StudentDetailMissing(id),
                Err(e) => AsyncMessage::StudentDetailError(first_line(&e.to_string())),
            };
            let _ = tx.send(msg).await;
        });
    }

    /// Ask the quiz collaborator for questions on the selected module
    pub fn generate_quiz(&mut self) {
        if self.quiz_loading {
            return;
        }

        let module = course_modules()[self.module_selection.selected];
        let count = QUESTION_COUNT_CHOICES[self.count_index];

        self.quiz_loading = true;
        self.quiz_error = None;
        self.status_message = Some(format!("Generating {} questions...", count));

        let service = Arc::clone(&self.quiz_service);
        let tx = self.async_tx.clone();

        tokio::spawn(async move {
            let msg = match service.generate(module.id, count).await {
                Ok(quiz) => AsyncMessage::QuizGenerated(Box::new(quiz)),
                Err(e) => AsyncMessage::QuizError(first_line(&e.to_string())),
            };
            let _ = tx.send(msg).await;
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Sync the choice-screen selection size with the active flow screen
    fn sync_flow_widgets(&mut self) {
        self.form_focus = 0;
        let total = match self.flow.screen {
            FlowScreen::Welcome
            | FlowScreen::SignInRole
            | FlowScreen::SignUpRole
            | FlowScreen::SignUpStudentJourney => 2,
            FlowScreen::SignUpStudentTrack => self
                .flow
                .journey
                .map_or(0, |journey| journey.tracks().len()),
            _ => 0,
        };
        self.choice_selection = ListState::new(total);
    }

    /// Drop the session and return to the flow entry screen
    fn sign_out(&mut self) {
        self.session = None;
        self.flow.to_welcome();
        self.sync_flow_widgets();
        self.screen = Screen::Auth;

        // Per-session data dies with the session
        self.roster.clear();
        self.missed.clear();
        self.dashboard_fetched = false;
        self.dashboard_loading = false;
        self.dashboard_error = None;
        self.refreshed_at = None;
        self.quiz = None;
        self.quiz_loading = false;
        self.quiz_error = None;
        self.detail = None;
        self.detail_loading = false;

        self.status_message = Some("Signed out".to_string());
    }

    /// Whether the current screen is a root (quit rather than back)
    fn at_root(&self) -> bool {
        match &self.screen {
            Screen::Auth => self.flow.screen == FlowScreen::Welcome,
            Screen::StudentHome | Screen::InstructorDashboard => true,
            _ => false,
        }
    }

    fn go_back(&mut self) {
        match &self.screen {
            Screen::Auth => {
                self.flow.back();
                self.sync_flow_widgets();
            }
            Screen::StudentHome | Screen::InstructorDashboard => self.sign_out(),
            Screen::QuizTake => {
                // Abandoning a quiz loses its answers
                self.quiz = None;
                self.screen = Screen::StudentHome;
            }
            Screen::StudentDetail(_) => {
                self.detail = None;
                self.detail_loading = false;
                self.screen = Screen::InstructorDashboard;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key handling
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // If help is shown, any key dismisses it
        if self.show_help {
            self.show_help = false;
            return;
        }

        // Form screens take raw text input; bypass global handlers
        if self.screen == Screen::Auth && self.flow.screen.is_form() {
            self.handle_form_key(key);
            return;
        }

        // Global key handlers
        if key.code == KeyCode::Char('?') {
            self.show_help = true;
            return;
        }

        if is_quit_key(&key) {
            if self.at_root() {
                self.quit();
            } else {
                self.go_back();
            }
            return;
        }

        if is_back_key(&key) {
            self.go_back();
            return;
        }

        // Screen-specific handlers
        match self.screen.clone() {
            Screen::Auth => self.handle_choice_key(key),
            Screen::StudentHome => self.handle_student_home_key(key),
            Screen::QuizTake => self.handle_quiz_key(key),
            Screen::InstructorDashboard => self.handle_dashboard_key(key),
            Screen::StudentDetail(id) => self.handle_detail_key(key, id),
        }
    }

    /// Keys on flow choice screens (welcome, role, journey, track)
    fn handle_choice_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.choice_selection.next(),
            KeyCode::Char('k') | KeyCode::Up => self.choice_selection.previous(),
            KeyCode::Home => {
                self.flow.to_welcome();
                self.sync_flow_widgets();
            }
            KeyCode::Enter => self.activate_choice(),
            // Cross-links between the two sub-flows
            KeyCode::Char('u') if self.flow.screen == FlowScreen::SignInRole => {
                self.flow.begin_sign_up();
                self.sync_flow_widgets();
            }
            KeyCode::Char('i') if self.flow.screen == FlowScreen::SignUpRole => {
                self.flow.begin_sign_in();
                self.sync_flow_widgets();
            }
            _ => {}
        }
    }

    /// Enter pressed on a flow choice screen
    fn activate_choice(&mut self) {
        let selected = self.choice_selection.selected;
        match self.flow.screen {
            FlowScreen::Welcome => {
                if selected == 0 {
                    self.flow.begin_sign_up();
                } else {
                    self.flow.begin_sign_in();
                }
            }
            FlowScreen::SignInRole => {
                let role = if selected == 0 { Role::Student } else { Role::Professor };
                self.flow.pick_sign_in_role(role);
            }
            FlowScreen::SignUpRole => {
                let role = if selected == 0 { Role::Student } else { Role::Professor };
                self.flow.pick_sign_up_role(role);
            }
            FlowScreen::SignUpStudentJourney => {
                let journey = if selected == 0 {
                    Journey::ComputerScience
                } else {
                    Journey::Cybersecurity
                };
                self.flow.pick_journey(journey);
            }
            FlowScreen::SignUpStudentTrack => {
                if let Some(journey) = self.flow.journey {
                    if let Some(&track) = journey.tracks().get(selected) {
                        self.flow.pick_track(track);
                    }
                }
            }
            _ => {}
        }
        self.sync_flow_widgets();
    }

    /// Number of editable fields on the active form screen
    fn form_field_count(&self) -> usize {
        match self.flow.screen {
            FlowScreen::SignInForm(_) => 2,
            FlowScreen::SignUpProfessorForm => 5,
            FlowScreen::SignUpStudentForm => 4,
            _ => 0,
        }
    }

    /// The string behind the focused form field
    fn focused_field_mut(&mut self) -> Option<&mut String> {
        let flow = &mut self.flow;
        match (flow.screen, self.form_focus) {
            (FlowScreen::SignInForm(_), 0) => Some(&mut flow.email),
            (FlowScreen::SignInForm(_), 1) => Some(&mut flow.password),
            (FlowScreen::SignUpProfessorForm, 0) => Some(&mut flow.professor_key),
            (FlowScreen::SignUpProfessorForm, 1) => Some(&mut flow.name),
            (FlowScreen::SignUpProfessorForm, 2) => Some(&mut flow.email),
            (FlowScreen::SignUpProfessorForm, 3) => Some(&mut flow.password),
            (FlowScreen::SignUpProfessorForm, 4) => Some(&mut flow.confirm_password),
            (FlowScreen::SignUpStudentForm, 0) => Some(&mut flow.name),
            (FlowScreen::SignUpStudentForm, 1) => Some(&mut flow.email),
            (FlowScreen::SignUpStudentForm, 2) => Some(&mut flow.password),
            (FlowScreen::SignUpStudentForm, 3) => Some(&mut flow.confirm_password),
            _ => None,
        }
    }

    /// Keys on flow form screens; plain characters are text input
    fn handle_form_key(&mut self, key: KeyEvent) {
        // Quit works even mid-submission
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        // Navigation away abandons an in-flight submission
        if key.code == KeyCode::Esc {
            self.flow.back();
            self.sync_flow_widgets();
            return;
        }
        if key.code == KeyCode::Home {
            self.flow.to_welcome();
            self.sync_flow_widgets();
            return;
        }

        // While in flight the inputs are disabled
        if self.flow.submitting {
            return;
        }

        match key.code {
            // Cross-link: create an account from the sign-in form
            KeyCode::Char('n')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(self.flow.screen, FlowScreen::SignInForm(_)) =>
            {
                self.flow.begin_sign_up();
                self.sync_flow_widgets();
            }
            // Cross-link: sign in instead from the sign-up forms
            KeyCode::Char('l')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(
                        self.flow.screen,
                        FlowScreen::SignUpProfessorForm | FlowScreen::SignUpStudentForm
                    ) =>
            {
                self.flow.begin_sign_in();
                self.sync_flow_widgets();
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form_focus = (self.form_focus + 1) % self.form_field_count().max(1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                let count = self.form_field_count().max(1);
                self.form_focus = self.form_focus.checked_sub(1).unwrap_or(count - 1);
            }
            KeyCode::Enter => self.submit_auth(),
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field_mut() {
                    field.pop();
                }
                // Editing dismisses the inline error
                self.flow.clear_error();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = self.focused_field_mut() {
                    field.push(c);
                }
                self.flow.clear_error();
            }
            _ => {}
        }
    }

    fn handle_student_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.module_selection.next(),
            KeyCode::Char('k') | KeyCode::Up => self.module_selection.previous(),
            KeyCode::Char('h') | KeyCode::Left => {
                self.count_index = self
                    .count_index
                    .checked_sub(1)
                    .unwrap_or(QUESTION_COUNT_CHOICES.len() - 1);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.count_index = (self.count_index + 1) % QUESTION_COUNT_CHOICES.len();
            }
            KeyCode::Enter => self.generate_quiz(),
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) {
        if self.quiz.is_none() {
            return;
        }

        if self.quiz_finished {
            match key.code {
                KeyCode::Enter | KeyCode::Char('g') => {
                    // Back to setup for a new quiz
                    self.quiz = None;
                    self.screen = Screen::StudentHome;
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down if self.quiz_answer.is_none() => {
                self.quiz_choice.next();
            }
            KeyCode::Char('k') | KeyCode::Up if self.quiz_answer.is_none() => {
                self.quiz_choice.previous();
            }
            KeyCode::Enter if self.quiz_answer.is_none() => {
                // Lock the answer and show instant feedback
                let picked = self.quiz_choice.selected;
                let correct = self
                    .quiz
                    .as_ref()
                    .and_then(|quiz| quiz.questions.get(self.quiz_index))
                    .and_then(|question| question.correct_index());
                if correct == Some(picked) {
                    self.quiz_score += 1;
                }
                self.quiz_answer = Some(picked);
            }
            KeyCode::Enter => {
                // Advance to the next question or the summary
                self.quiz_answer = None;
                self.quiz_index += 1;
                let next_choices = self
                    .quiz
                    .as_ref()
                    .and_then(|quiz| quiz.questions.get(self.quiz_index))
                    .map(|question| question.choices.len());
                match next_choices {
                    Some(choices) => self.quiz_choice = ListState::new(choices),
                    None => self.quiz_finished = true,
                }
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.roster_selection.next(),
            KeyCode::Char('k') | KeyCode::Up => self.roster_selection.previous(),
            KeyCode::Enter => {
                if let Some(student) = self.roster.get(self.roster_selection.selected) {
                    let id = student.id.clone();
                    self.open_student_detail(id);
                }
            }
            KeyCode::Char('r') => {
                // Force refresh
                self.dashboard_fetched = false;
                self.fetch_dashboard();
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent, id: String) {
        if key.code == KeyCode::Char('r') {
            self.open_student_detail(id);
        }
    }
}

/// First line of a possibly multi-line error display, for inline banners
fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or(message).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::analytics::{FixtureAnalytics, MockAnalyticsSource};
    use crate::api::auth::{AuthSuccess, MockAuthService};
    use crate::api::quiz::MockQuizService;
    use crate::core::Track;

    fn policy() -> ValidationPolicy {
        ValidationPolicy {
            professor_key: "PROF2024".to_string(),
            email_domain: "asu.edu".to_string(),
        }
    }

    fn app_with_auth(auth: MockAuthService) -> App {
        App::with_services(
            policy(),
            Arc::new(auth),
            Arc::new(MockQuizService::new()),
            Arc::new(FixtureAnalytics::seeded()),
        )
    }

    fn fill_professor_sign_up(app: &mut App, key: &str, password: &str, confirm: &str) {
        app.flow.begin_sign_up();
        app.flow.pick_sign_up_role(Role::Professor);
        app.flow.professor_key = key.to_string();
        app.flow.name = "Ada Lovelace".to_string();
        app.flow.email = "ada@asu.edu".to_string();
        app.flow.password = password.to_string();
        app.flow.confirm_password = confirm.to_string();
    }

    #[tokio::test]
    async fn test_password_mismatch_never_reaches_the_collaborator() {
        // No expectations: any call would panic, and times(0) is
        // verified when the mock drops
        let mut auth = MockAuthService::new();
        auth.expect_login().times(0);
        auth.expect_register().times(0);

        let mut app = app_with_auth(auth);
        fill_professor_sign_up(&mut app, "PROF2024", "hunter2", "hunter3");

        app.submit_auth();

        assert!(!app.flow.submitting);
        assert_eq!(app.flow.error.as_deref(), Some("Passwords do not match."));
        assert_eq!(app.screen, Screen::Auth);
    }

    #[tokio::test]
    async fn test_wrong_professor_key_never_reaches_the_collaborator() {
        let mut auth = MockAuthService::new();
        auth.expect_login().times(0);
        auth.expect_register().times(0);

        let mut app = app_with_auth(auth);
        fill_professor_sign_up(&mut app, "WRONG", "hunter2", "hunter2");

        app.submit_auth();

        assert!(!app.flow.submitting);
        assert_eq!(app.flow.error.as_deref(), Some("Invalid professor key."));
    }

    #[tokio::test]
    async fn test_professor_login_routes_to_instructor_dashboard() {
        let mut auth = MockAuthService::new();
        auth.expect_login()
            .withf(|request| request.email == "prof@asu.edu")
            .returning(|_| {
                Ok(AuthSuccess {
                    role: "professor".to_string(),
                })
            });

        let mut app = app_with_auth(auth);
        app.flow.begin_sign_in();
        app.flow.pick_sign_in_role(Role::Professor);
        app.flow.email = "Prof@ASU.edu".to_string();
        app.flow.password = "hunter2".to_string();

        app.submit_auth();
        assert!(app.flow.submitting);

        let msg = app.async_rx.recv().await.expect("auth reply");
        app.handle_async_message(msg);

        assert_eq!(app.screen, Screen::InstructorDashboard);
        let session = app.session.as_ref().expect("session");
        assert_eq!(session.destination, Destination::Instructor);
        // Credentials were discarded with the flow
        assert!(app.flow.email.is_empty());
        assert!(app.flow.password.is_empty());
    }

    #[tokio::test]
    async fn test_student_registration_routes_to_student_home() {
        let mut auth = MockAuthService::new();
        auth.expect_register().returning(|_| {
            Ok(AuthSuccess {
                role: "student".to_string(),
            })
        });

        let mut app = app_with_auth(auth);
        app.flow.begin_sign_up();
        app.flow.pick_sign_up_role(Role::Student);
        app.flow.pick_journey(Journey::ComputerScience);
        app.flow.pick_track(Track::Mips);
        app.flow.name = "Sparky".to_string();
        app.flow.email = "sparky@asu.edu".to_string();
        app.flow.password = "hunter2".to_string();
        app.flow.confirm_password = "hunter2".to_string();

        app.submit_auth();
        let msg = app.async_rx.recv().await.expect("auth reply");
        app.handle_async_message(msg);

        assert_eq!(app.screen, Screen::StudentHome);
        assert_eq!(
            app.session.as_ref().unwrap().destination,
            Destination::Student
        );
    }

    #[tokio::test]
    async fn test_collaborator_failure_preserves_fields() {
        let mut auth = MockAuthService::new();
        auth.expect_login()
            .returning(|_| Err(LecternError::AuthFailed("Unknown credentials.".to_string())));

        let mut app = app_with_auth(auth);
        app.flow.begin_sign_in();
        app.flow.pick_sign_in_role(Role::Student);
        app.flow.email = "sparky@asu.edu".to_string();
        app.flow.password = "hunter2".to_string();

        app.submit_auth();
        let msg = app.async_rx.recv().await.expect("auth reply");
        app.handle_async_message(msg);

        assert_eq!(app.screen, Screen::Auth);
        assert_eq!(app.flow.error.as_deref(), Some("Unknown credentials."));
        assert_eq!(app.flow.email, "sparky@asu.edu");
        assert!(app.session.is_none());
    }

    #[tokio::test]
    async fn test_stale_auth_reply_is_dropped_after_abandonment() {
        let mut auth = MockAuthService::new();
        auth.expect_login().returning(|_| {
            Ok(AuthSuccess {
                role: "student".to_string(),
            })
        });

        let mut app = app_with_auth(auth);
        app.flow.begin_sign_in();
        app.flow.pick_sign_in_role(Role::Student);
        app.flow.email = "sparky@asu.edu".to_string();
        app.flow.password = "hunter2".to_string();

        app.submit_auth();

        // The user walks away before the reply lands
        app.flow.to_welcome();

        let msg = app.async_rx.recv().await.expect("auth reply");
        app.handle_async_message(msg);

        assert!(app.session.is_none());
        assert_eq!(app.screen, Screen::Auth);
        assert_eq!(app.flow.screen, FlowScreen::Welcome);
    }

    #[tokio::test]
    async fn test_second_submit_refused_while_in_flight() {
        let mut auth = MockAuthService::new();
        // Exactly one call allowed; a queued duplicate would fail this
        auth.expect_login().times(1).returning(|_| {
            Ok(AuthSuccess {
                role: "student".to_string(),
            })
        });

        let mut app = app_with_auth(auth);
        app.flow.begin_sign_in();
        app.flow.pick_sign_in_role(Role::Student);
        app.flow.email = "sparky@asu.edu".to_string();
        app.flow.password = "hunter2".to_string();

        app.submit_auth();
        app.submit_auth();

        let msg = app.async_rx.recv().await.expect("auth reply");
        app.handle_async_message(msg);
        assert!(app.session.is_some());
    }

    #[tokio::test]
    async fn test_dashboard_renders_one_row_per_fixture_record() {
        let mut app = App::with_services(
            policy(),
            Arc::new(MockAuthService::new()),
            Arc::new(MockQuizService::new()),
            Arc::new(FixtureAnalytics::seeded()),
        );

        app.fetch_dashboard();
        let msg = app.async_rx.recv().await.expect("dashboard reply");
        app.handle_async_message(msg);

        assert_eq!(app.roster.len(), 5);
        assert_eq!(app.roster_selection.total, 5);
        for row in &app.roster {
            assert!(row.progress <= 100);
        }
    }

    #[tokio::test]
    async fn test_unknown_student_detail_shows_not_found() {
        let mut analytics = MockAnalyticsSource::new();
        analytics
            .expect_student_detail()
            .returning(|_| Ok(None));

        let mut app = App::with_services(
            policy(),
            Arc::new(MockAuthService::new()),
            Arc::new(MockQuizService::new()),
            Arc::new(analytics),
        );

        app.open_student_detail("s99".to_string());
        let msg = app.async_rx.recv().await.expect("detail reply");
        app.handle_async_message(msg);

        assert_eq!(app.detail_missing.as_deref(), Some("s99"));
        assert!(app.detail.is_none());
        assert!(app.detail_error.is_none());
    }

    #[tokio::test]
    async fn test_quiz_scoring_counts_correct_answers() {
        use crate::api::{Choice, Question, Quiz};

        let quiz = Quiz {
            module_id: "1".to_string(),
            questions: vec![Question {
                id: "q1".to_string(),
                prompt: "Which instruction loads a word in MIPS?".to_string(),
                choices: vec![
                    Choice {
                        id: "a".to_string(),
                        text: "lw".to_string(),
                        is_correct: true,
                    },
                    Choice {
                        id: "b".to_string(),
                        text: "la".to_string(),
                        is_correct: false,
                    },
                ],
                hint: None,
            }],
        };

        let mut app = App::with_services(
            policy(),
            Arc::new(MockAuthService::new()),
            Arc::new(MockQuizService::new()),
            Arc::new(FixtureAnalytics::seeded()),
        );
        app.quiz_loading = true;
        app.handle_async_message(AsyncMessage::QuizGenerated(Box::new(quiz)));
        assert_eq!(app.screen, Screen::QuizTake);

        // Answer the first (correct) choice
        app.handle_quiz_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.quiz_score, 1);
        assert_eq!(app.quiz_answer, Some(0));

        // Advance past the last question
        app.handle_quiz_key(KeyEvent::from(KeyCode::Enter));
        assert!(app.quiz_finished);
    }

    #[tokio::test]
    async fn test_sign_out_discards_session_data() {
        let mut auth = MockAuthService::new();
        auth.expect_login().returning(|_| {
            Ok(AuthSuccess {
                role: "professor".to_string(),
            })
        });

        let mut app = app_with_auth(auth);
        app.flow.begin_sign_in();
        app.flow.pick_sign_in_role(Role::Professor);
        app.flow.email = "prof@asu.edu".to_string();
        app.flow.password = "hunter2".to_string();
        app.submit_auth();
        let msg = app.async_rx.recv().await.unwrap();
        app.handle_async_message(msg);
        assert!(app.session.is_some());

        // Dashboard fetch was spawned on landing; let its reply arrive
        let msg = app.async_rx.recv().await.unwrap();
        app.handle_async_message(msg);
        assert_eq!(app.roster.len(), 5);

        app.go_back();

        assert!(app.session.is_none());
        assert_eq!(app.screen, Screen::Auth);
        assert_eq!(app.flow.screen, FlowScreen::Welcome);
        assert!(app.roster.is_empty());
    }
}
