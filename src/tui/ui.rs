//! Main UI renderer

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::core::config::QUESTION_COUNT_CHOICES;
use crate::core::modules::course_modules;
use crate::core::{FlowScreen, Journey, Role};
use crate::tui::app::{App, Screen};
use crate::tui::theme::Theme;

/// Course branding shown on every auth card
const INSTITUTION: &str = "Arizona State University";
const COURSE: &str = "CSE 230: Computer Org/Assembl Lang Prog";

/// Spinner frames for in-flight operations
const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

fn spinner(tick: u64) -> char {
    SPINNER[(tick as usize) % SPINNER.len()]
}

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    // Render help overlay on top if active
    if app.show_help {
        render_help_overlay(frame, app);
    }
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let screen_name = match &app.screen {
        Screen::Auth => match app.flow.screen {
            FlowScreen::Welcome => "Welcome",
            FlowScreen::SignInRole | FlowScreen::SignInForm(_) => "Sign In",
            _ => "Create Account",
        },
        Screen::StudentHome => "Modules",
        Screen::QuizTake => "Quiz",
        Screen::InstructorDashboard => "Instructor Dashboard",
        Screen::StudentDetail(_) => "Student Report",
    };

    let title = match &app.session {
        Some(session) => format!(
            " lectern │ CSE 230 │ {} │ {} ({}) ",
            screen_name,
            session.who(),
            session.role
        ),
        None => format!(" lectern │ CSE 230 │ {} ", screen_name),
    };

    let header = Paragraph::new(title)
        .style(Theme::header())
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}

/// Render the main content area based on current screen
fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    match &app.screen {
        Screen::Auth => render_auth(frame, area, app),
        Screen::StudentHome => render_student_home(frame, area, app),
        Screen::QuizTake => render_quiz(frame, area, app),
        Screen::InstructorDashboard => render_dashboard(frame, area, app),
        Screen::StudentDetail(id) => render_student_detail(frame, area, app, id),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth flow
// ─────────────────────────────────────────────────────────────────────────────

/// Render the active auth flow screen inside a centered card
fn render_auth(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = card_header_lines();

    match app.flow.screen {
        FlowScreen::Welcome => welcome_lines(&mut lines, app),
        FlowScreen::SignInRole => role_choice_lines(&mut lines, app, true),
        FlowScreen::SignUpRole => role_choice_lines(&mut lines, app, false),
        FlowScreen::SignInForm(role) => sign_in_form_lines(&mut lines, app, role),
        FlowScreen::SignUpProfessorForm => professor_form_lines(&mut lines, app),
        FlowScreen::SignUpStudentJourney => journey_choice_lines(&mut lines, app),
        FlowScreen::SignUpStudentTrack => track_choice_lines(&mut lines, app),
        FlowScreen::SignUpStudentForm => student_form_lines(&mut lines, app),
    }

    let height = (lines.len() as u16 + 2).min(area.height);
    let card = centered_rect(58, height, area);

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::PRIMARY)),
    );

    frame.render_widget(paragraph, card);
}

fn card_header_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("{:^54}", INSTITUTION),
            Theme::title(),
        )),
        Line::from(Span::styled(format!("{:^54}", COURSE), Theme::muted())),
        Line::from(""),
    ]
}

/// A selectable button-style row
fn choice_line(label: &str, selected: bool) -> Line<'static> {
    let text = format!("  {:^48}  ", label);
    if selected {
        Line::from(Span::styled(text, Theme::selected()))
    } else {
        Line::from(Span::styled(text, Theme::normal()))
    }
}

fn section_title(lines: &mut Vec<Line<'static>>, title: &str, subtitle: &str) {
    lines.push(Line::from(Span::styled(
        format!("  {}", title),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("  {}", subtitle),
        Theme::muted(),
    )));
    lines.push(Line::from(""));
}

fn error_banner(lines: &mut Vec<Line<'static>>, error: &Option<String>) {
    if let Some(message) = error {
        lines.push(Line::from(Span::styled(
            format!("  ✗ {}", message),
            Theme::error(),
        )));
        lines.push(Line::from(""));
    }
}

fn footer_link(lines: &mut Vec<Line<'static>>, text: &str) {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(format!("  {}", text), Theme::muted())));
}

fn welcome_lines(lines: &mut Vec<Line<'static>>, app: &App) {
    section_title(lines, "Welcome", "Choose an option to continue");
    lines.push(choice_line("Sign Up", app.choice_selection.selected == 0));
    lines.push(choice_line("Sign In", app.choice_selection.selected == 1));
}

fn role_choice_lines(lines: &mut Vec<Line<'static>>, app: &App, sign_in: bool) {
    if sign_in {
        section_title(lines, "Sign In", "Select your role to continue");
    } else {
        section_title(
            lines,
            "Create an account",
            "Enter your information to create your account",
        );
    }
    lines.push(choice_line("Student", app.choice_selection.selected == 0));
    lines.push(choice_line("Professor", app.choice_selection.selected == 1));

    if sign_in {
        footer_link(lines, "Don't have an account? Press [u] to sign up");
    } else {
        footer_link(lines, "Already have an account? Press [i] to sign in");
    }
}

fn journey_choice_lines(lines: &mut Vec<Line<'static>>, app: &App) {
    section_title(
        lines,
        "Create an account",
        "Enter your information to create your account",
    );
    lines.push(Line::from(Span::raw("  Choose Your Journey:")));
    lines.push(Line::from(""));
    lines.push(choice_line(
        Journey::ComputerScience.label(),
        app.choice_selection.selected == 0,
    ));
    lines.push(choice_line(
        Journey::Cybersecurity.label(),
        app.choice_selection.selected == 1,
    ));
}

fn track_choice_lines(lines: &mut Vec<Line<'static>>, app: &App) {
    section_title(
        lines,
        "Create an account",
        "Enter your information to create your account",
    );
    lines.push(Line::from(Span::raw("  Choose Your Track:")));
    lines.push(Line::from(""));

    if let Some(journey) = app.flow.journey {
        for (i, track) in journey.tracks().iter().enumerate() {
            lines.push(choice_line(track.label(), app.choice_selection.selected == i));
        }
    }
}

/// The role/journey/track badge shown above sign-up forms
fn badge_line(label: String) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {:<50}", label),
        Style::default().fg(Theme::SECONDARY),
    ))
}

/// One labelled form field; passwords are masked
fn field_lines(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    masked: bool,
    disabled: bool,
) {
    let label_style = if focused {
        Theme::focused_field()
    } else {
        Theme::normal()
    };
    lines.push(Line::from(Span::styled(format!("  {}", label), label_style)));

    let shown = if value.is_empty() {
        Span::styled(format!("  {}", placeholder), Theme::muted())
    } else if masked {
        Span::raw(format!("  {}", "•".repeat(value.chars().count())))
    } else {
        Span::raw(format!("  {}", value))
    };

    let mut spans = vec![shown];
    if focused && !disabled {
        spans.push(Span::styled("▏", Theme::focused_field()));
    }
    lines.push(Line::from(spans));
    lines.push(Line::from(""));
}

/// The submit button, with a busy label while a submission is in flight
fn submit_line(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    busy_label: &str,
    submitting: bool,
    tick: u64,
) {
    if submitting {
        lines.push(Line::from(Span::styled(
            format!("  {} {:^48}  ", spinner(tick), busy_label),
            Theme::muted(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("  {:^50}  ", format!("[ {} ]  (Enter)", label)),
            Style::default()
                .fg(Theme::SECONDARY)
                .add_modifier(Modifier::BOLD),
        )));
    }
}

fn sign_in_form_lines(lines: &mut Vec<Line<'static>>, app: &App, role: Role) {
    section_title(
        lines,
        &format!("Sign in as {}", role.label()),
        "Enter your credentials to continue  ·  Esc to change role",
    );
    error_banner(lines, &app.flow.error);

    let disabled = app.flow.submitting;
    field_lines(
        lines,
        "ASU Email",
        &app.flow.email,
        "asurite@asu.edu",
        app.form_focus == 0,
        false,
        disabled,
    );
    field_lines(
        lines,
        "Password",
        &app.flow.password,
        "••••••••",
        app.form_focus == 1,
        true,
        disabled,
    );

    submit_line(lines, "Sign In", "Signing in...", app.flow.submitting, app.tick_counter);
    footer_link(lines, "Don't have an account? Ctrl+N to sign up");
}

fn professor_form_lines(lines: &mut Vec<Line<'static>>, app: &App) {
    section_title(
        lines,
        "Create an account",
        "Enter your information to create your account  ·  Esc to change role",
    );
    lines.push(badge_line("Professor".to_string()));
    lines.push(Line::from(""));
    error_banner(lines, &app.flow.error);

    let disabled = app.flow.submitting;
    field_lines(
        lines,
        "Professor Key",
        &app.flow.professor_key,
        "Enter professor key",
        app.form_focus == 0,
        false,
        disabled,
    );
    field_lines(
        lines,
        "Name",
        &app.flow.name,
        "First Last",
        app.form_focus == 1,
        false,
        disabled,
    );
    field_lines(
        lines,
        "ASU Email",
        &app.flow.email,
        "asurite@asu.edu",
        app.form_focus == 2,
        false,
        disabled,
    );
    field_lines(
        lines,
        "Password",
        &app.flow.password,
        "••••••••",
        app.form_focus == 3,
        true,
        disabled,
    );
    field_lines(
        lines,
        "Confirm Password",
        &app.flow.confirm_password,
        "••••••••",
        app.form_focus == 4,
        true,
        disabled,
    );

    submit_line(
        lines,
        "Sign Up",
        "Creating account...",
        app.flow.submitting,
        app.tick_counter,
    );
    footer_link(lines, "Contact your administrator for the professor key.");
}

fn student_form_lines(lines: &mut Vec<Line<'static>>, app: &App) {
    section_title(
        lines,
        "Create an account",
        "Enter your information to create your account  ·  Esc to change track",
    );

    let journey = app.flow.journey.map(|j| j.label()).unwrap_or("?");
    let track = app.flow.track.map(|t| t.label()).unwrap_or("?");
    lines.push(badge_line(format!("Student – {} – {}", journey, track)));
    lines.push(Line::from(""));
    error_banner(lines, &app.flow.error);

    let disabled = app.flow.submitting;
    field_lines(
        lines,
        "Name",
        &app.flow.name,
        "First Last",
        app.form_focus == 0,
        false,
        disabled,
    );
    field_lines(
        lines,
        "ASU Email",
        &app.flow.email,
        "asurite@asu.edu",
        app.form_focus == 1,
        false,
        disabled,
    );
    field_lines(
        lines,
        "Password",
        &app.flow.password,
        "••••••••",
        app.form_focus == 2,
        true,
        disabled,
    );
    field_lines(
        lines,
        "Confirm Password",
        &app.flow.confirm_password,
        "••••••••",
        app.form_focus == 3,
        true,
        disabled,
    );

    submit_line(
        lines,
        "Sign Up",
        "Creating account...",
        app.flow.submitting,
        app.tick_counter,
    );
    footer_link(lines, "Already have an account? Ctrl+L to sign in");
}

// ─────────────────────────────────────────────────────────────────────────────
// Student home / quiz setup
// ─────────────────────────────────────────────────────────────────────────────

fn render_student_home(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(6)])
        .split(area);

    // Module picker
    let items: Vec<ListItem> = course_modules()
        .iter()
        .enumerate()
        .map(|(i, module)| {
            let text = format!("  Module {}  {}", module.id, module.name);
            let item = ListItem::new(text);
            if i == app.module_selection.selected {
                item.style(Theme::selected())
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Choose a module ")
            .borders(Borders::ALL)
            .border_style(Theme::normal()),
    );
    frame.render_widget(list, chunks[0]);

    // Quiz setup
    let count = QUESTION_COUNT_CHOICES[app.count_index];
    let mut setup_lines = vec![Line::from(vec![
        Span::raw("  Questions: "),
        Span::styled(
            format!("◂ {} ▸", count),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("   (←/→ to adjust)", Theme::muted()),
    ])];

    if app.quiz_loading {
        setup_lines.push(Line::from(Span::styled(
            format!("  {} Generating Questions...", spinner(app.tick_counter)),
            Theme::muted(),
        )));
    } else if let Some(error) = &app.quiz_error {
        setup_lines.push(Line::from(Span::styled(
            format!("  ✗ {}", error),
            Theme::error(),
        )));
    } else {
        setup_lines.push(Line::from(Span::styled(
            "  Press Enter to generate a quiz for the selected module",
            Theme::muted(),
        )));
    }

    let setup = Paragraph::new(setup_lines).block(
        Block::default()
            .title(" Practice & Mastery ")
            .borders(Borders::ALL)
            .border_style(Theme::normal()),
    );
    frame.render_widget(setup, chunks[1]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Quiz taking
// ─────────────────────────────────────────────────────────────────────────────

fn render_quiz(frame: &mut Frame, area: Rect, app: &App) {
    let Some(quiz) = &app.quiz else {
        return;
    };

    if app.quiz_finished {
        render_quiz_summary(frame, area, app, quiz.questions.len());
        return;
    }

    let Some(question) = quiz.questions.get(app.quiz_index) else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("  Module {} Quiz", quiz.module_id),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "   question {} of {} · score {}",
                    app.quiz_index + 1,
                    quiz.questions.len(),
                    app.quiz_score
                ),
                Theme::muted(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::raw(format!("  {}", question.prompt))),
        Line::from(""),
    ];

    for (i, choice) in question.choices.iter().enumerate() {
        let letter = (b'a' + i as u8) as char;
        let text = format!("  {}) {}", letter, choice.text);

        let style = match app.quiz_answer {
            // Instant feedback after answering
            Some(_) if choice.is_correct => Theme::success(),
            Some(picked) if picked == i => Theme::error(),
            Some(_) => Theme::muted(),
            None if app.quiz_choice.selected == i => Theme::selected(),
            None => Theme::normal(),
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    lines.push(Line::from(""));
    if let Some(picked) = app.quiz_answer {
        let correct = question.correct_index() == Some(picked);
        if correct {
            lines.push(Line::from(Span::styled("  ✓ Correct!", Theme::success())));
        } else {
            lines.push(Line::from(Span::styled("  ✗ Incorrect", Theme::error())));
        }
        if let Some(hint) = &question.hint {
            lines.push(Line::from(Span::styled(
                format!("  hint: {}", hint),
                Theme::muted(),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Press Enter for the next question",
            Theme::muted(),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Practice & Mastery ")
            .borders(Borders::ALL)
            .border_style(Theme::normal()),
    );
    frame.render_widget(paragraph, area);
}

fn render_quiz_summary(frame: &mut Frame, area: Rect, app: &App, total: usize) {
    let percent = if total > 0 {
        app.quiz_score * 100 / total
    } else {
        0
    };

    let verdict = if percent >= 80 {
        Span::styled("  Mastery achieved!", Theme::success())
    } else {
        Span::styled("  Keep practicing.", Theme::muted())
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Quiz complete",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::raw(format!(
            "  Score: {} / {} ({}%)",
            app.quiz_score, total, percent
        ))),
        Line::from(""),
        Line::from(verdict),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to generate a new quiz",
            Theme::muted(),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Results ")
            .borders(Borders::ALL)
            .border_style(Theme::normal()),
    );
    frame.render_widget(paragraph, area);
}

// ─────────────────────────────────────────────────────────────────────────────
// Instructor dashboard
// ─────────────────────────────────────────────────────────────────────────────

fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_roster(frame, columns[0], app);
    render_most_missed(frame, columns[1], app);
}

fn render_roster(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = if app.dashboard_loading {
        vec![ListItem::new(format!(
            "  {} Loading students...",
            spinner(app.tick_counter)
        ))]
    } else if let Some(error) = &app.dashboard_error {
        vec![
            ListItem::new(format!("  Error: {}", error)).style(Theme::error()),
            ListItem::new(""),
            ListItem::new("  Press [r] to retry"),
        ]
    } else if app.roster.is_empty() {
        vec![ListItem::new("  No students found")]
    } else {
        app.roster
            .iter()
            .enumerate()
            .map(|(i, student)| {
                let text = format!(
                    "  {:<18} {:<22} {:>3}% {}",
                    student.name,
                    student.email,
                    student.progress,
                    progress_bar(student.progress)
                );
                let item = ListItem::new(text);
                if i == app.roster_selection.selected {
                    item.style(Theme::selected())
                } else {
                    item
                }
            })
            .collect()
    };

    let title = match &app.refreshed_at {
        Some(at) => format!(" Student Progress · refreshed {} ", at.format("%H:%M:%S")),
        None => " Student Progress ".to_string(),
    };

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Theme::normal()),
    );
    frame.render_widget(list, area);
}

/// Ten-cell progress bar
fn progress_bar(progress: u8) -> String {
    let filled = (progress as usize / 10).min(10);
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

fn render_most_missed(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    if app.dashboard_loading {
        lines.push(Line::from("  Loading..."));
    } else if app.missed.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No missed-question data",
            Theme::muted(),
        )));
    } else {
        for question in &app.missed {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:>3}× ", question.incorrect_attempts),
                    Theme::error(),
                ),
                Span::styled(format!("[{}]", question.module), Theme::muted()),
            ]));
            lines.push(Line::from(Span::raw(format!(
                "      {}",
                question.question_text
            ))));
            lines.push(Line::from(""));
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Most-Missed Questions ")
            .borders(Borders::ALL)
            .border_style(Theme::normal()),
    );
    frame.render_widget(paragraph, area);
}

// ─────────────────────────────────────────────────────────────────────────────
// Student detail
// ─────────────────────────────────────────────────────────────────────────────

fn render_student_detail(frame: &mut Frame, area: Rect, app: &App, id: &str) {
    let mut lines: Vec<Line> = Vec::new();

    if app.detail_loading {
        lines.push(Line::from(format!(
            "  {} Loading report...",
            spinner(app.tick_counter)
        )));
    } else if app.detail_missing.is_some() {
        // Not-found is an inline state, not an error popup
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  Student '{}' was not found.", id),
            Theme::error(),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Press Esc to return to the dashboard",
            Theme::muted(),
        )));
    } else if let Some(error) = &app.detail_error {
        lines.push(Line::from(Span::styled(
            format!("  Error: {}", error),
            Theme::error(),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from("  Press [r] to retry"));
    } else if let Some(detail) = &app.detail {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}", detail.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  <{}>", detail.email), Theme::muted()),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "  Progress: {:>3}% {}",
            detail.progress,
            progress_bar(detail.progress)
        )));
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled("  Completed modules", Theme::title())));
        if detail.completed_modules.is_empty() {
            lines.push(Line::from(Span::styled("    (none)", Theme::muted())));
        }
        for module in &detail.completed_modules {
            lines.push(Line::from(format!("    ✓ {}", module)));
        }
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled("  In progress", Theme::title())));
        if detail.inprogress_modules.is_empty() {
            lines.push(Line::from(Span::styled("    (none)", Theme::muted())));
        }
        for module in &detail.inprogress_modules {
            lines.push(Line::from(format!("    … {}", module)));
        }
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled("  Recent mistakes", Theme::title())));
        if detail.recent_mistakes.is_empty() {
            lines.push(Line::from(Span::styled(
                "    No recent mistakes.",
                Theme::success(),
            )));
        }
        for mistake in &detail.recent_mistakes {
            lines.push(Line::from(format!("    • {}", mistake)));
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(format!(" Student {} ", id))
            .borders(Borders::ALL)
            .border_style(Theme::normal()),
    );
    frame.render_widget(paragraph, area);
}

// ─────────────────────────────────────────────────────────────────────────────
// Chrome
// ─────────────────────────────────────────────────────────────────────────────

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hints = match &app.screen {
        Screen::Auth if app.flow.screen.is_form() => {
            "Tab/↑↓ field · Enter submit · Esc back · Home welcome"
        }
        Screen::Auth => "↑↓ move · Enter select · Esc back · ? help · q quit",
        Screen::StudentHome => "↑↓ module · ←→ questions · Enter generate · Esc sign out",
        Screen::QuizTake if app.quiz_finished => "Enter done",
        Screen::QuizTake => "↑↓ choose · Enter answer/next · Esc abandon quiz",
        Screen::InstructorDashboard => "↑↓ move · Enter report · r refresh · Esc sign out",
        Screen::StudentDetail(_) => "r refresh · Esc back",
    };

    let text = match &app.status_message {
        Some(message) => format!(" {}  │  {}", message, hints),
        None => format!(" {}", hints),
    };

    let bar = Paragraph::new(text)
        .style(Theme::muted())
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(bar, area);
}

fn render_help_overlay(frame: &mut Frame, _app: &App) {
    let area = centered_rect(52, 16, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(" Keys", Theme::title())),
        Line::from(""),
        Line::from("  ↑/k ↓/j      move selection"),
        Line::from("  Enter        select / submit / next"),
        Line::from("  Tab          next form field"),
        Line::from("  Esc          back one step"),
        Line::from("  Home         back to welcome (clears the flow)"),
        Line::from("  Ctrl+N       sign up (from the sign-in form)"),
        Line::from("  Ctrl+L       sign in (from the sign-up forms)"),
        Line::from("  r            refresh (dashboard, report)"),
        Line::from("  q / Ctrl+C   quit"),
        Line::from(""),
        Line::from(Span::styled("  press any key to close", Theme::muted())),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::SECONDARY)),
    );
    frame.render_widget(help, area);
}

/// A centered rect of fixed width/height within `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0), "░░░░░░░░░░");
        assert_eq!(progress_bar(100), "██████████");
        assert_eq!(progress_bar(62), "██████░░░░");
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(60, 20, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
        assert_eq!(rect.x, 0);
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner(0), spinner(4));
        assert_ne!(spinner(0), spinner(1));
    }
}
