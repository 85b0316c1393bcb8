//! Roster CLI command handlers

use crate::api::analytics::source_from_config;
use crate::api::AnalyticsSource;
use crate::cli::commands::{RosterArgs, StudentArgs};
use crate::core::Config;
use crate::error::{LecternError, Result};

/// Print the student progress roster
pub async fn handle_roster(args: RosterArgs) -> Result<()> {
    let config = Config::load()?;
    let source = source_from_config(&config)?;

    let roster = source.student_progress().await?;
    if roster.is_empty() {
        println!("No students found.");
        return Ok(());
    }

    println!(
        "  {:<4}  {:<20}  {:<24}  {:>8}",
        "ID", "NAME", "EMAIL", "PROGRESS"
    );
    println!("  {}", "-".repeat(62));

    for student in &roster {
        println!(
            "  {:<4}  {:<20}  {:<24}  {:>7}%",
            student.id, student.name, student.email, student.progress
        );
    }

    if args.missed {
        let missed = source.most_missed().await?;
        println!();
        println!("Most-missed questions:");
        println!();
        for question in &missed {
            println!(
                "  {:>3}×  [{}] {}",
                question.incorrect_attempts, question.module, question.question_text
            );
        }
    }

    Ok(())
}

/// Print one student's detail report
pub async fn handle_student(args: StudentArgs) -> Result<()> {
    let config = Config::load()?;
    let source = source_from_config(&config)?;

    let detail = source
        .student_detail(&args.id)
        .await?
        .ok_or_else(|| LecternError::StudentNotFound(args.id.clone()))?;

    println!("{} <{}>", detail.name, detail.email);
    println!("{}", "=".repeat(40));
    println!();
    println!("  Progress:    {}%", detail.progress);

    println!("  Completed:   {}", join_or_dash(&detail.completed_modules));
    println!("  In progress: {}", join_or_dash(&detail.inprogress_modules));

    if detail.recent_mistakes.is_empty() {
        println!("  No recent mistakes.");
    } else {
        println!();
        println!("  Recent mistakes:");
        for mistake in &detail.recent_mistakes {
            println!("    • {}", mistake);
        }
    }

    Ok(())
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "—".to_string()
    } else {
        items.join(", ")
    }
}
