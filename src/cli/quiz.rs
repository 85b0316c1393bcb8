//! Quiz CLI command handler

use crate::api::{ApiClient, HttpQuizService, QuizService};
use crate::cli::commands::QuizArgs;
use crate::core::modules::find_module;
use crate::core::Config;
use crate::error::{LecternError, Result};

/// Generate a quiz for a module and print it
pub async fn handle_quiz(args: QuizArgs) -> Result<()> {
    let config = Config::load()?;

    let module = find_module(&args.module)
        .ok_or_else(|| LecternError::ModuleNotFound(args.module.clone()))?;
    let count = args.count.unwrap_or(config.default_question_count);

    let service = HttpQuizService::new(ApiClient::new(&config.api_base_url)?);
    let quiz = service.generate(module.id, count).await?;

    println!("Module {} Quiz - {}", module.id, module.name);
    println!("{}", "=".repeat(60));
    println!();

    for (i, question) in quiz.questions.iter().enumerate() {
        println!("{}. {}", i + 1, question.prompt);
        for (j, choice) in question.choices.iter().enumerate() {
            let letter = (b'a' + j as u8) as char;
            if args.answers && choice.is_correct {
                println!("     {}) {}  ✓", letter, choice.text);
            } else {
                println!("     {}) {}", letter, choice.text);
            }
        }
        if args.answers {
            if let Some(hint) = &question.hint {
                println!("     hint: {}", hint);
            }
        }
        println!();
    }

    println!(
        "{} questions generated. Run the TUI to take the quiz interactively.",
        quiz.questions.len()
    );

    Ok(())
}
