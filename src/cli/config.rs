//! Configuration CLI command handlers

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::Config;
use crate::error::Result;

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => handle_set(key, value),
        ConfigCommand::Get { key } => handle_get(key),
        ConfigCommand::Show => handle_show(),
    }
}

/// Handle setting a configuration value
fn handle_set(key: ConfigKey, value: String) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        ConfigKey::ApiUrl => {
            config.set_api_base_url(&value)?;
            println!("API URL set to: {}", config.api_base_url);
        }
        ConfigKey::AnalyticsUrl => {
            if value.eq_ignore_ascii_case("none") {
                config.set_analytics_url(None)?;
                println!("Analytics URL cleared; using the built-in fixture dataset.");
            } else {
                config.set_analytics_url(Some(&value))?;
                println!(
                    "Analytics URL set to: {}",
                    config.analytics_url.as_deref().unwrap_or_default()
                );
            }
        }
        ConfigKey::EmailDomain => {
            config.email_domain = value.trim_start_matches('@').to_string();
            println!("Email domain set to: @{}", config.email_domain);
        }
        ConfigKey::ProfessorKey => {
            config.professor_key = value;
            println!("Professor key updated.");
        }
        ConfigKey::QuestionCount => {
            let count: u32 = value
                .parse()
                .map_err(|_| crate::error::LecternError::InvalidInput(format!(
                    "'{}' is not a number",
                    value
                )))?;
            config.set_default_question_count(count)?;
            println!("Default question count set to: {}", count);
        }
    }

    config.save()
}

/// Handle getting a configuration value
fn handle_get(key: ConfigKey) -> Result<()> {
    let config = Config::load()?;

    match key {
        ConfigKey::ApiUrl => println!("API URL: {}", config.api_base_url),
        ConfigKey::AnalyticsUrl => match &config.analytics_url {
            Some(url) => println!("Analytics URL: {}", url),
            None => println!("Analytics URL: Not configured (using fixture dataset)"),
        },
        ConfigKey::EmailDomain => println!("Email domain: @{}", config.email_domain),
        ConfigKey::ProfessorKey => println!("Professor key: {}", mask(&config.professor_key)),
        ConfigKey::QuestionCount => {
            println!("Default question count: {}", config.default_question_count)
        }
    }

    Ok(())
}

/// Print the whole configuration
fn handle_show() -> Result<()> {
    let config = Config::load()?;

    println!("Configuration ({})", Config::config_path()?.display());
    println!("{}", "=".repeat(40));
    println!("  api-url:        {}", config.api_base_url);
    println!(
        "  analytics-url:  {}",
        config.analytics_url.as_deref().unwrap_or("(fixtures)")
    );
    println!("  email-domain:   @{}", config.email_domain);
    println!("  professor-key:  {}", mask(&config.professor_key));
    println!("  question-count: {}", config.default_question_count);

    Ok(())
}

/// Show only the first and last character of a key
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 2 {
        "*".repeat(chars.len())
    } else {
        format!(
            "{}{}{}",
            chars[0],
            "*".repeat(chars.len() - 2),
            chars[chars.len() - 1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_hides_the_middle() {
        assert_eq!(mask("PROF2024"), "P******4");
        assert_eq!(mask("ab"), "**");
        assert_eq!(mask(""), "");
    }
}
