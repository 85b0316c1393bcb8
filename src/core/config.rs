//! Application configuration management
//!
//! Handles loading and saving application settings including:
//! - Course backend base URL
//! - Institutional email domain and professor key
//! - Default quiz question count

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{LecternError, Result};

/// Question counts offered by the quiz setup screen
pub const QUESTION_COUNT_CHOICES: [u32; 4] = [5, 10, 15, 20];

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the course backend (auth + quiz generation)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Optional analytics endpoint base; when unset the built-in
    /// fixture dataset is used
    #[serde(default)]
    pub analytics_url: Option<String>,

    /// Institutional email domain accepted by the auth forms
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    /// Key professors must supply when creating an account
    #[serde(default = "default_professor_key")]
    pub professor_key: String,

    /// Default number of questions requested from the quiz backend
    #[serde(default = "default_question_count")]
    pub default_question_count: u32,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_email_domain() -> String {
    "asu.edu".to_string()
}

fn default_professor_key() -> String {
    "PROF2024".to_string()
}

fn default_question_count() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            analytics_url: None,
            email_domain: default_email_domain(),
            professor_key: default_professor_key(),
            default_question_count: default_question_count(),
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("io", "lectern", "lectern")
            .ok_or_else(|| LecternError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Get the configuration directory
    pub fn config_dir() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("io", "lectern", "lectern")
            .ok_or_else(|| LecternError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().to_path_buf())
    }

    /// Set the backend base URL after checking it parses
    pub fn set_api_base_url(&mut self, value: &str) -> Result<()> {
        let url = Url::parse(value)?;
        self.api_base_url = url.to_string().trim_end_matches('/').to_string();
        Ok(())
    }

    /// Set the analytics endpoint base, or clear it with None
    pub fn set_analytics_url(&mut self, value: Option<&str>) -> Result<()> {
        self.analytics_url = match value {
            Some(v) => {
                let url = Url::parse(v)?;
                Some(url.to_string().trim_end_matches('/').to_string())
            }
            None => None,
        };
        Ok(())
    }

    /// Set the default question count, restricted to the offered choices
    pub fn set_default_question_count(&mut self, count: u32) -> Result<()> {
        if !QUESTION_COUNT_CHOICES.contains(&count) {
            return Err(LecternError::InvalidInput(format!(
                "Invalid question count '{}'. Available counts: {}",
                count,
                QUESTION_COUNT_CHOICES
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        self.default_question_count = count;
        Ok(())
    }
}
