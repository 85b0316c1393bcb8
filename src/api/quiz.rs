//! Quiz-generation collaborator
//!
//! Accepts a module id and a question count, returns a structured quiz.
//! The payload is trusted beyond the HTTP status and JSON shape; the
//! backend owns question content and correctness.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::client::{error_reason, ApiClient};
use crate::error::{LecternError, Result};

/// One answer choice
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

/// One quiz question
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl Question {
    /// Index of the correct choice, if the backend marked one
    pub fn correct_index(&self) -> Option<usize> {
        self.choices.iter().position(|c| c.is_correct)
    }
}

/// A generated quiz for one module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub module_id: String,
    pub questions: Vec<Question>,
}

/// External quiz-generation service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizService: Send + Sync {
    /// Generate a quiz for a module
    async fn generate(&self, module_id: &str, num_questions: u32) -> Result<Quiz>;
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    module_id: &'a str,
    num_questions: u32,
}

/// HTTP implementation against the course backend
pub struct HttpQuizService {
    api: ApiClient,
}

impl HttpQuizService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl QuizService for HttpQuizService {
    async fn generate(&self, module_id: &str, num_questions: u32) -> Result<Quiz> {
        let body = GenerateBody {
            module_id,
            num_questions,
        };

        let response = self
            .api
            .http()
            .post(self.api.endpoint("fetch/quiz")?)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LecternError::QuizGeneration(error_reason(response).await));
        }

        Ok(response.json().await?)
    }
}
