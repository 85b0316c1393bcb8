//! Analytics data source for the instructor dashboard
//!
//! The dashboard is read-only: a roster of student progress, the
//! most-missed questions, and a per-student detail lookup. The source
//! is injected so tests (and offline runs) use the fixture dataset
//! while a configured deployment reads the HTTP endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::client::{error_reason, ApiClient};
use crate::error::{LecternError, Result};

/// One roster row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProgress {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Course completion percentage, 0-100
    pub progress: u8,
}

/// One frequently-missed question
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissedQuestion {
    pub id: String,
    pub question_text: String,
    pub incorrect_attempts: u32,
    pub module: String,
}

/// Full detail for one student
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetail {
    pub id: String,
    pub name: String,
    pub email: String,
    pub progress: u8,
    pub completed_modules: Vec<String>,
    pub inprogress_modules: Vec<String>,
    pub recent_mistakes: Vec<String>,
}

/// Read-only analytics repository
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Roster of all students with their progress
    async fn student_progress(&self) -> Result<Vec<StudentProgress>>;

    /// Questions ranked by incorrect attempts
    async fn most_missed(&self) -> Result<Vec<MissedQuestion>>;

    /// Detail for one student; `None` when the id is unknown
    async fn student_detail(&self, id: &str) -> Result<Option<StudentDetail>>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixture implementation
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory dataset used when no analytics endpoint is configured
pub struct FixtureAnalytics {
    details: Vec<StudentDetail>,
    missed: Vec<MissedQuestion>,
}

impl Default for FixtureAnalytics {
    fn default() -> Self {
        Self::seeded()
    }
}

impl FixtureAnalytics {
    /// The course's demo dataset: five students, five missed questions
    pub fn seeded() -> Self {
        let details = vec![
            StudentDetail {
                id: "s1".into(),
                name: "Alice Johnson".into(),
                email: "alice@example.com".into(),
                progress: 85,
                completed_modules: vec![
                    "Intro to Assembly".into(),
                    "MIPS Registers".into(),
                    "RISC-V ISA".into(),
                ],
                inprogress_modules: vec!["x86 Architecture".into()],
                recent_mistakes: vec![
                    "Confused `lw` (load word) with `la` (load address)".into(),
                    "Forgot purpose of `%ebp` register".into(),
                ],
            },
            StudentDetail {
                id: "s2".into(),
                name: "Bob Smith".into(),
                email: "bob@example.com".into(),
                progress: 40,
                completed_modules: vec!["Intro to Assembly".into()],
                inprogress_modules: vec!["MIPS Registers".into(), "RISC-V ISA".into()],
                recent_mistakes: vec!["Misunderstood `jal` return address storage".into()],
            },
            StudentDetail {
                id: "s3".into(),
                name: "Charlie Brown".into(),
                email: "charlie@example.com".into(),
                progress: 100,
                completed_modules: vec![
                    "Intro to Assembly".into(),
                    "MIPS Registers".into(),
                    "RISC-V ISA".into(),
                    "x86 Architecture".into(),
                    "Stack Frames".into(),
                ],
                inprogress_modules: vec![],
                recent_mistakes: vec![],
            },
            StudentDetail {
                id: "s4".into(),
                name: "David Lee".into(),
                email: "david@example.com".into(),
                progress: 15,
                completed_modules: vec!["Intro to Assembly".into()],
                inprogress_modules: vec!["MIPS Registers".into()],
                recent_mistakes: vec![
                    "Struggling with the concept of a register".into(),
                    "Cannot differentiate RISC vs CISC".into(),
                    "Repeatedly fails `addi` instruction questions".into(),
                ],
            },
            StudentDetail {
                id: "s5".into(),
                name: "Eve Davis".into(),
                email: "eve@example.com".into(),
                progress: 62,
                completed_modules: vec!["Intro to Assembly".into(), "MIPS Registers".into()],
                inprogress_modules: vec!["RISC-V ISA".into(), "x86 Architecture".into()],
                recent_mistakes: vec![
                    "What is the key difference between a RISC and a CISC architecture?".into(),
                ],
            },
        ];

        let missed = vec![
            MissedQuestion {
                id: "q1".into(),
                question_text:
                    "Explain the difference between `lw` (load word) and `la` (load address) in MIPS."
                        .into(),
                incorrect_attempts: 42,
                module: "MIPS Assembly".into(),
            },
            MissedQuestion {
                id: "q2".into(),
                question_text:
                    "What is the purpose of the `%ebp` (base pointer) register in the x86 stack frame?"
                        .into(),
                incorrect_attempts: 31,
                module: "x86 Architecture".into(),
            },
            MissedQuestion {
                id: "q3".into(),
                question_text:
                    "How does a RISC-V `jal` (jump and link) instruction store the return address?"
                        .into(),
                incorrect_attempts: 25,
                module: "RISC-V ISA".into(),
            },
            MissedQuestion {
                id: "q4".into(),
                question_text:
                    "Why can't the `addi` instruction be used to load a 32-bit constant in MIPS?"
                        .into(),
                incorrect_attempts: 19,
                module: "MIPS Instructions".into(),
            },
            MissedQuestion {
                id: "q5".into(),
                question_text: "What is the key difference between a RISC and a CISC architecture?"
                    .into(),
                incorrect_attempts: 12,
                module: "ISA Concepts".into(),
            },
        ];

        Self { details, missed }
    }
}

#[async_trait]
impl AnalyticsSource for FixtureAnalytics {
    async fn student_progress(&self) -> Result<Vec<StudentProgress>> {
        Ok(self
            .details
            .iter()
            .map(|d| StudentProgress {
                id: d.id.clone(),
                name: d.name.clone(),
                email: d.email.clone(),
                progress: d.progress,
            })
            .collect())
    }

    async fn most_missed(&self) -> Result<Vec<MissedQuestion>> {
        Ok(self.missed.clone())
    }

    async fn student_detail(&self, id: &str) -> Result<Option<StudentDetail>> {
        Ok(self.details.iter().find(|d| d.id == id).cloned())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP implementation
// ─────────────────────────────────────────────────────────────────────────────

/// Reads the analytics endpoints of a deployed backend
pub struct HttpAnalytics {
    api: ApiClient,
}

impl HttpAnalytics {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AnalyticsSource for HttpAnalytics {
    async fn student_progress(&self) -> Result<Vec<StudentProgress>> {
        let response = self
            .api
            .http()
            .get(self.api.endpoint("api/analytics/student-progress")?)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LecternError::Api(error_reason(response).await));
        }
        Ok(response.json().await?)
    }

    async fn most_missed(&self) -> Result<Vec<MissedQuestion>> {
        let response = self
            .api
            .http()
            .get(self.api.endpoint("api/analytics/most-missed")?)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LecternError::Api(error_reason(response).await));
        }
        Ok(response.json().await?)
    }

    async fn student_detail(&self, id: &str) -> Result<Option<StudentDetail>> {
        let response = self
            .api
            .http()
            .get(self.api.endpoint(&format!("api/analytics/student/{}", id))?)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(LecternError::Api(error_reason(response).await));
        }
        Ok(Some(response.json().await?))
    }
}

/// Build the analytics source the configuration asks for: HTTP when an
/// endpoint is set, the fixture dataset otherwise
pub fn source_from_config(config: &crate::core::Config) -> Result<std::sync::Arc<dyn AnalyticsSource>> {
    match &config.analytics_url {
        Some(base) => Ok(std::sync::Arc::new(HttpAnalytics::new(ApiClient::new(base)?))),
        None => Ok(std::sync::Arc::new(FixtureAnalytics::seeded())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_has_five_students_in_range() {
        let source = FixtureAnalytics::seeded();
        let roster = source.student_progress().await.unwrap();
        assert_eq!(roster.len(), 5);
        for row in &roster {
            assert!(row.progress <= 100);
            assert!(!row.name.is_empty());
            assert!(row.email.contains('@'));
        }
    }

    #[tokio::test]
    async fn test_fixture_detail_lookup() {
        let source = FixtureAnalytics::seeded();
        let alice = source.student_detail("s1").await.unwrap().unwrap();
        assert_eq!(alice.name, "Alice Johnson");
        assert_eq!(alice.completed_modules.len(), 3);

        assert!(source.student_detail("s99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fixture_missed_questions_ranked() {
        let source = FixtureAnalytics::seeded();
        let missed = source.most_missed().await.unwrap();
        assert_eq!(missed.len(), 5);
        for pair in missed.windows(2) {
            assert!(pair[0].incorrect_attempts >= pair[1].incorrect_attempts);
        }
    }

    #[test]
    fn test_wire_shapes_use_backend_field_names() {
        let raw = r#"{
            "id": "s1",
            "name": "Alice Johnson",
            "email": "alice@example.com",
            "progress": 85,
            "completedModules": ["Intro to Assembly"],
            "inprogressModules": [],
            "recentMistakes": []
        }"#;
        let detail: StudentDetail = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.completed_modules.len(), 1);

        let raw = r#"{
            "id": "q1",
            "questionText": "RISC vs CISC?",
            "incorrectAttempts": 12,
            "module": "ISA Concepts"
        }"#;
        let missed: MissedQuestion = serde_json::from_str(raw).unwrap();
        assert_eq!(missed.incorrect_attempts, 12);
    }
}
