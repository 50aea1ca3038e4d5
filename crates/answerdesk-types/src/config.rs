//! Global configuration types for answerdesk.
//!
//! `GlobalConfig` represents the top-level `config.toml` that names the
//! hosted base, its tables and columns, and the fallback robotic-system
//! vocabulary.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.answerdesk/config.toml`. All fields have defaults matching
/// the hosted base the tool was built for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub airtable: AirtableConfig,

    #[serde(default)]
    pub tables: TableNames,

    #[serde(default)]
    pub fields: FieldNames,

    /// Used for the "Robotic System" dropdown when the Robots table has no names.
    #[serde(default = "default_robotic_systems")]
    pub robotic_systems: Vec<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            airtable: AirtableConfig::default(),
            tables: TableNames::default(),
            fields: FieldNames::default(),
            robotic_systems: default_robotic_systems(),
        }
    }
}

/// Connection settings for the hosted base.
///
/// The access token is never read from this file; it comes from the
/// `AIRTABLE_TOKEN` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirtableConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base identifier (`app...`). `AIRTABLE_BASE_ID` overrides it.
    #[serde(default)]
    pub base_id: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            base_id: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Names of the tables in the hosted base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableNames {
    #[serde(default = "default_questions_table")]
    pub questions: String,
    #[serde(default = "default_companies_table")]
    pub companies: String,
    #[serde(default = "default_robots_table")]
    pub robots: String,
    #[serde(default = "default_feedback_table")]
    pub feedback: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            questions: default_questions_table(),
            companies: default_companies_table(),
            robots: default_robots_table(),
            feedback: default_feedback_table(),
        }
    }
}

/// Column names used on each table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub question_text: String,
    pub answer: String,
    pub robotic_system: String,
    pub question_company: String,
    pub question_robot: String,
    pub company_name: String,
    pub robot_name: String,
    pub feedback_message: String,
    pub feedback_name: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            question_text: "Question".to_string(),
            answer: "Answers".to_string(),
            robotic_system: "Robotic System".to_string(),
            question_company: "Company".to_string(),
            question_robot: "Robot".to_string(),
            company_name: "Name".to_string(),
            robot_name: "Name".to_string(),
            feedback_message: "Feedback".to_string(),
            feedback_name: "Name".to_string(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.airtable.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_questions_table() -> String {
    "Questions".to_string()
}

fn default_companies_table() -> String {
    "Companies".to_string()
}

fn default_robots_table() -> String {
    "Robots".to_string()
}

fn default_feedback_table() -> String {
    "Feedback".to_string()
}

fn default_robotic_systems() -> Vec<String> {
    ["Da Vinci", "Hugo", "Symani", "Andere"]
        .into_iter()
        .map(String::from)
        .collect()
}
