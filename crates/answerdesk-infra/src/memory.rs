//! In-memory table and cursor store.
//!
//! Backs `--demo` mode and integration tests. Tables keep insertion order,
//! which stands in for the hosted store's fetch order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::RwLock;

use answerdesk_core::repository::cursor::CursorStore;
use answerdesk_core::repository::table::{RecordTable, Tables};
use answerdesk_types::config::FieldNames;
use answerdesk_types::error::{RepositoryError, TableError};
use answerdesk_types::record::{Fields, Record, RecordId, link_value};
use answerdesk_types::session::SessionKey;

/// A table held in process memory. Clones share the same records.
#[derive(Clone)]
pub struct InMemoryTable {
    prefix: &'static str,
    records: Arc<RwLock<Vec<Record>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryTable {
    /// An empty table whose generated ids start with `prefix`.
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            records: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Append a record with generated id, returning it.
    pub async fn insert(&self, fields: Fields) -> Record {
        let id = format!("{}{:04}", self.prefix, self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut record = Record::new(id, fields);
        record.created_time = Some(chrono::Utc::now().to_rfc3339());
        self.records.write().await.push(record.clone());
        record
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl RecordTable for InMemoryTable {
    async fn list_all(&self) -> Result<Vec<Record>, TableError> {
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, fields: Fields) -> Result<Record, TableError> {
        Ok(self.insert(fields).await)
    }

    async fn update(&self, id: &RecordId, fields: Fields) -> Result<Record, TableError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| TableError::NotFound(id.to_string()))?;
        // PATCH semantics: only the given fields change.
        for (key, value) in fields {
            record.fields.insert(key, value);
        }
        Ok(record.clone())
    }
}

/// Cursor positions held in process memory; lost on restart.
#[derive(Default)]
pub struct InMemoryCursorStore {
    positions: DashMap<SessionKey, usize>,
}

impl InMemoryCursorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CursorStore for InMemoryCursorStore {
    async fn load(&self, session: &SessionKey) -> Result<usize, RepositoryError> {
        Ok(self.positions.get(session).map(|p| *p).unwrap_or(0))
    }

    async fn save(&self, session: &SessionKey, index: usize) -> Result<(), RepositoryError> {
        self.positions.insert(session.clone(), index);
        Ok(())
    }

    async fn reset(&self, session: &SessionKey) -> Result<(), RepositoryError> {
        self.positions.remove(session);
        Ok(())
    }
}

/// Empty in-memory tables for all four table roles.
pub fn empty_tables() -> Tables<InMemoryTable> {
    Tables {
        questions: InMemoryTable::new("recQ"),
        companies: InMemoryTable::new("recC"),
        robots: InMemoryTable::new("recR"),
        feedback: InMemoryTable::new("recF"),
    }
}

/// Tables seeded with a small sample base for `--demo`.
///
/// Includes a duplicated company name and a question linked to a robot that
/// no longer exists, so ambiguity and "Unknown" show up in the demo.
pub async fn demo_tables(fields: &FieldNames) -> Tables<InMemoryTable> {
    let tables = empty_tables();

    let mut company_ids = Vec::new();
    for name in ["Acme Medical", "Globex Surgical", "Initech Clinics", "Acme Medical"] {
        let record = tables
            .companies
            .insert(object([(fields.company_name.as_str(), Value::from(name))]))
            .await;
        company_ids.push(record.id);
    }

    let mut robot_ids = Vec::new();
    for name in ["Da Vinci", "Hugo", "Symani", "Hugo"] {
        let record = tables
            .robots
            .insert(object([(fields.robot_name.as_str(), Value::from(name))]))
            .await;
        robot_ids.push(record.id);
    }

    let questions: [(&str, &str, Option<usize>, Option<usize>); 6] = [
        ("How many systems are installed on site?", "", Some(0), Some(0)),
        ("Which specialties use the system most?", "Urology", Some(0), None),
        ("Is a second console available?", "", Some(1), Some(1)),
        ("Who is the clinical contact?", "", Some(2), None),
        ("What is the annual case volume?", "", None, None),
        ("Which instruments are reprocessed in-house?", "", Some(1), None),
    ];
    for (text, answer, company, robot) in questions {
        let mut record = object([(fields.question_text.as_str(), Value::from(text))]);
        if !answer.is_empty() {
            record.insert(fields.answer.clone(), Value::from(answer));
        }
        if let Some(i) = company {
            record.insert(fields.question_company.clone(), link_value(&company_ids[i]));
        }
        if let Some(i) = robot {
            record.insert(fields.question_robot.clone(), link_value(&robot_ids[i]));
        }
        tables.questions.insert(record).await;
    }

    let dangling = object([
        (fields.question_text.as_str(), Value::from("Is the retired system still under service contract?")),
        (fields.question_robot.as_str(), link_value(&RecordId::from("recRgone"))),
    ]);
    tables.questions.insert(dangling).await;

    let question_count = tables.questions.len().await;
    tracing::info!(
        questions = question_count,
        companies = company_ids.len(),
        robots = robot_ids.len(),
        "demo tables seeded"
    );
    tables
}

fn object<const N: usize>(pairs: [(&str, Value); N]) -> Fields {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_then_list_keeps_order() {
        let table = InMemoryTable::new("rec");
        table.create(object([("Name", json!("A"))])).await.unwrap();
        table.create(object([("Name", json!("B"))])).await.unwrap();

        let names: Vec<String> = table
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|r| r.text_or_empty("Name").to_string())
            .collect();
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
    }

    #[tokio::test]
    async fn test_generated_ids_are_unique() {
        let table = InMemoryTable::new("rec");
        let a = table.insert(Fields::new()).await;
        let b = table.insert(Fields::new()).await;
        assert_ne!(a.id, b.id);
        assert!(a.id.as_str().starts_with("rec"));
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let table = InMemoryTable::new("rec");
        let created = table
            .insert(object([("Question", json!("Q")), ("Answers", json!(""))]))
            .await;

        let updated = table
            .update(&created.id, object([("Answers", json!("42"))]))
            .await
            .unwrap();
        assert_eq!(updated.text("Question"), Some("Q"));
        assert_eq!(updated.text("Answers"), Some("42"));
    }

    #[tokio::test]
    async fn test_update_unknown_record() {
        let table = InMemoryTable::new("rec");
        let result = table.update(&RecordId::from("recNope"), Fields::new()).await;
        assert!(matches!(result, Err(TableError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_cursor_store_defaults_and_reset() {
        let store = InMemoryCursorStore::new();
        let session: SessionKey = "desk-1".parse().unwrap();

        assert_eq!(store.load(&session).await.unwrap(), 0);
        store.save(&session, 4).await.unwrap();
        assert_eq!(store.load(&session).await.unwrap(), 4);
        assert_eq!(store.load(&SessionKey::default()).await.unwrap(), 0);

        store.reset(&session).await.unwrap();
        assert_eq!(store.load(&session).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_demo_tables_seeded() {
        let fields = FieldNames::default();
        let tables = demo_tables(&fields).await;
        assert_eq!(tables.companies.len().await, 4);
        assert_eq!(tables.robots.len().await, 4);

        let questions = tables.questions.list_all().await.unwrap();
        assert_eq!(questions.len(), 7);
        let answered = questions
            .iter()
            .filter(|r| !r.text_or_empty(&fields.answer).is_empty())
            .count();
        assert_eq!(answered, 1);
    }
}
