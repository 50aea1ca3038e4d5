//! Remote table trait definition.
//!
//! A `RecordTable` is one named table of the hosted store. Lists come back
//! unordered; writes return the stored record.

use std::future::Future;
use std::pin::Pin;

use answerdesk_types::error::TableError;
use answerdesk_types::record::{Fields, Record, RecordId};

/// Trait for one table of the hosted record store.
///
/// Implementations live in answerdesk-infra (e.g. `AirtableTable`).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait RecordTable: Send + Sync {
    /// Fetch every record of the table.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Record>, TableError>> + Send;

    /// Create a record with the given fields. Returns the created record.
    fn create(&self, fields: Fields) -> impl Future<Output = Result<Record, TableError>> + Send;

    /// Partially update a record: only the given fields are overwritten.
    fn update(
        &self,
        id: &RecordId,
        fields: Fields,
    ) -> impl Future<Output = Result<Record, TableError>> + Send;
}

/// Object-safe version of [`RecordTable`] with boxed futures.
///
/// A blanket implementation is provided for all types implementing `RecordTable`.
pub trait RecordTableDyn: Send + Sync {
    fn list_all_boxed(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Record>, TableError>> + Send + '_>>;

    fn create_boxed(
        &self,
        fields: Fields,
    ) -> Pin<Box<dyn Future<Output = Result<Record, TableError>> + Send + '_>>;

    fn update_boxed<'a>(
        &'a self,
        id: &'a RecordId,
        fields: Fields,
    ) -> Pin<Box<dyn Future<Output = Result<Record, TableError>> + Send + 'a>>;
}

impl<T: RecordTable> RecordTableDyn for T {
    fn list_all_boxed(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Record>, TableError>> + Send + '_>> {
        Box::pin(self.list_all())
    }

    fn create_boxed(
        &self,
        fields: Fields,
    ) -> Pin<Box<dyn Future<Output = Result<Record, TableError>> + Send + '_>> {
        Box::pin(self.create(fields))
    }

    fn update_boxed<'a>(
        &'a self,
        id: &'a RecordId,
        fields: Fields,
    ) -> Pin<Box<dyn Future<Output = Result<Record, TableError>> + Send + 'a>> {
        Box::pin(self.update(id, fields))
    }
}

/// Type-erased table for runtime backend selection (hosted vs in-memory).
pub struct BoxRecordTable {
    inner: Box<dyn RecordTableDyn + Send + Sync>,
}

impl BoxRecordTable {
    /// Wrap a concrete `RecordTable` in a type-erased box.
    pub fn new<T: RecordTable + 'static>(table: T) -> Self {
        Self {
            inner: Box::new(table),
        }
    }
}

impl RecordTable for BoxRecordTable {
    async fn list_all(&self) -> Result<Vec<Record>, TableError> {
        self.inner.list_all_boxed().await
    }

    async fn create(&self, fields: Fields) -> Result<Record, TableError> {
        self.inner.create_boxed(fields).await
    }

    async fn update(&self, id: &RecordId, fields: Fields) -> Result<Record, TableError> {
        self.inner.update_boxed(id, fields).await
    }
}

/// The four tables the data-entry flows work against.
pub struct Tables<T: RecordTable> {
    pub questions: T,
    pub companies: T,
    pub robots: T,
    pub feedback: T,
}

impl<T: RecordTable + 'static> Tables<T> {
    /// Erase the concrete table type.
    pub fn boxed(self) -> Tables<BoxRecordTable> {
        Tables {
            questions: BoxRecordTable::new(self.questions),
            companies: BoxRecordTable::new(self.companies),
            robots: BoxRecordTable::new(self.robots),
            feedback: BoxRecordTable::new(self.feedback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecTable {
        records: Mutex<Vec<Record>>,
    }

    impl RecordTable for VecTable {
        async fn list_all(&self) -> Result<Vec<Record>, TableError> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn create(&self, fields: Fields) -> Result<Record, TableError> {
            let mut records = self.records.lock().unwrap();
            let record = Record::new(format!("rec{}", records.len() + 1), fields);
            records.push(record.clone());
            Ok(record)
        }

        async fn update(&self, id: &RecordId, fields: Fields) -> Result<Record, TableError> {
            let mut records = self.records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|r| &r.id == id)
                .ok_or_else(|| TableError::NotFound(id.to_string()))?;
            record.fields.extend(fields);
            Ok(record.clone())
        }
    }

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("fields must be an object"),
        }
    }

    #[tokio::test]
    async fn test_box_record_table_delegates() {
        let table = BoxRecordTable::new(VecTable::default());

        let created = table.create(fields(json!({"Question": "Q1"}))).await.unwrap();
        let updated = table
            .update(&created.id, fields(json!({"Answers": "42"})))
            .await
            .unwrap();
        assert_eq!(updated.text("Answers"), Some("42"));
        assert_eq!(table.list_all().await.unwrap().len(), 1);

        let missing = table.update(&RecordId::from("recNope"), Fields::new()).await;
        assert!(matches!(missing, Err(TableError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_boxed_tables_future_is_send() {
        let tables = std::sync::Arc::new(
            Tables {
                questions: VecTable::default(),
                companies: VecTable::default(),
                robots: VecTable::default(),
                feedback: VecTable::default(),
            }
            .boxed(),
        );
        let handle = tokio::spawn({
            let tables = tables.clone();
            async move { tables.feedback.create(Fields::new()).await }
        });
        let created = handle.await.unwrap().unwrap();
        assert_eq!(created.id, RecordId::from("rec1"));
        assert!(tables.questions.list_all().await.unwrap().is_empty());
    }
}
