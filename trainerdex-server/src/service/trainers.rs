//! Trainer workflow
//!
//! Stateless per-call orchestration over a [`TrainerStore`]. Every write
//! validates required fields first, then checks name/email uniqueness, then
//! hits storage. On update, a value kept unchanged is exempt from the
//! uniqueness check.
//!
//! The count-then-write sequence is racy under concurrent writers; the
//! UNIQUE constraints on the table catch what slips through, surfacing as
//! [`TrainerError::Storage`].

use crate::db::repos::{DbError, Trainer, TrainerStore};
use crate::models::{TrainerEmail, TrainerName, ValidationError};

/// Workflow error taxonomy. The HTTP layer maps these onto status codes
/// without translation.
#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    /// Lookup or filter yielded no rows
    #[error("{0}")]
    NotFound(String),

    /// Name collides with another trainer
    #[error("this name is already in use")]
    DuplicateName,

    /// Email collides with another trainer
    #[error("this email address is already in use")]
    DuplicateEmail,

    /// Missing or malformed required field
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Underlying storage failure, including constraint violations the
    /// pre-checks did not catch
    #[error(transparent)]
    Storage(#[from] DbError),
}

/// Trainer workflow over an injected store
pub struct TrainerService<S> {
    store: S,
}

impl<S: TrainerStore> TrainerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All trainers, ordered by id. An empty table is NotFound; the list
    /// endpoints treat "nothing matched" uniformly, unfiltered included.
    pub async fn find_all(&self) -> Result<Vec<Trainer>, TrainerError> {
        let trainers = self.store.find_all().await?;
        if trainers.is_empty() {
            return Err(TrainerError::NotFound("no trainers are registered".into()));
        }
        Ok(trainers)
    }

    pub async fn find_by_name_starting_with(
        &self,
        prefix: &str,
    ) -> Result<Vec<Trainer>, TrainerError> {
        let trainers = self.store.find_by_name_starting_with(prefix).await?;
        if trainers.is_empty() {
            return Err(TrainerError::NotFound(format!(
                "no trainers whose name starts with '{prefix}'"
            )));
        }
        Ok(trainers)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Trainer>, TrainerError> {
        let trainers = self.store.find_by_name(name).await?;
        if trainers.is_empty() {
            return Err(TrainerError::NotFound(format!(
                "no trainers with a name matching '{name}'"
            )));
        }
        Ok(trainers)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Vec<Trainer>, TrainerError> {
        let trainers = self.store.find_by_email(email).await?;
        if trainers.is_empty() {
            return Err(TrainerError::NotFound(format!(
                "no trainers using the email address '{email}'"
            )));
        }
        Ok(trainers)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Trainer, TrainerError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| TrainerError::NotFound(format!("no trainer with id {id}")))
    }

    /// Create a trainer. Email uniqueness is checked before name
    /// uniqueness; the returned trainer carries its assigned id.
    pub async fn create(&self, name: &str, email: &str) -> Result<Trainer, TrainerError> {
        let name = TrainerName::new(name)?;
        let email = TrainerEmail::new(email)?;

        if !self.is_email_unique(email.as_str()).await? {
            return Err(TrainerError::DuplicateEmail);
        }
        if !self.is_name_unique(name.as_str()).await? {
            return Err(TrainerError::DuplicateName);
        }

        Ok(self.store.insert(name.as_str(), email.as_str()).await?)
    }

    /// Update name and email of an existing trainer.
    pub async fn update(&self, id: i32, name: &str, email: &str) -> Result<(), TrainerError> {
        let existing = self.find_by_id(id).await?;

        let name = TrainerName::new(name)?;
        let email = TrainerEmail::new(email)?;

        // A value kept unchanged never collides with itself.
        if email.as_str() != existing.email && !self.is_email_unique(email.as_str()).await? {
            return Err(TrainerError::DuplicateEmail);
        }
        if name.as_str() != existing.name && !self.is_name_unique(name.as_str()).await? {
            return Err(TrainerError::DuplicateName);
        }

        self.store.update(id, name.as_str(), email.as_str()).await?;
        Ok(())
    }

    /// Delete a trainer. The store treats an absent id as a zero-row
    /// no-op; here that surfaces as NotFound.
    pub async fn delete(&self, id: i32) -> Result<(), TrainerError> {
        let affected = self.store.delete(id).await?;
        if affected == 0 {
            return Err(TrainerError::NotFound(format!("no trainer with id {id}")));
        }
        Ok(())
    }

    async fn is_name_unique(&self, name: &str) -> Result<bool, TrainerError> {
        Ok(self.store.count_by_name(name).await? == 0)
    }

    async fn is_email_unique(&self, email: &str) -> Result<bool, TrainerError> {
        Ok(self.store.count_by_email(email).await? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory store double mirroring the Postgres repo's semantics.
    struct MemoryStore {
        rows: Mutex<Vec<Trainer>>,
    }

    impl MemoryStore {
        fn empty() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
            }
        }

        /// The reference dataset used across the read/write cases.
        fn seeded() -> Self {
            Self {
                rows: Mutex::new(vec![
                    trainer(1, "Zeiyu", "Zeiyu498@merry.bluebe"),
                    trainer(2, "Sazare", "Sazare318@heisei.bluebe"),
                    trainer(3, "Briar", "Briar8931@usagica.bluebe"),
                ]),
            }
        }
    }

    fn trainer(id: i32, name: &str, email: &str) -> Trainer {
        Trainer {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
        }
    }

    #[async_trait]
    impl TrainerStore for MemoryStore {
        async fn find_all(&self) -> Result<Vec<Trainer>, DbError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_name_starting_with(&self, prefix: &str) -> Result<Vec<Trainer>, DbError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|t| t.name.starts_with(prefix))
                .cloned()
                .collect())
        }

        async fn find_by_name(&self, name: &str) -> Result<Vec<Trainer>, DbError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|t| t.name.contains(name))
                .cloned()
                .collect())
        }

        async fn find_by_email(&self, email: &str) -> Result<Vec<Trainer>, DbError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|t| t.email == email).cloned().collect())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Trainer>, DbError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|t| t.id == id).cloned())
        }

        async fn insert(&self, name: &str, email: &str) -> Result<Trainer, DbError> {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let row = trainer(id, name, email);
            rows.push(row.clone());
            Ok(row)
        }

        async fn update(&self, id: i32, name: &str, email: &str) -> Result<u64, DbError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|t| t.id == id) {
                Some(row) => {
                    row.name = name.to_owned();
                    row.email = email.to_owned();
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn delete(&self, id: i32) -> Result<u64, DbError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|t| t.id != id);
            Ok((before - rows.len()) as u64)
        }

        async fn count_by_name(&self, name: &str) -> Result<i64, DbError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|t| t.name == name).count() as i64)
        }

        async fn count_by_email(&self, email: &str) -> Result<i64, DbError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|t| t.email == email).count() as i64)
        }
    }

    fn seeded_service() -> TrainerService<MemoryStore> {
        TrainerService::new(MemoryStore::seeded())
    }

    #[tokio::test]
    async fn find_by_id_returns_existing_trainer() {
        let service = seeded_service();
        let found = service.find_by_id(1).await.unwrap();
        assert_eq!(found, trainer(1, "Zeiyu", "Zeiyu498@merry.bluebe"));
    }

    #[tokio::test]
    async fn find_by_id_missing_is_not_found() {
        let service = seeded_service();
        let err = service.find_by_id(999).await.unwrap_err();
        assert!(matches!(err, TrainerError::NotFound(ref msg) if msg == "no trainer with id 999"));
    }

    #[tokio::test]
    async fn find_all_returns_everything_in_id_order() {
        let service = seeded_service();
        let all = service.find_all().await.unwrap();
        assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn find_all_on_empty_store_is_not_found() {
        let service = TrainerService::new(MemoryStore::empty());
        let err = service.find_all().await.unwrap_err();
        assert!(matches!(err, TrainerError::NotFound(_)));
    }

    #[tokio::test]
    async fn prefix_search_matches_only_prefixes() {
        let service = seeded_service();
        let matches = service.find_by_name_starting_with("Ze").await.unwrap();
        assert_eq!(matches, vec![trainer(1, "Zeiyu", "Zeiyu498@merry.bluebe")]);
    }

    #[tokio::test]
    async fn prefix_search_without_matches_is_not_found() {
        let service = seeded_service();
        let err = service.find_by_name_starting_with("Ku").await.unwrap_err();
        assert!(matches!(err, TrainerError::NotFound(_)));
    }

    #[tokio::test]
    async fn name_search_matches_substrings() {
        let service = seeded_service();
        let matches = service.find_by_name("azar").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, 2);
    }

    #[tokio::test]
    async fn email_search_is_exact() {
        let service = seeded_service();
        let matches = service.find_by_email("Sazare318@heisei.bluebe").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, 2);

        let err = service.find_by_email("unknown@example.com").await.unwrap_err();
        assert!(matches!(err, TrainerError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_assigns_id_and_round_trips() {
        let service = seeded_service();
        let created = service
            .create("New", "newtrainer@example.com")
            .await
            .unwrap();
        assert_eq!(created.id, 4);

        let found = service.find_by_id(created.id).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn create_with_taken_email_is_duplicate_email() {
        let service = seeded_service();
        let err = service
            .create("Different Name", "Zeiyu498@merry.bluebe")
            .await
            .unwrap_err();
        assert!(matches!(err, TrainerError::DuplicateEmail));
    }

    #[tokio::test]
    async fn create_with_taken_name_is_duplicate_name() {
        let service = seeded_service();
        let err = service
            .create("Zeiyu", "different@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, TrainerError::DuplicateName));
    }

    #[tokio::test]
    async fn create_checks_email_before_name() {
        // Both taken; the email check wins.
        let service = seeded_service();
        let err = service
            .create("Zeiyu", "Zeiyu498@merry.bluebe")
            .await
            .unwrap_err();
        assert!(matches!(err, TrainerError::DuplicateEmail));
    }

    #[tokio::test]
    async fn create_rejects_blank_fields() {
        let service = seeded_service();

        let err = service.create("", "valid@example.com").await.unwrap_err();
        assert!(matches!(
            err,
            TrainerError::Invalid(ValidationError::Empty { field: "name" })
        ));

        let err = service.create("Valid", "   ").await.unwrap_err();
        assert!(matches!(
            err,
            TrainerError::Invalid(ValidationError::Empty { field: "email" })
        ));
    }

    #[tokio::test]
    async fn create_rejects_email_with_spaces() {
        let service = seeded_service();
        let err = service
            .create("Valid", "has space@example.com")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TrainerError::Invalid(ValidationError::InvalidFormat { .. })
        ));
    }

    #[tokio::test]
    async fn update_rewrites_both_fields() {
        let service = seeded_service();
        service
            .update(1, "Updated", "updated@example.com")
            .await
            .unwrap();

        let found = service.find_by_id(1).await.unwrap();
        assert_eq!(found, trainer(1, "Updated", "updated@example.com"));
    }

    #[tokio::test]
    async fn update_with_own_values_is_exempt_from_uniqueness() {
        let service = seeded_service();
        // Both values already "exist" in storage, on this very record.
        service
            .update(1, "Zeiyu", "Zeiyu498@merry.bluebe")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_to_another_trainers_values_is_rejected() {
        let service = seeded_service();

        let err = service
            .update(1, "Zeiyu", "Sazare318@heisei.bluebe")
            .await
            .unwrap_err();
        assert!(matches!(err, TrainerError::DuplicateEmail));

        let err = service
            .update(1, "Sazare", "Zeiyu498@merry.bluebe")
            .await
            .unwrap_err();
        assert!(matches!(err, TrainerError::DuplicateName));
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let service = seeded_service();
        let err = service
            .update(100, "Updated", "updated@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, TrainerError::NotFound(ref msg) if msg == "no trainer with id 100"));
    }

    #[tokio::test]
    async fn update_rejects_blank_fields() {
        let service = seeded_service();
        let err = service.update(1, "", "updated@example.com").await.unwrap_err();
        assert!(matches!(err, TrainerError::Invalid(_)));
    }

    #[tokio::test]
    async fn delete_then_find_is_not_found() {
        let service = seeded_service();
        service.delete(2).await.unwrap();

        let err = service.find_by_id(2).await.unwrap_err();
        assert!(matches!(err, TrainerError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let service = seeded_service();
        let err = service.delete(100).await.unwrap_err();
        assert!(matches!(err, TrainerError::NotFound(_)));
    }
}
