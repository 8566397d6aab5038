//! Document-store implementation of UserRepository
//!
//! A user is two documents keyed by handle: the public profile in `users`
//! and the login credentials in `credentials`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use social_core::document::{to_fields, Collection, FieldUpdate, Query, WriteBatch};
use social_core::entities::{User, UserDetails};
use social_core::traits::{DocumentStore, RepoResult, UserRepository};
use social_core::value_objects::DocumentId;
use social_core::DomainError;

use super::not_found_as;
use crate::mappers::DocumentMapper;
use crate::models::{field, CredentialsDocument};

/// Document-store implementation of UserRepository
#[derive(Clone)]
pub struct DocUserRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocUserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn update_fields(&self, handle: &str, updates: Vec<FieldUpdate>) -> RepoResult<()> {
        let id = handle_id(handle).ok_or_else(|| DomainError::UserNotFound(handle.to_string()))?;
        self.store
            .update(Collection::Users, &id, &updates)
            .await
            .map_err(|e| not_found_as(e, || DomainError::UserNotFound(handle.to_string())))?;
        Ok(())
    }
}

/// Handles double as document ids; a handle that can't be one can't exist
fn handle_id(handle: &str) -> Option<DocumentId> {
    DocumentId::parse(handle).ok()
}

#[async_trait]
impl UserRepository for DocUserRepository {
    #[instrument(skip(self))]
    async fn find_by_handle(&self, handle: &str) -> RepoResult<Option<User>> {
        let Some(id) = handle_id(handle) else {
            return Ok(None);
        };
        self.store
            .get(Collection::Users, &id)
            .await?
            .map(|doc| User::from_document(&doc))
            .transpose()
    }

    #[instrument(skip(self))]
    async fn handle_exists(&self, handle: &str) -> RepoResult<bool> {
        let Some(id) = handle_id(handle) else {
            return Ok(false);
        };
        Ok(self.store.get(Collection::Users, &id).await?.is_some())
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let query = Query::new(Collection::Users)
            .where_eq(field::EMAIL, email)
            .limit(1);
        Ok(!self.store.query(&query).await?.is_empty())
    }

    #[instrument(skip(self, user, password_hash), fields(handle = %user.handle))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let id = DocumentId::parse(&user.handle)
            .map_err(|e| DomainError::invalid_field("handle", e.to_string()))?;

        let credentials = to_fields(&CredentialsDocument {
            email: user.email.clone(),
            password_hash: password_hash.to_string(),
        })?;

        let mut batch = WriteBatch::new();
        batch
            .set(Collection::Users, id.clone(), user.to_fields()?)
            .set(Collection::Credentials, id, credentials);
        self.store.commit(batch).await
    }

    #[instrument(skip(self))]
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> RepoResult<Option<(String, String)>> {
        let query = Query::new(Collection::Credentials)
            .where_eq(field::EMAIL, email)
            .limit(1);

        let Some(doc) = self.store.query(&query).await?.into_iter().next() else {
            return Ok(None);
        };
        let credentials: CredentialsDocument = doc.decode()?;
        Ok(Some((doc.id.into_inner(), credentials.password_hash)))
    }

    #[instrument(skip(self, details))]
    async fn update_details(&self, handle: &str, details: &UserDetails) -> RepoResult<()> {
        let updates: Vec<FieldUpdate> = [
            (field::BIO, &details.bio),
            (field::WEBSITE, &details.website),
            (field::LOCATION, &details.location),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| FieldUpdate::set(name, v.as_str())))
        .collect();

        if updates.is_empty() {
            return Ok(());
        }
        self.update_fields(handle, updates).await
    }

    #[instrument(skip(self))]
    async fn update_image(&self, handle: &str, image_url: &str) -> RepoResult<()> {
        self.update_fields(handle, vec![FieldUpdate::set(field::IMAGE_URL, image_url)])
            .await
    }
}
