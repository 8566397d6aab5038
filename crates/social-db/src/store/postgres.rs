//! PostgreSQL document store
//!
//! All collections share one JSONB table. Equality filters use JSONB
//! containment (`data @> $filters`), ordering is on a single top-level
//! field. Every write runs in a transaction with the touched rows locked
//! (`FOR UPDATE`), so counter increments never lose updates.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use std::sync::Arc;
use tracing::instrument;

use social_core::document::{
    apply_updates, Collection, Direction, Document, FieldUpdate, Fields, Query, WriteBatch, WriteOp,
};
use social_core::events::DocumentChange;
use social_core::traits::{ChangePublisher, DocumentStore, RepoResult};
use social_core::value_objects::DocumentId;
use social_core::DomainError;

use super::{noop_publisher, publish_changes};
use crate::models::DocumentRow;
use crate::repositories::map_db_error;

const SCHEMA: &str = include_str!("../../migrations/0001_documents.sql");

/// Statements of the schema file, skipping comment-only fragments
fn schema_statements() -> impl Iterator<Item = &'static str> {
    SCHEMA.split(';').map(str::trim).filter(|stmt| {
        stmt.lines()
            .any(|l| !l.trim().is_empty() && !l.trim_start().starts_with("--"))
    })
}

/// PostgreSQL implementation of DocumentStore
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    publisher: Arc<dyn ChangePublisher>,
}

impl PgDocumentStore {
    /// Create a new PgDocumentStore that publishes nowhere
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            publisher: noop_publisher(),
        }
    }

    /// Publish committed changes to the given publisher
    #[must_use]
    pub fn with_publisher(mut self, publisher: Arc<dyn ChangePublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    /// Create the documents table and its index if missing
    pub async fn ensure_schema(&self) -> RepoResult<()> {
        for statement in schema_statements() {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;
        }
        tracing::info!("Document schema ready");
        Ok(())
    }

    /// Run ops in one transaction, then publish what changed
    async fn write(&self, ops: Vec<WriteOp>) -> RepoResult<Vec<DocumentChange>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let mut changes = Vec::with_capacity(ops.len());

        for op in ops {
            if let Some(change) = apply_op(&mut *tx, op).await? {
                changes.push(change);
            }
        }

        tx.commit().await.map_err(map_db_error)?;
        publish_changes(self.publisher.as_ref(), &changes).await;
        Ok(changes)
    }
}

async fn lock_fields(
    conn: &mut PgConnection,
    collection: Collection,
    id: &DocumentId,
) -> RepoResult<Option<Fields>> {
    let row = sqlx::query_scalar::<_, Json<Fields>>(
        r#"
        SELECT data FROM documents
        WHERE collection = $1 AND id = $2
        FOR UPDATE
        "#,
    )
    .bind(collection.name())
    .bind(id.as_str())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(row.map(|Json(fields)| fields))
}

async fn upsert(
    conn: &mut PgConnection,
    collection: Collection,
    id: &DocumentId,
    fields: &Fields,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO documents (collection, id, data)
        VALUES ($1, $2, $3)
        ON CONFLICT (collection, id)
        DO UPDATE SET data = EXCLUDED.data, updated_at = now()
        "#,
    )
    .bind(collection.name())
    .bind(id.as_str())
    .bind(Json(fields))
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

async fn apply_op(conn: &mut PgConnection, op: WriteOp) -> RepoResult<Option<DocumentChange>> {
    match op {
        WriteOp::Set {
            collection,
            id,
            fields,
        } => {
            let before = lock_fields(conn, collection, &id).await?;
            upsert(conn, collection, &id, &fields).await?;
            Ok(Some(DocumentChange::written(collection, id, before, fields)))
        }
        WriteOp::Update {
            collection,
            id,
            updates,
        } => {
            let before = lock_fields(conn, collection, &id).await?.ok_or_else(|| {
                DomainError::DocumentNotFound {
                    collection,
                    id: id.to_string(),
                }
            })?;
            let mut after = before.clone();
            apply_updates(&mut after, &updates);
            upsert(conn, collection, &id, &after).await?;
            Ok(Some(DocumentChange::updated(collection, id, before, after)))
        }
        WriteOp::Delete { collection, id } => {
            let removed = sqlx::query_scalar::<_, Json<Fields>>(
                r#"
                DELETE FROM documents
                WHERE collection = $1 AND id = $2
                RETURNING data
                "#,
            )
            .bind(collection.name())
            .bind(id.as_str())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

            Ok(removed.map(|Json(before)| DocumentChange::deleted(collection, id, before)))
        }
    }
}

fn row_to_document(row: DocumentRow) -> RepoResult<Document> {
    let id = DocumentId::parse(&row.id)
        .map_err(|e| DomainError::DatabaseError(format!("stored id {:?}: {e}", row.id)))?;
    Ok(Document::new(id, row.data.0))
}

/// Equality filters as a JSONB containment object
fn filter_object(query: &Query) -> Value {
    Value::Object(
        query
            .filters
            .iter()
            .map(|f| (f.field.clone(), f.value.clone()))
            .collect(),
    )
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    #[instrument(skip(self))]
    async fn get(&self, collection: Collection, id: &DocumentId) -> RepoResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.name())
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(row_to_document).transpose()
    }

    #[instrument(skip(self), fields(collection = %query.collection))]
    async fn query(&self, query: &Query) -> RepoResult<Vec<Document>> {
        let limit = query.limit.map(|l| l as i64);

        let rows = match &query.order_by {
            Some(order) => {
                let dir = match order.direction {
                    Direction::Asc => "ASC",
                    Direction::Desc => "DESC",
                };
                // Numbers sort numerically, everything else by its text form in byte order
                let sql = format!(
                    r#"
                    SELECT id, data, created_at, updated_at
                    FROM documents
                    WHERE collection = $1 AND data @> $2
                    ORDER BY
                        CASE WHEN jsonb_typeof(data -> $3) = 'number'
                             THEN (data ->> $3)::numeric END {dir},
                        (data ->> $3) COLLATE "C" {dir},
                        id
                    LIMIT $4
                    "#
                );
                sqlx::query_as::<_, DocumentRow>(&sql)
                    .bind(query.collection.name())
                    .bind(filter_object(query))
                    .bind(&order.field)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query_as::<_, DocumentRow>(
                    r#"
                    SELECT id, data, created_at, updated_at
                    FROM documents
                    WHERE collection = $1 AND data @> $2
                    ORDER BY id
                    LIMIT $3
                    "#,
                )
                .bind(query.collection.name())
                .bind(filter_object(query))
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        rows.into_iter().map(row_to_document).collect()
    }

    #[instrument(skip(self, fields))]
    async fn add(&self, collection: Collection, fields: Fields) -> RepoResult<DocumentId> {
        let id = DocumentId::generate();
        self.write(vec![WriteOp::Set {
            collection,
            id: id.clone(),
            fields,
        }])
        .await?;
        Ok(id)
    }

    #[instrument(skip(self, fields))]
    async fn set(&self, collection: Collection, id: &DocumentId, fields: Fields) -> RepoResult<()> {
        self.write(vec![WriteOp::Set {
            collection,
            id: id.clone(),
            fields,
        }])
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        updates: &[FieldUpdate],
    ) -> RepoResult<Document> {
        let changes = self
            .write(vec![WriteOp::Update {
                collection,
                id: id.clone(),
                updates: updates.to_vec(),
            }])
            .await?;

        changes
            .into_iter()
            .next()
            .and_then(|c| c.after)
            .map(|fields| Document::new(id.clone(), fields))
            .ok_or_else(|| DomainError::InternalError("update produced no change".to_string()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: Collection, id: &DocumentId) -> RepoResult<()> {
        self.write(vec![WriteOp::Delete {
            collection,
            id: id.clone(),
        }])
        .await?;
        Ok(())
    }

    #[instrument(skip(self, batch), fields(ops = batch.len()))]
    async fn commit(&self, batch: WriteBatch) -> RepoResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        self.write(batch.into_ops()).await?;
        Ok(())
    }

    async fn health_check(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
