use async_trait::async_trait;

use super::RepoResult;
use crate::events::DocumentChange;

/// Delivers committed document changes to whoever runs the triggers
#[async_trait]
pub trait ChangePublisher: Send + Sync {
    async fn publish(&self, change: &DocumentChange) -> RepoResult<()>;
}
