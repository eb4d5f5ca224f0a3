//! Board repository trait
//!
//! The persistence seam: the whole collection is loaded and saved at once.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::Board;
use crate::Result;

/// Whole-collection storage for boards
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Read every board, in stored order
    async fn load(&self) -> Result<Vec<Board>>;

    /// Replace the stored collection
    async fn save(&self, boards: &[Board]) -> Result<()>;
}

/// In-process repository, mostly for embedding and tests
#[derive(Default)]
pub struct MemoryBoardStore {
    boards: RwLock<Vec<Board>>,
}

impl MemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardRepository for MemoryBoardStore {
    async fn load(&self) -> Result<Vec<Board>> {
        Ok(self.boards.read().await.clone())
    }

    async fn save(&self, boards: &[Board]) -> Result<()> {
        *self.boards.write().await = boards.to_vec();
        Ok(())
    }
}
