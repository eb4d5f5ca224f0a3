//! In-memory board view
//!
//! Holds the caller-side copy of the board list plus the active board
//! selection. Every mutation goes through [`BoardService`] and is followed by
//! a full refresh; nothing is applied to the view optimistically, so a failed
//! call leaves the view exactly as it was.

use tracing::{error, warn};

use crate::board::{Board, BoardService, ColumnKey, Task, TaskUpdate};
use crate::Result;

pub struct BoardView {
    service: BoardService,
    boards: Vec<Board>,
    active_board_id: Option<String>,
}

impl BoardView {
    /// Create an empty view; call [`BoardView::refresh`] to populate it
    pub fn new(service: BoardService) -> Self {
        Self {
            service,
            boards: Vec::new(),
            active_board_id: None,
        }
    }

    /// Create a view and fetch the current boards
    pub async fn load(service: BoardService) -> Result<Self> {
        let mut view = Self::new(service);
        view.refresh().await?;
        Ok(view)
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn active_board_id(&self) -> Option<&str> {
        self.active_board_id.as_deref()
    }

    pub fn active_board(&self) -> Option<&Board> {
        let id = self.active_board_id.as_deref()?;
        self.boards.iter().find(|b| b.id == id)
    }

    /// Select a board that is present in the view
    pub fn set_active_board(&mut self, board_id: &str) -> bool {
        if self.boards.iter().any(|b| b.id == board_id) {
            self.active_board_id = Some(board_id.to_string());
            true
        } else {
            warn!("Board with id {} not found", board_id);
            false
        }
    }

    /// Re-fetch every board from the service
    ///
    /// Falls back to the first board when nothing is selected or the selected
    /// board no longer exists.
    pub async fn refresh(&mut self) -> Result<()> {
        let boards = self.service.list_boards().await.map_err(|e| {
            error!("Failed to load boards: {}", e);
            e
        })?;

        let still_present = self
            .active_board_id
            .as_deref()
            .is_some_and(|id| boards.iter().any(|b| b.id == id));
        if !still_present {
            self.active_board_id = boards.first().map(|b| b.id.clone());
        }
        self.boards = boards;
        Ok(())
    }

    /// Refresh after a successful service call, log a failed one
    ///
    /// The service call has already been saved when it succeeds, so a failed
    /// refresh only leaves the view stale until the next refresh.
    async fn settle<T>(&mut self, action: &str, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                if let Err(e) = self.refresh().await {
                    error!("Failed to refresh boards after {}: {}", action, e);
                }
                Ok(value)
            }
            Err(e) => {
                error!("Failed to {}: {}", action, e);
                Err(e)
            }
        }
    }

    pub async fn create_board(&mut self, name: &str) -> Result<Board> {
        let result = self.service.create_board(name).await;
        self.settle("create board", result).await
    }

    pub async fn delete_board(&mut self, board_id: &str) -> Result<()> {
        let result = self.service.delete_board(board_id).await.map(|_| ());
        self.settle("delete board", result).await
    }

    /// Add a task to the active board; `None` when no board is active
    pub async fn add_task(&mut self, column: ColumnKey, title: &str) -> Result<Option<Task>> {
        let Some(board_id) = self.active_board_id.clone() else {
            return Ok(None);
        };
        let result = self.service.add_task(&board_id, column, title).await;
        self.settle("add task", result).await.map(Some)
    }

    /// Update a task on the active board; `None` when no board is active
    pub async fn update_task(
        &mut self,
        column: ColumnKey,
        task_id: &str,
        update: TaskUpdate,
    ) -> Result<Option<Task>> {
        let Some(board_id) = self.active_board_id.clone() else {
            return Ok(None);
        };
        let result = self
            .service
            .update_task(&board_id, column, task_id, update)
            .await;
        self.settle("update task", result).await.map(Some)
    }

    /// Delete a task from the active board; `false` when no board is active
    pub async fn delete_task(&mut self, column: ColumnKey, task_id: &str) -> Result<bool> {
        let Some(board_id) = self.active_board_id.clone() else {
            return Ok(false);
        };
        let result = self.service.delete_task(&board_id, column, task_id).await;
        self.settle("delete task", result).await.map(|_| true)
    }

    /// Move a task on the active board; `false` when no board is active
    pub async fn move_task(
        &mut self,
        source: ColumnKey,
        dest: ColumnKey,
        task_id: &str,
    ) -> Result<bool> {
        let Some(board_id) = self.active_board_id.clone() else {
            return Ok(false);
        };
        let result = self
            .service
            .move_task(&board_id, source, dest, task_id)
            .await;
        self.settle("move task", result).await.map(|_| true)
    }
}
