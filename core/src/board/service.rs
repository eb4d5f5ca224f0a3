//! Board service
//!
//! Every operation is one load → mutate → save unit over the whole
//! collection. A failing mutation returns before `save`, so durable state
//! is never partially updated. There is no locking: overlapping calls from
//! different callers race and the last writer wins.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::file_store::FileBoardStore;
use super::model::{normalize_label, Board, ColumnKey, Task, TaskUpdate};
use super::repository::BoardRepository;
use crate::config::StoreConfig;
use crate::error::Error;
use crate::Result;

/// Board and task operations on top of a [`BoardRepository`]
#[derive(Clone)]
pub struct BoardService {
    repository: Arc<dyn BoardRepository>,
}

impl BoardService {
    pub fn new(repository: Arc<dyn BoardRepository>) -> Self {
        Self { repository }
    }

    /// Service backed by the board file described by `config`
    pub fn open(config: &StoreConfig) -> Self {
        Self::new(Arc::new(FileBoardStore::from_config(config)))
    }

    /// Load, apply `apply`, and save when it reports a change
    async fn mutate<T, F>(&self, apply: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut Vec<Board>) -> Result<(T, bool)> + Send,
    {
        let mut boards = self.repository.load().await?;
        let (value, changed) = apply(&mut boards)?;
        if changed {
            self.repository.save(&boards).await?;
        }
        Ok(value)
    }

    /// All boards in stored order
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        let boards = self.repository.load().await?;
        debug!("Listed {} boards", boards.len());
        Ok(boards)
    }

    /// Append a new empty board to the collection
    pub async fn create_board(&self, name: &str) -> Result<Board> {
        let board = Board::new(normalize_label("Board name", name)?);

        let created = board.clone();
        self.mutate(move |boards| {
            boards.push(board);
            Ok(((), true))
        })
        .await?;

        info!("Created board {} ({})", created.name, created.id);
        Ok(created)
    }

    /// Remove a board if present and return the remaining collection
    pub async fn delete_board(&self, board_id: &str) -> Result<Vec<Board>> {
        let (remaining, removed) = self
            .mutate(|boards| {
                let before = boards.len();
                boards.retain(|b| b.id != board_id);
                let removed = boards.len() != before;
                Ok(((boards.clone(), removed), removed))
            })
            .await?;

        if removed {
            info!("Deleted board {}", board_id);
        } else {
            debug!("Board {} not present; nothing deleted", board_id);
        }
        Ok(remaining)
    }

    /// Append a new open task to the end of `column`
    pub async fn add_task(&self, board_id: &str, column: ColumnKey, title: &str) -> Result<Task> {
        let task = Task::new(normalize_label("Task title", title)?);

        let created = task.clone();
        self.mutate(move |boards| {
            let board = find_board_mut(boards, board_id)?;
            board.columns.get_mut(column).push(task);
            Ok(((), true))
        })
        .await?;

        info!("Added task {} to {} on board {}", created.id, column, board_id);
        Ok(created)
    }

    /// Merge the provided fields into a task, keeping its position
    pub async fn update_task(
        &self,
        board_id: &str,
        column: ColumnKey,
        task_id: &str,
        update: TaskUpdate,
    ) -> Result<Task> {
        let title = update
            .title
            .as_deref()
            .map(|title| normalize_label("Task title", title))
            .transpose()?;
        let completed = update.completed;
        let changed = !update.is_empty();

        let updated = self
            .mutate(move |boards| {
                let board = find_board_mut(boards, board_id)?;
                let task = board
                    .columns
                    .get_mut(column)
                    .iter_mut()
                    .find(|t| t.id == task_id)
                    .ok_or_else(|| task_not_found(task_id, column))?;

                if let Some(title) = title {
                    task.title = title;
                }
                if let Some(completed) = completed {
                    task.completed = completed;
                }
                Ok((task.clone(), changed))
            })
            .await?;

        if changed {
            info!("Updated task {} on board {}", task_id, board_id);
        } else {
            debug!("Empty update for task {}; nothing saved", task_id);
        }
        Ok(updated)
    }

    /// Remove a task from `column`; unknown task ids are ignored
    pub async fn delete_task(&self, board_id: &str, column: ColumnKey, task_id: &str) -> Result<()> {
        let removed = self
            .mutate(|boards| {
                let board = find_board_mut(boards, board_id)?;
                let tasks = board.columns.get_mut(column);
                let before = tasks.len();
                tasks.retain(|t| t.id != task_id);
                let removed = tasks.len() != before;
                Ok((removed, removed))
            })
            .await?;

        if removed {
            info!("Deleted task {} from {} on board {}", task_id, column, board_id);
        } else {
            debug!("Task {} not present in {}; nothing deleted", task_id, column);
        }
        Ok(())
    }

    /// Move a task to the end of `dest`
    ///
    /// The task is always removed and re-appended, so moving within the same
    /// column sends it to the bottom of that column.
    pub async fn move_task(
        &self,
        board_id: &str,
        source: ColumnKey,
        dest: ColumnKey,
        task_id: &str,
    ) -> Result<()> {
        self.mutate(|boards| {
            let board = find_board_mut(boards, board_id)?;
            let source_tasks = board.columns.get_mut(source);
            let index = source_tasks
                .iter()
                .position(|t| t.id == task_id)
                .ok_or_else(|| task_not_found(task_id, source))?;

            let task = source_tasks.remove(index);
            board.columns.get_mut(dest).push(task);
            Ok(((), true))
        })
        .await?;

        info!(
            "Moved task {} from {} to {} on board {}",
            task_id, source, dest, board_id
        );
        Ok(())
    }
}

fn find_board_mut<'a>(boards: &'a mut [Board], board_id: &str) -> Result<&'a mut Board> {
    boards.iter_mut().find(|b| b.id == board_id).ok_or_else(|| {
        warn!("Board {} not found", board_id);
        Error::BoardNotFound(board_id.to_string())
    })
}

fn task_not_found(task_id: &str, column: ColumnKey) -> Error {
    warn!("Task {} not found in {}", task_id, column);
    Error::TaskNotFound(task_id.to_string())
}
