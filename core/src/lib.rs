//! Core library for the personal task board
//!
//! This crate contains the board data layer, including:
//! - Board and task model with the fixed four-column layout
//! - Whole-collection JSON file persistence
//! - The board service (create, edit, complete, delete, move)
//! - An in-memory view that re-syncs after every mutation

pub mod board;
pub mod config;
pub mod error;
pub mod logging;
pub mod view;

pub use board::{Board, BoardService, ColumnKey, Task, TaskUpdate};
pub use config::{CorruptPolicy, StoreConfig};
pub use error::Error;
pub use view::BoardView;
pub type Result<T> = std::result::Result<T, Error>;
