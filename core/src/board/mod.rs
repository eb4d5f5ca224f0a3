//! Board management
//!
//! Boards with the fixed four-column layout (Today, This Week, Future,
//! Completed), their persistence, and the service that mutates them.

mod file_store;
mod model;
mod repository;
mod service;

pub use file_store::FileBoardStore;
pub use model::*;
pub use repository::{BoardRepository, MemoryBoardStore};
pub use service::BoardService;
