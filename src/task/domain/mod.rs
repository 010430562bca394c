//! Domain model for synchronized vendor tasks.
//!
//! Tasks, comments, and reciprocal links are plain values here; talking to
//! vendors and to the record store happens behind the ports.

mod category;
mod comment;
mod error;
mod ids;
mod link;
mod status;
mod task;
mod vocabulary;

pub use category::{TaskCategory, TaskField};
pub use comment::Comment;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{CommentId, VendorName, VendorTaskId, VendorTaskKey};
pub use link::ReciprocalLink;
pub use status::TaskStatus;
pub use task::Task;
pub use vocabulary::{StatusVocabulary, StatusWord};
