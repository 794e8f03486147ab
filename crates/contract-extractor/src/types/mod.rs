//! Core data types

pub mod contract;
pub mod document;
pub mod task;

pub use contract::{AiExtraction, ExtractionResult};
pub use document::{FileType, ParsedDocument};
pub use task::{Task, TaskStatus};
