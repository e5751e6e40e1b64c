//! # cellchat Core
//!
//! Domain types for building chat context out of a notebook session:
//! role-tagged messages, the values a cell can produce, and the history
//! source the context assembler reads from.
//!
//! This crate has **no rendering logic**. It defines the model that the
//! context crate formats and the CLI loads from disk.

pub mod error;
pub mod history;
pub mod message;
pub mod value;

// Re-export key types at crate root for ergonomics
pub use error::HistoryError;
pub use history::{HistorySource, SessionHistory};
pub use message::{Context, Message, Role};
pub use value::{OutputValue, Series, Table};
