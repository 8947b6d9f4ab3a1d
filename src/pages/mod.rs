//! Top-level routed pages.

pub mod book;
pub mod library;
pub mod settings;
