//! Shared client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `observable` and `context` are the primitives; `setting`, `databases`,
//! `history` and `books` mirror host state on top of them; `services` wires
//! everything to one gateway and `ui` names the context keys views read.

pub mod books;
pub mod context;
pub mod databases;
pub mod history;
pub mod observable;
pub mod preferences;
pub mod services;
pub mod setting;
pub mod ui;
