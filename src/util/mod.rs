//! Helpers shared by pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser-only effects (console logging, the `data-theme` attribute, timers)
//! are gated here behind `csr` so the rest of the crate builds and tests natively.

pub mod i18n;
pub mod logging;
pub mod notify;
pub mod reactive;
pub mod theme;
