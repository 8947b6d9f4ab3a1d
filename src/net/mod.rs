//! Networking modules for the host command/event bridge.
//!
//! SYSTEM CONTEXT
//! ==============
//! `bridge` defines the transport seam, `tauri` implements it inside the
//! desktop webview, `gateway` is the single chokepoint every command goes
//! through, and `events` routes host push notifications into stores.

pub mod bridge;
pub mod events;
#[cfg(test)]
pub(crate) mod fake_bridge;
pub mod gateway;
#[cfg(feature = "csr")]
pub mod tauri;
