//! Reusable UI components shared across pages.

pub mod side_menu;
pub mod toast_stack;
