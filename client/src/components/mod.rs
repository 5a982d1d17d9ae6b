//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared `AuthState` and guard handle from Leptos
//! context provided by `App`.

pub mod protected_route;
pub mod session_header;
