//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (cookies, router
//! wiring, timers) from page and component logic.

pub mod auth;
pub mod cookies;
