//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page is rendered inside `ProtectedRoute`; pages assume the guard has
//! already decided the visitor may see them.

pub mod home;
pub mod login;
