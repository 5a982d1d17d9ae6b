//! Networking modules for the course portal backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the session crate's `AuthApi` over `gloo-net`. Wire types
//! and envelope decoding live in `session` and are shared with the CLI.

pub mod api;
