//! # cli
//!
//! Terminal client for the course portal. Wires the `session` guard to a
//! reqwest backend adapter, an on-disk cookie jar and a navigator that
//! reports redirects on the terminal.

pub mod commands;
pub mod error;
pub mod http;
pub mod jar;
pub mod nav;

pub use error::CliError;

/// Session guard as assembled by the terminal client.
pub type CliGuard = session::SessionGuard<http::HttpAuthApi, jar::CookieJar, nav::TerminalNavigator>;
