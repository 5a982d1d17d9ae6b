//! Session guard for the course portal front ends.
//!
//! This crate owns the authentication contract shared by `cli` and `client`:
//! the user/token model, the session state machine, route authorization and
//! post-login routing. It performs no I/O itself. Runtimes plug in a backend
//! ([`AuthApi`]), a credential store ([`TokenStore`]) and a router
//! ([`Navigator`]) and drive [`SessionGuard`] from their own event loop.
//!
//! ARCHITECTURE
//! ============
//! - `types`: wire DTOs (`User`, `Role`, `LoginGrant`, ...).
//! - `envelope`: the `{ data, message, status }` response wrapper.
//! - `state`: `SessionState` and its transitions.
//! - `routes`: route constants, `authorize`, redirect helpers.
//! - `store`: cookie policy and the `TokenStore` seam.
//! - `api`: the `AuthApi` seam and `ApiError`.
//! - `guard`: the async driver tying the pieces together.

pub mod api;
pub mod envelope;
pub mod guard;
pub mod routes;
pub mod state;
pub mod store;
pub mod types;

pub use api::{ApiError, AuthApi};
pub use envelope::Envelope;
pub use guard::{Navigator, REVALIDATE_INTERVAL, SessionError, SessionGuard};
pub use routes::{Access, authorize};
pub use state::{SessionState, TokenPair, Transition};
pub use store::{StoreError, StoredCredentials, TokenStore};
pub use types::{AccountSummary, Credentials, LoginGrant, RegisterForm, Role, User, UserId};
