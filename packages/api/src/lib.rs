//! # API crate: REST surface of Stickies
//!
//! This crate owns everything that crosses the wire between the board UI and the
//! server: the request/response payloads, the axum router that serves them and the
//! typed client that calls them.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`models`] | always | Wire payloads; server-side `User` and `NoteRow` records under `server` |
//! | [`auth`] | `server` | Argon2id password hashing, HS256 bearer tokens, the `AuthUser` extractor |
//! | [`db`] | `server` | The `Database` trait with PostgreSQL and in-memory implementations |
//! | [`error`] | `server` | `ApiError` / `AuthError` and their mapping to HTTP responses |
//! | [`routes`] | `server` | The router, its shared state and the handlers |
//! | [`settings`] | `server` | Configuration from `config.toml`, `.env` and the environment |
//! | [`validation`] | `server` | Username, email and profile image rules |
//! | [`client`] | `client` | `ApiClient`, a `reqwest` client for every endpoint |
//!
//! ## Authentication
//!
//! `POST /register` and `POST /login` answer with `{token, user}`. Every other route
//! expects `Authorization: Bearer <token>` and only ever touches rows owned by the
//! user the token names. Tokens are stateless; signing out is dropping the token.

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "server")]
pub mod db;
#[cfg(feature = "server")]
pub mod error;
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod settings;
#[cfg(feature = "server")]
pub mod validation;

#[cfg(feature = "client")]
pub use client::{ApiClient, ClientError, ClientResult};
#[cfg(feature = "server")]
pub use routes::{router, ApiState};
#[cfg(feature = "server")]
pub use settings::Settings;

pub use models::UserInfo;
