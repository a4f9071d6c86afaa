//! Game tips backend: a JSON API over games, experience levels, tips and
//! reports stored in MongoDB. Exposed as a library for the binaries and the
//! integration tests.

/// Runtime configuration read from the environment.
pub mod config;
/// Entities, identifier codec and the persistence gateway.
pub mod dao;
/// Request and response bodies.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// HTTP routes and middleware.
pub mod routes;
/// Endpoint logic and batch operations.
pub mod services;
/// State shared by every request.
pub mod state;
