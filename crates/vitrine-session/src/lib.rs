//! Session handling for the Vitrine site backend.
//!
//! One signed JWT in an HTTP-only cookie carries the user's identity
//! (id, email, role). This crate owns the whole lifecycle: issuing and
//! validating the token ([`token`]), the cookie attributes ([`cookie`]),
//! resolving a request's session ([`session`]), the axum extractor for
//! handlers that require one ([`extract`]), and the pure page-route guard
//! ([`guard`]).

pub mod cookie;
pub mod extract;
pub mod guard;
pub mod session;
pub mod token;
