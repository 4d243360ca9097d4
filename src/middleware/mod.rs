//! Middleware modules for request processing.
//!
//! - [`auth`]: Session verification extractors. Every protected request
//!   passes through one of them; validation is signature, expiry, token
//!   type, then revocation, and the first failure rejects the request.
//! - [`admin`]: Admin-only gate on top of [`auth::AuthUser`], keyed on
//!   the `is_admin` claim.

pub mod admin;
pub mod auth;
