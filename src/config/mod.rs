//! Configuration modules for the Authgate API.
//!
//! Each submodule handles a specific aspect of configuration, typically
//! loaded from environment variables:
//!
//! - [`auth`]: Administrator identity and OTP challenge lifetime
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL database connection pool initialization
//! - [`email`]: Email/SMTP configuration for OTP delivery
//! - [`jwt`]: JWT signing key and token lifetimes

pub mod auth;
pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
