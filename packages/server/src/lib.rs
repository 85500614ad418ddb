// Coaching Marketplace - API Core
//
// This crate provides the backend API for a fitness-coaching marketplace.
// The engineering core is phone-based one-time-code authentication and
// stateless JWT issuance; every protected endpoint re-derives identity
// from the bearer token rather than trusting a client-supplied id.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
