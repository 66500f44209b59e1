//! Utility functions shared across layers.
//!
//! - [`token`] - Access token generation and HMAC hashing

pub mod token;
