//! Business logic layer for slug records.
//!
//! Contains the store access functions behind the request handlers.

pub(crate) mod helpers;
mod slugs;

pub use slugs::*;
