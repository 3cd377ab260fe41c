//! Typed request bodies and their validated payloads.
//!
//! Every endpoint deserializes into a `*Form`, which is checked with
//! `validator` and converted into a `*Payload` carrying domain types before
//! any repository call.

pub mod auth;
pub mod categories;
pub mod posts;
pub mod topics;
pub mod votes;
