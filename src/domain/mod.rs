//! Storage-independent forum entities.

pub mod category;
pub mod post;
pub mod thread;
pub mod topic;
pub mod types;
pub mod user;
pub mod vote;
