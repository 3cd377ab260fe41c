//! Diesel row types and their conversions to domain entities.

pub mod category;
pub mod config;
pub mod post;
pub mod topic;
pub mod user;
pub mod vote;
