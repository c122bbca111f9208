//! Entities

pub mod one_time_token;
pub mod refresh_token;
pub mod role;
pub mod user;
