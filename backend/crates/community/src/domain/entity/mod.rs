//! Entities

pub mod contact;
pub mod dashboard;
pub mod post_card;
pub mod user_card;
pub mod video;
