//! Value Object Module

pub mod contact_status;
pub mod youtube_id;
