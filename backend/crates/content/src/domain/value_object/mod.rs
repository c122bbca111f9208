//! Value Object Module

pub mod comment_type;
pub mod post_status;
pub mod report_status;
