//! Entities

pub mod category;
pub mod comment;
pub mod post;
pub mod report;
pub mod tag;
pub mod view;
