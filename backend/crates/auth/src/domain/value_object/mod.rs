//! Value Object Module

pub mod email;
pub mod full_name;
pub mod profile;
pub mod user_password;
pub mod user_role;
pub mod username;
