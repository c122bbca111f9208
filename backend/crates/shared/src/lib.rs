//! Shared Kernel
//!
//! Vocabulary shared by every domain crate of the community API:
//! - the unified error type and its HTTP mapping
//! - the JSON response envelope
//! - typed identifiers
//! - pagination parameters
//!
//! Only things whose meaning is identical across auth, content and
//! community belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod page;
pub mod response;
