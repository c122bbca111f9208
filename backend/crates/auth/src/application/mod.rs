//! Application Layer
//!
//! Use cases and application services.

pub mod bootstrap;
pub mod config;
pub mod login;
pub mod logout;
pub mod notify;
pub mod password_reset;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod roles;
pub mod token;
pub mod users;
pub mod verify_email;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use password_reset::PasswordResetUseCase;
pub use profile::{ProfileChanges, ProfileUseCase};
pub use refresh::{RefreshOutput, RefreshUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use roles::RoleUseCase;
pub use token::{Claims, TokenError, TokenIssuer};
pub use users::{CreateUserInput, UserManagementUseCase};
pub use verify_email::VerifyEmailUseCase;
