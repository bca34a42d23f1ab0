//! Application Layer
//!
//! Use cases and application services.

pub mod bootstrap_admin;
pub mod change_info;
pub mod change_user_state;
pub mod config;
pub mod create_role;
pub mod create_user;
pub mod list_users;
pub mod set_password;
pub mod sign_in;
pub mod update_user;

// Re-exports
pub use bootstrap_admin::{BootstrapAdminInput, BootstrapAdminUseCase};
pub use change_info::{ChangeInfoInput, ChangeInfoUseCase};
pub use change_user_state::{ChangeUserStateUseCase, UserStateChange};
pub use config::AuthConfig;
pub use create_role::{CreateRoleInput, CreateRoleUseCase};
pub use create_user::{CreateUserInput, CreateUserUseCase};
pub use list_users::ListUsersUseCase;
pub use set_password::{SetPasswordInput, SetPasswordUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use update_user::{UpdateUserInput, UpdateUserUseCase};
