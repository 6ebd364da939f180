pub mod user_file;
pub mod org_service;
pub mod provision_service;

// Re-export commonly used functions
pub use user_file::load_users_from_file;
pub use org_service::{resolve_organization, ResolvedOrg};
pub use provision_service::{provision, provision_user};
