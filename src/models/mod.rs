pub mod role;
pub mod user_record;
pub mod organization;
pub mod role_assignment;
pub mod outcome;

pub use role::Role;
pub use user_record::UserRecord;
pub use organization::{OrgId, Organization};
pub use role_assignment::RoleAssignment;
pub use outcome::{ProvisionReport, Stage, UserOutcome, UserStatus};
