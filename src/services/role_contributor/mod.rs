pub mod administrator;
pub mod chain;
pub mod collection;
pub mod contributor;
pub mod types;

pub use administrator::{AdministratorRoleContributor, AdministratorRoleSettings};
pub use chain::ContributorChain;
pub use collection::RoleCollection;
pub use contributor::RoleContributor;
pub use types::{CompanyId, Role, RoleId, User};
