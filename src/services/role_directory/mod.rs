pub mod cached;
pub mod directory;
pub mod memory;
pub mod postgres;

pub use cached::CachedRoleDirectory;
pub use directory::{DirectoryError, RoleDirectory};
pub use memory::InMemoryRoleDirectory;
pub use postgres::PgRoleDirectory;
