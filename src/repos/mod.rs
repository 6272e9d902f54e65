pub mod error;
pub mod role_repo;
