pub mod cache;
pub mod role_contributor;
pub mod role_directory;
