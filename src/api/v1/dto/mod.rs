pub mod contributors;
pub mod role_sets;
pub mod roles;
