pub mod contributors;
pub mod health;
pub mod role_sets;
pub mod roles;
