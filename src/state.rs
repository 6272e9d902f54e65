/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - contributor chain / role directory
 * - Clone 前提で持つ (内部は Arc)
 */
use std::sync::Arc;

use crate::services::{role_contributor::ContributorChain, role_directory::RoleDirectory};

#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<ContributorChain>,
    pub directory: Arc<dyn RoleDirectory>,
}

impl AppState {
    pub fn new(chain: Arc<ContributorChain>, directory: Arc<dyn RoleDirectory>) -> Self {
        Self { chain, directory }
    }
}
