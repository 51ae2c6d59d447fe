//! Business logic services

pub mod borrowers;
pub mod catalog;
pub mod exports;
pub mod lending;

use crate::{config::BorrowConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub borrowers: borrowers::BorrowersService,
    pub lending: lending::LendingService,
    pub exports: exports::ExportsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, borrow_config: BorrowConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            borrowers: borrowers::BorrowersService::new(repository.clone()),
            lending: lending::LendingService::new(repository.clone(), borrow_config),
            exports: exports::ExportsService::new(repository),
        }
    }
}
