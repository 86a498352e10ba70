//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod revalidation;
mod sale_command;
mod sale_query;
mod sale_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    FIXTURE_PASSWORD, FIXTURE_USER_ID, FIXTURE_USERNAME, FixtureLoginService, LoginService,
};
#[cfg(test)]
pub use revalidation::MockListingRevalidation;
pub use revalidation::{FixtureListingRevalidation, ListingRevalidation, SALE_LISTING_PATH};
#[cfg(test)]
pub use sale_command::MockSaleCommand;
pub use sale_command::SaleCommand;
#[cfg(test)]
pub use sale_query::MockSaleQuery;
pub use sale_query::SaleQuery;
#[cfg(test)]
pub use sale_repository::MockSaleRepository;
pub use sale_repository::{FixtureSaleRepository, SaleRepository, SaleRepositoryError};
