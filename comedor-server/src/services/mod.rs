//! Service layer
//!
//! One service per domain area. Services hold the connection pool, own
//! transaction boundaries for multi-table mutations, and surface
//! [`crate::utils::AppError`] to the embedding application.

pub mod cart;
pub mod catalog;
pub mod export;
pub mod orders;
pub mod report;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use export::ExportService;
pub use orders::OrderService;
pub use report::ReportService;
