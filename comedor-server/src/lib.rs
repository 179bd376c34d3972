//! Comedor Back Office — restaurant catalog, cart, orders and reporting
//!
//! # 模块结构
//!
//! ```text
//! comedor-server/src/
//! ├── core/          # 配置
//! ├── db/            # SQLite 连接池 + repository 层
//! ├── services/      # catalog / cart / orders / report / export
//! └── utils/         # 错误、日志、时间、金额
//! ```
//!
//! The crate is a library: the HTTP surface lives in the embedding
//! application, which wires these services to its routes.

pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::Config;
pub use crate::db::DbService;
pub use crate::services::{
    CartService, CatalogService, ExportService, OrderService, ReportService,
};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};
