//! 统一错误处理
//!
//! 提供应用级错误类型：
//! - [`AppError`] - 应用错误枚举，服务层的统一错误面
//! - [`AppResult`] - 服务层结果别名
//!
//! Repository 层使用独立的 [`RepoError`]，在这里映射到应用错误。
//! 一致性检查全部在变更之前完成（fail closed），
//! 聚合层对空数据返回 0 而不是错误。

use crate::db::repository::RepoError;
use tracing::error;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 目录一致性 ==========
    #[error("Dish '{0}' is on sale and cannot be deleted")]
    /// 起售中的菜品不可删除
    DishOnSale(String),

    #[error("Dish is referenced by a combo meal: {0}")]
    /// 菜品被套餐引用，不可删除
    DishReferencedByCombo(String),

    #[error("Combo meal '{0}' is on sale and cannot be deleted")]
    /// 起售中的套餐不可删除
    ComboOnSale(String),

    #[error("Combo meal contains halted dishes: {0}")]
    /// 套餐内包含停售菜品，无法起售
    ComboContainsHaltedDish(String),

    // ========== 购物车 / 订单 ==========
    #[error("Catalog lookup failed: {0}")]
    /// 购物车引用的菜品/套餐不存在
    CatalogLookup(String),

    #[error("Cart is empty")]
    /// 空购物车不能下单
    CartEmpty,

    // ========== 通用 ==========
    #[error("Resource not found: {0}")]
    /// 资源不存在
    NotFound(String),

    #[error("Resource already exists: {0}")]
    /// 资源冲突
    Conflict(String),

    #[error("Validation failed: {0}")]
    /// 验证失败
    Validation(String),

    #[error("Store unavailable: {0}")]
    /// 底层存储调用失败，对当前请求致命，不重试
    Store(String),

    // ========== 报表导出 ==========
    #[error("Report template missing: {0}")]
    /// 报表模板不存在（致命配置错误）
    TemplateMissing(String),

    #[error("Report template layout mismatch: {0}")]
    /// 报表模板结构不符（致命配置错误）
    TemplateLayout(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => {
                error!(target: "database", error = %msg, "Store call failed");
                AppError::Store(msg)
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::from(RepoError::from(err))
    }
}

/// Result type for service operations
pub type AppResult<T> = Result<T, AppError>;
