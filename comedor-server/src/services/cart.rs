//! Cart Service — per-user shopping cart with quantity merging
//!
//! "Add" resolves into either an increment of the existing line or a fresh
//! line carrying a catalog snapshot. The merge itself is a single upsert
//! against the cart's unique indexes, so concurrent identical adds cannot
//! produce duplicate lines.

use crate::db::repository::{self as repo};
use crate::utils::{AppError, AppResult};
use shared::models::{CartItemInput, CartLine};
use shared::util::now_millis;
use sqlx::SqlitePool;
use tracing::debug;

#[derive(Clone)]
pub struct CartService {
    pool: SqlitePool,
}

impl CartService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add one unit of a dish or combo to the user's cart
    ///
    /// Name/image/amount are read from the catalog only for the insert
    /// path; an existing line keeps its first-insertion snapshot and just
    /// gains quantity.
    pub async fn add(&self, user_id: i64, item: CartItemInput) -> AppResult<CartLine> {
        let (name, image, amount) = self.resolve_item(&item).await?;
        let line = repo::cart::upsert_increment(
            &self.pool,
            user_id,
            &item,
            &name,
            &image,
            amount,
            now_millis(),
        )
        .await?;

        debug!(user_id, line_id = line.id, number = line.number, "Cart line merged");
        Ok(line)
    }

    /// All lines of the user's cart, store default order
    pub async fn show(&self, user_id: i64) -> AppResult<Vec<CartLine>> {
        Ok(repo::cart::find_by_user(&self.pool, user_id).await?)
    }

    /// Remove one unit of an item; the last unit removes the line.
    /// A missing line is a no-op.
    pub async fn remove_one(&self, user_id: i64, item: CartItemInput) -> AppResult<()> {
        if item.dish_id.is_none() && item.combo_id.is_none() {
            return Err(AppError::Validation(
                "Exactly one of dish_id/combo_id must be set".into(),
            ));
        }
        repo::cart::decrement_or_delete(&self.pool, user_id, &item).await?;
        Ok(())
    }

    /// Empty the user's cart; idempotent
    pub async fn clear(&self, user_id: i64) -> AppResult<()> {
        repo::cart::delete_by_user(&self.pool, user_id).await?;
        Ok(())
    }

    /// Look up the catalog item backing a cart input
    async fn resolve_item(&self, item: &CartItemInput) -> AppResult<(String, String, f64)> {
        match (item.dish_id, item.combo_id) {
            (Some(dish_id), None) => {
                let dish = repo::dish::find_by_id(&self.pool, dish_id)
                    .await?
                    .ok_or_else(|| AppError::CatalogLookup(format!("Dish {dish_id} not found")))?;
                Ok((dish.name, dish.image, dish.price))
            }
            (None, Some(combo_id)) => {
                let combo = repo::combo::find_by_id(&self.pool, combo_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::CatalogLookup(format!("Combo {combo_id} not found"))
                    })?;
                Ok((combo.name, combo.image, combo.price))
            }
            _ => Err(AppError::Validation(
                "Exactly one of dish_id/combo_id must be set".into(),
            )),
        }
    }
}
