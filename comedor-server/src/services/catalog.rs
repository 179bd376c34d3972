//! Catalog Service — dish and combo management with cross-table consistency
//!
//! Every multi-table mutation runs inside a single transaction, and the
//! deletion guards are evaluated inside the same transaction as the
//! deletes, so a dish cannot become combo-referenced between check and
//! delete. Batch deletes are all-or-nothing: one blocked row rolls back
//! the whole batch.

use std::collections::{HashMap, HashSet};

use crate::db::repository::{self as repo};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Combo, ComboCreate, ComboDish, ComboDishInput, ComboUpdate, Dish, DishCreate, DishUpdate,
    SaleStatus,
};
use shared::util::now_millis;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

#[derive(Clone)]
pub struct CatalogService {
    pool: SqlitePool,
}

impl CatalogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Dish
    // =========================================================================

    /// Insert a dish together with its flavors, atomically
    pub async fn save_dish(&self, data: DishCreate, operator_id: i64) -> AppResult<Dish> {
        validate_price(data.price)?;
        let now = now_millis();

        let mut tx = self.pool.begin().await?;
        let id = repo::dish::insert(&mut tx, &data, operator_id, now).await?;
        repo::dish::replace_flavors(&mut tx, id, &data.flavors).await?;
        tx.commit().await?;

        info!(dish_id = id, name = %data.name, "Dish created");
        self.dish_with_flavors(id).await
    }

    /// Update a dish row and replace its flavor set
    ///
    /// The flavor set is replaced wholesale: an empty `flavors` leaves the
    /// dish with zero flavors.
    pub async fn update_dish(
        &self,
        id: i64,
        data: DishUpdate,
        operator_id: i64,
    ) -> AppResult<Dish> {
        if let Some(price) = data.price {
            validate_price(price)?;
        }
        let now = now_millis();

        let mut tx = self.pool.begin().await?;
        repo::dish::update_fields(&mut tx, id, &data, operator_id, now).await?;
        repo::dish::replace_flavors(&mut tx, id, &data.flavors).await?;
        tx.commit().await?;

        self.dish_with_flavors(id).await
    }

    /// Batch-delete dishes, all-or-nothing
    ///
    /// The whole batch is rejected if any dish is still on sale or is
    /// referenced by a combo meal; nothing is deleted in that case.
    pub async fn delete_dishes(&self, ids: &[i64]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        let dishes = repo::dish::find_by_ids(&mut tx, ids).await?;
        let wanted: HashSet<i64> = ids.iter().copied().collect();
        if dishes.len() != wanted.len() {
            let found: HashSet<i64> = dishes.iter().map(|d| d.id).collect();
            let missing = wanted.difference(&found).next().copied().unwrap_or_default();
            return Err(AppError::NotFound(format!("Dish {missing} not found")));
        }

        if let Some(dish) = dishes.iter().find(|d| d.status == SaleStatus::Enabled) {
            return Err(AppError::DishOnSale(dish.name.clone()));
        }

        let combo_ids = repo::combo::combo_ids_referencing_dishes(&mut tx, ids).await?;
        if !combo_ids.is_empty() {
            return Err(AppError::DishReferencedByCombo(format!(
                "{} combo meal(s) still contain it",
                combo_ids.len()
            )));
        }

        repo::dish::delete_flavors_by_dish_ids(&mut tx, ids).await?;
        repo::dish::delete_by_ids(&mut tx, ids).await?;
        tx.commit().await?;

        info!(count = ids.len(), "Dishes deleted");
        Ok(())
    }

    /// Dish with its flavor rows
    pub async fn dish_with_flavors(&self, id: i64) -> AppResult<Dish> {
        let mut dish = repo::dish::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Dish {id} not found")))?;
        dish.flavors = repo::dish::flavors_by_dish(&self.pool, id).await?;
        Ok(dish)
    }

    pub async fn dishes_by_status(&self, status: SaleStatus) -> AppResult<Vec<Dish>> {
        Ok(repo::dish::find_by_status(&self.pool, status).await?)
    }

    pub async fn list_dishes(&self, limit: i32, offset: i32) -> AppResult<Vec<Dish>> {
        Ok(repo::dish::find_page(&self.pool, limit, offset).await?)
    }

    pub async fn set_dish_status(
        &self,
        id: i64,
        status: SaleStatus,
        operator_id: i64,
    ) -> AppResult<()> {
        repo::dish::set_status(&self.pool, id, status, operator_id, now_millis()).await?;
        Ok(())
    }

    // =========================================================================
    // Combo
    // =========================================================================

    /// Insert a combo together with its membership rows, atomically
    ///
    /// Name and price of each member are snapshotted from the dish catalog;
    /// an unknown dish id aborts the whole save.
    pub async fn save_combo(&self, data: ComboCreate, operator_id: i64) -> AppResult<Combo> {
        validate_price(data.price)?;
        let now = now_millis();

        let mut tx = self.pool.begin().await?;
        let id = repo::combo::insert(&mut tx, &data, operator_id, now).await?;
        let members = resolve_members(&mut tx, id, &data.dishes).await?;
        repo::combo::replace_members(&mut tx, id, &members).await?;
        tx.commit().await?;

        info!(combo_id = id, name = %data.name, "Combo created");
        self.combo_with_dishes(id).await
    }

    /// Update a combo row and replace its membership set
    pub async fn update_combo(
        &self,
        id: i64,
        data: ComboUpdate,
        operator_id: i64,
    ) -> AppResult<Combo> {
        if let Some(price) = data.price {
            validate_price(price)?;
        }
        let now = now_millis();

        let mut tx = self.pool.begin().await?;
        repo::combo::update_fields(&mut tx, id, &data, operator_id, now).await?;
        let members = resolve_members(&mut tx, id, &data.dishes).await?;
        repo::combo::replace_members(&mut tx, id, &members).await?;
        tx.commit().await?;

        self.combo_with_dishes(id).await
    }

    /// Batch-delete combos, all-or-nothing; membership rows go with them
    pub async fn delete_combos(&self, ids: &[i64]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        let combos = repo::combo::find_by_ids(&mut tx, ids).await?;
        let wanted: HashSet<i64> = ids.iter().copied().collect();
        if combos.len() != wanted.len() {
            let found: HashSet<i64> = combos.iter().map(|c| c.id).collect();
            let missing = wanted.difference(&found).next().copied().unwrap_or_default();
            return Err(AppError::NotFound(format!("Combo {missing} not found")));
        }

        if let Some(combo) = combos.iter().find(|c| c.status == SaleStatus::Enabled) {
            return Err(AppError::ComboOnSale(combo.name.clone()));
        }

        repo::combo::delete_members_by_combo_ids(&mut tx, ids).await?;
        repo::combo::delete_by_ids(&mut tx, ids).await?;
        tx.commit().await?;

        info!(count = ids.len(), "Combos deleted");
        Ok(())
    }

    /// Change combo sale status
    ///
    /// Enabling is guarded: a combo whose member dish is halted cannot go
    /// on sale. The guard and the status write share one transaction.
    pub async fn set_combo_status(
        &self,
        id: i64,
        status: SaleStatus,
        operator_id: i64,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        if status == SaleStatus::Enabled {
            let halted = repo::combo::halted_member_count(&mut tx, id).await?;
            if halted > 0 {
                return Err(AppError::ComboContainsHaltedDish(format!(
                    "{halted} member dish(es) are halted"
                )));
            }
        }

        repo::combo::set_status(&mut tx, id, status, operator_id, now_millis()).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Combo with its membership rows
    pub async fn combo_with_dishes(&self, id: i64) -> AppResult<Combo> {
        let mut combo = repo::combo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Combo {id} not found")))?;
        combo.dishes = repo::combo::members_by_combo(&self.pool, id).await?;
        Ok(combo)
    }

    pub async fn combos_by_status(&self, status: SaleStatus) -> AppResult<Vec<Combo>> {
        Ok(repo::combo::find_by_status(&self.pool, status).await?)
    }
}

/// Resolve membership inputs against the dish table, snapshotting name and
/// price at save time
async fn resolve_members(
    tx: &mut Transaction<'_, Sqlite>,
    combo_id: i64,
    inputs: &[ComboDishInput],
) -> AppResult<Vec<ComboDish>> {
    if inputs.is_empty() {
        return Ok(Vec::new());
    }

    let dish_ids: Vec<i64> = inputs.iter().map(|m| m.dish_id).collect();
    let dishes = repo::dish::find_by_ids(tx, &dish_ids).await?;
    let by_id: HashMap<i64, &Dish> = dishes.iter().map(|d| (d.id, d)).collect();

    inputs
        .iter()
        .map(|member| {
            let dish = by_id.get(&member.dish_id).ok_or_else(|| {
                AppError::CatalogLookup(format!("Dish {} not found", member.dish_id))
            })?;
            Ok(ComboDish {
                id: 0,
                combo_id,
                dish_id: dish.id,
                name: dish.name.clone(),
                price: dish.price,
                copies: member.copies.max(1),
            })
        })
        .collect()
}

fn validate_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(format!(
            "Price must be a non-negative finite number, got {price}"
        )));
    }
    Ok(())
}
