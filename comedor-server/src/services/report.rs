//! Report Service — day-bucketed sales aggregation
//!
//! Series are built by one store query per metric per day (fine for the
//! 30–90 day windows these reports cover). Every day of the requested
//! range appears exactly once, zero-filled when it has no orders, and all
//! series vectors stay index-aligned with `dates` — the export step
//! depends on that positional contract.

use crate::db::repository::{self as repo};
use crate::utils::money::safe_average;
use crate::utils::time::{date_range, day_bounds, day_end_millis, day_start_millis};
use crate::utils::AppResult;
use chrono::NaiveDate;
use shared::models::{
    BusinessData, OrderReport, OrderStatus, SalesTop10, TurnoverReport, UserReport,
};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ReportService {
    pool: SqlitePool,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Completed-order turnover per day over `[begin, end]`
    pub async fn turnover_statistics(
        &self,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<TurnoverReport> {
        let dates = date_range(begin, end)?;

        let mut turnover = Vec::with_capacity(dates.len());
        for day in &dates {
            let (start, stop) = day_bounds(*day);
            let sum = repo::order::sum_amount(
                &self.pool,
                start,
                stop,
                Some(OrderStatus::Completed),
            )
            .await?;
            turnover.push(sum);
        }

        Ok(TurnoverReport { dates, turnover })
    }

    /// New and cumulative user counts per day over `[begin, end]`
    pub async fn user_statistics(
        &self,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<UserReport> {
        let dates = date_range(begin, end)?;

        let mut new_users = Vec::with_capacity(dates.len());
        let mut total_users = Vec::with_capacity(dates.len());
        for day in &dates {
            let (start, stop) = day_bounds(*day);
            total_users.push(repo::user::count_created_before(&self.pool, stop).await?);
            new_users.push(repo::user::count_created_in(&self.pool, start, stop).await?);
        }

        Ok(UserReport {
            dates,
            new_users,
            total_users,
        })
    }

    /// Order counts per day plus range totals and completion rate
    pub async fn order_statistics(
        &self,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<OrderReport> {
        let dates = date_range(begin, end)?;

        let mut order_counts = Vec::with_capacity(dates.len());
        let mut valid_order_counts = Vec::with_capacity(dates.len());
        for day in &dates {
            let (start, stop) = day_bounds(*day);
            order_counts.push(repo::order::count(&self.pool, start, stop, None).await?);
            valid_order_counts.push(
                repo::order::count(&self.pool, start, stop, Some(OrderStatus::Completed))
                    .await?,
            );
        }

        let total_order_count: i64 = order_counts.iter().sum();
        let valid_order_count: i64 = valid_order_counts.iter().sum();
        let completion_rate = if total_order_count != 0 {
            valid_order_count as f64 / total_order_count as f64
        } else {
            0.0
        };

        Ok(OrderReport {
            dates,
            order_counts,
            valid_order_counts,
            total_order_count,
            valid_order_count,
            completion_rate,
        })
    }

    /// Best sellers over `[begin, end]` — a single windowed query, at most
    /// 10 entries, quantities non-increasing
    pub async fn sales_top10(&self, begin: NaiveDate, end: NaiveDate) -> AppResult<SalesTop10> {
        // Validates the range; the query itself is windowed, not per-day
        date_range(begin, end)?;

        let rows = repo::order::top_sales(
            &self.pool,
            day_start_millis(begin),
            day_end_millis(end),
            10,
        )
        .await?;

        let (names, numbers) = rows.into_iter().unzip();
        Ok(SalesTop10 { names, numbers })
    }

    /// Whole-window business overview over `[begin, end)` millis
    pub async fn business_data(&self, begin: i64, end: i64) -> AppResult<BusinessData> {
        let total_order_count = repo::order::count(&self.pool, begin, end, None).await?;
        let valid_order_count =
            repo::order::count(&self.pool, begin, end, Some(OrderStatus::Completed)).await?;
        let turnover =
            repo::order::sum_amount(&self.pool, begin, end, Some(OrderStatus::Completed))
                .await?;
        let new_users = repo::user::count_created_in(&self.pool, begin, end).await?;

        let order_completion_rate = if total_order_count != 0 {
            valid_order_count as f64 / total_order_count as f64
        } else {
            0.0
        };

        Ok(BusinessData {
            turnover,
            valid_order_count,
            order_completion_rate,
            unit_price: safe_average(turnover, valid_order_count),
            new_users,
        })
    }
}
