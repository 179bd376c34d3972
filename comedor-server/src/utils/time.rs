//! 时间工具函数 — 日期区间与日桶边界
//!
//! 所有日期→时间戳转换统一在这里完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// 区间展开：begin 到 end（含两端）的每一天，按时间顺序
///
/// 单日区间返回单元素序列；`begin > end` 返回验证错误。
pub fn date_range(begin: NaiveDate, end: NaiveDate) -> AppResult<Vec<NaiveDate>> {
    if begin > end {
        return Err(AppError::Validation(format!(
            "Invalid date range: {begin} is after {end}"
        )));
    }

    let mut dates = Vec::new();
    let mut day = begin;
    while day <= end {
        dates.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    Ok(dates)
}

/// 日期开始 (00:00:00) → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis()
}

/// 日期结束 → 次日 00:00:00 的 Unix millis
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day)
}

/// 日桶边界：[start, end)
pub fn day_bounds(date: NaiveDate) -> (i64, i64) {
    (day_start_millis(date), day_end_millis(date))
}
