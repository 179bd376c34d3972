//! Export Service — 30-day business report into a fixed xlsx template
//!
//! The template owns the layout; the export writes values only. A missing
//! template or an unexpected sheet layout is a fatal configuration error,
//! never recovered from.

use std::io::Cursor;
use std::path::PathBuf;

use chrono::{Days, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::info;
use umya_spreadsheet::Worksheet;

use crate::services::ReportService;
use crate::utils::time::{day_end_millis, day_start_millis};
use crate::utils::{AppError, AppResult};
use shared::models::BusinessData;

/// Worksheet the template must carry
const SHEET_NAME: &str = "Sheet1";
/// Detail rows in the template, one per day
const DETAIL_DAYS: u64 = 30;
/// First detail row (1-based)
const DETAIL_START_ROW: u32 = 8;

#[derive(Clone)]
pub struct ExportService {
    report: ReportService,
    template_path: PathBuf,
}

impl ExportService {
    pub fn new(pool: SqlitePool, template_path: impl Into<PathBuf>) -> Self {
        Self {
            report: ReportService::new(pool),
            template_path: template_path.into(),
        }
    }

    /// Export the trailing 30-day window ending yesterday
    pub async fn export_last_30_days(&self) -> AppResult<Vec<u8>> {
        self.export_for_date(Utc::now().date_naive()).await
    }

    /// Export the 30-day window `[today - 30, today - 1]`
    ///
    /// Split out from [`Self::export_last_30_days`] so the window is
    /// injectable.
    pub async fn export_for_date(&self, today: NaiveDate) -> AppResult<Vec<u8>> {
        let begin = today - Days::new(DETAIL_DAYS);
        let end = today - Days::new(1);

        let mut book = umya_spreadsheet::reader::xlsx::read(&self.template_path).map_err(
            |e| {
                AppError::TemplateMissing(format!(
                    "{}: {e}",
                    self.template_path.display()
                ))
            },
        )?;
        let sheet = book
            .get_sheet_by_name_mut(SHEET_NAME)
            .ok_or_else(|| {
                AppError::TemplateLayout(format!("Worksheet '{SHEET_NAME}' not found"))
            })?;

        // Overview block: the whole window in one aggregate
        let overview = self
            .report
            .business_data(day_start_millis(begin), day_end_millis(end))
            .await?;
        sheet
            .get_cell_mut("B2")
            .set_value(format!("Period: {begin} to {end}"));
        write_overview(sheet, &overview);

        // Detail rows: one aggregate per day
        for offset in 0..DETAIL_DAYS {
            let date = begin + Days::new(offset);
            let day = self
                .report
                .business_data(day_start_millis(date), day_end_millis(date))
                .await?;
            write_detail_row(sheet, DETAIL_START_ROW + offset as u32, date, &day);
        }

        let mut out = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out)
            .map_err(|e| AppError::Store(format!("Failed to serialize workbook: {e}")))?;

        info!(begin = %begin, end = %end, "Business report exported");
        Ok(out.into_inner())
    }
}

fn write_overview(sheet: &mut Worksheet, data: &BusinessData) {
    sheet.get_cell_mut("C4").set_value_number(data.turnover);
    sheet
        .get_cell_mut("E4")
        .set_value_number(data.order_completion_rate);
    sheet
        .get_cell_mut("G4")
        .set_value_number(data.new_users as f64);
    sheet
        .get_cell_mut("C5")
        .set_value_number(data.valid_order_count as f64);
    sheet.get_cell_mut("E5").set_value_number(data.unit_price);
}

fn write_detail_row(sheet: &mut Worksheet, row: u32, date: NaiveDate, data: &BusinessData) {
    sheet.get_cell_mut((2, row)).set_value(date.to_string());
    sheet.get_cell_mut((3, row)).set_value_number(data.turnover);
    sheet
        .get_cell_mut((4, row))
        .set_value_number(data.valid_order_count as f64);
    sheet
        .get_cell_mut((5, row))
        .set_value_number(data.order_completion_rate);
    sheet.get_cell_mut((6, row)).set_value_number(data.unit_price);
    sheet
        .get_cell_mut((7, row))
        .set_value_number(data.new_users as f64);
}
