//! 合併階段：內連接與型別轉換

use polars::prelude::*;
use tracing::debug;

use super::error::{TransformError, TransformResult};
use super::model::{CompanyId, DailyObservation};
use super::upload::UploadedTables;
use crate::utils::time_utils::parse_flexible_date;

pub const ID_COLUMN: &str = "id";
pub const DATE_COLUMN: &str = "date";
pub const VALUE_COLUMN: &str = "value";

/// 依 `id` 內連接 daily 與 companies，並將結果轉為型別化的觀測值
///
/// 沒有對應公司的 daily 列會被丟棄。companies 中重複的 id 會讓對應的
/// daily 列重複出現，後續加總時一併計入。
pub fn merge_tables(tables: &UploadedTables) -> TransformResult<Vec<DailyObservation>> {
    require_columns(&tables.companies, "companies", &[ID_COLUMN])?;
    require_columns(&tables.daily, "daily", &[ID_COLUMN, DATE_COLUMN, VALUE_COLUMN])?;

    let joined = tables
        .daily
        .clone()
        .lazy()
        .select([col(ID_COLUMN), col(DATE_COLUMN), col(VALUE_COLUMN)])
        .inner_join(
            tables.companies.clone().lazy().select([col(ID_COLUMN)]),
            col(ID_COLUMN),
            col(ID_COLUMN),
        )
        .collect()?;

    debug!(
        "內連接完成: daily {} 列 -> {} 列",
        tables.daily.height(),
        joined.height()
    );

    let ids = extract_ids(joined.column(ID_COLUMN)?.as_materialized_series())?;
    let dates = extract_dates(joined.column(DATE_COLUMN)?.as_materialized_series())?;
    let values = extract_values(joined.column(VALUE_COLUMN)?.as_materialized_series())?;

    let observations: Vec<DailyObservation> = ids
        .into_iter()
        .zip(dates)
        .zip(values)
        .filter_map(|((id, date), value)| date.map(|date| DailyObservation { id, date, value }))
        .collect();

    if observations.len() < joined.height() {
        debug!("略過 {} 列缺少日期的資料", joined.height() - observations.len());
    }

    Ok(observations)
}

fn require_columns(df: &DataFrame, table: &str, columns: &[&str]) -> TransformResult<()> {
    for column in columns {
        if df.column(column).is_err() {
            return Err(TransformError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn empty_cell(column: &str) -> TransformError {
    TransformError::EmptyCell {
        column: column.to_string(),
    }
}

fn extract_ids(series: &Series) -> TransformResult<Vec<CompanyId>> {
    if series.dtype().is_integer() {
        let ints = series.cast(&DataType::Int64)?;
        ints.i64()?
            .into_iter()
            .map(|id| id.map(CompanyId::Int).ok_or_else(|| empty_cell(ID_COLUMN)))
            .collect()
    } else {
        let text = series.cast(&DataType::String)?;
        text.str()?
            .into_iter()
            .map(|id| id.map(CompanyId::from).ok_or_else(|| empty_cell(ID_COLUMN)))
            .collect()
    }
}

/// 空白日期回傳 None，該列不參與加總也不影響日期範圍
fn extract_dates(series: &Series) -> TransformResult<Vec<Option<chrono::NaiveDate>>> {
    let text = series.cast(&DataType::String)?;
    text.str()?
        .into_iter()
        .map(|raw| match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_flexible_date(raw)
                .map(Some)
                .ok_or_else(|| TransformError::InvalidDate {
                    value: raw.to_string(),
                }),
        })
        .collect()
}

/// 數值欄位轉為整數：浮點數向零截斷，缺值或非有限值視為錯誤
fn extract_values(series: &Series) -> TransformResult<Vec<i64>> {
    let dtype = series.dtype();

    if dtype.is_integer() || dtype.is_bool() {
        let ints = series.cast(&DataType::Int64)?;
        ints.i64()?
            .into_iter()
            .map(|value| value.ok_or(TransformError::NonFiniteValue))
            .collect()
    } else if dtype.is_float() {
        let floats = series.cast(&DataType::Float64)?;
        floats
            .f64()?
            .into_iter()
            .map(|value| match value {
                Some(v) if v.is_finite() && v.trunc() >= i64::MIN as f64 && v.trunc() < i64::MAX as f64 => {
                    Ok(v.trunc() as i64)
                }
                _ => Err(TransformError::NonFiniteValue),
            })
            .collect()
    } else {
        let text = series.cast(&DataType::String)?;
        text.str()?
            .into_iter()
            .map(|raw| {
                let raw = raw.ok_or(TransformError::NonFiniteValue)?;
                raw.trim().parse::<i64>().map_err(|_| TransformError::InvalidValue {
                    value: raw.to_string(),
                })
            })
            .collect()
    }
}
