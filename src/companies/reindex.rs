//! 區間補齊：分組加總與網格重新索引

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use super::error::{TransformError, TransformResult};
use super::model::{CompanyId, DailyObservation, DenseRow};
use super::window::DateWindow;

/// 依 (date, id) 加總後的值
pub type DailyTotals = BTreeMap<(NaiveDate, CompanyId), i64>;

/// 同一天同一公司的多筆觀測加總為一筆
pub fn group_daily_totals(observations: &[DailyObservation]) -> TransformResult<DailyTotals> {
    let mut totals = DailyTotals::new();

    for obs in observations {
        let total = totals.entry((obs.date, obs.id.clone())).or_insert(0);
        *total = total
            .checked_add(obs.value)
            .ok_or_else(|| TransformError::ValueOverflow {
                id: obs.id.to_string(),
                date: obs.date.to_string(),
            })?;
    }

    Ok(totals)
}

/// 將加總結果展開到「區間內每一天 × 每個出現過的 id」的完整網格
///
/// 輸出依日期、再依 id 排序；沒有觀測的格子 `value` 為 None，
/// 區間外的觀測不會出現在輸出中。
pub fn dense_reindex(totals: &DailyTotals, window: &DateWindow) -> Vec<DenseRow> {
    let ids: BTreeSet<&CompanyId> = totals.keys().map(|(_, id)| id).collect();
    let mut rows = Vec::with_capacity(window.len() * ids.len());

    for date in window.days() {
        for id in &ids {
            rows.push(DenseRow {
                date,
                id: (*id).clone(),
                value: totals.get(&(date, (*id).clone())).copied(),
            });
        }
    }

    rows
}
