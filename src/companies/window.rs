//! 日期區間決定

use chrono::NaiveDate;

use super::error::{TransformError, TransformResult};
use super::model::DailyObservation;
use crate::utils::time_utils::parse_iso_date;

/// 解析表單日期參數；未提供或空字串表示不限制該端
pub fn parse_form_date(field: &str, raw: Option<&str>) -> TransformResult<Option<NaiveDate>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => parse_iso_date(value)
            .map(Some)
            .ok_or_else(|| TransformError::InvalidFormDate {
                field: field.to_string(),
                value: value.to_string(),
            }),
    }
}

/// 包含兩端的每日區間
///
/// 不檢查 `start <= end`：起點晚於終點時區間為空。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 以請求參數為主，缺少的一端取合併資料的最早或最晚日期
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        observations: &[DailyObservation],
    ) -> TransformResult<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            return Ok(Self::new(start, end));
        }

        let data_min = observations.iter().map(|o| o.date).min();
        let data_max = observations.iter().map(|o| o.date).max();

        let start = start.or(data_min).ok_or(TransformError::EmptyMerge)?;
        let end = end.or(data_max).ok_or(TransformError::EmptyMerge)?;

        Ok(Self::new(start, end))
    }

    /// 區間內的每一天，依日期遞增
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start).num_days() as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::model::CompanyId;
    use assert_matches::assert_matches;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn observations() -> Vec<DailyObservation> {
        [ymd(2017, 1, 5), ymd(2017, 1, 2), ymd(2017, 1, 9)]
            .into_iter()
            .map(|date| DailyObservation { id: CompanyId::Int(1), date, value: 1 })
            .collect()
    }

    #[test]
    fn test_parse_form_date() {
        assert_eq!(parse_form_date("start_date", None).unwrap(), None);
        assert_eq!(parse_form_date("start_date", Some("")).unwrap(), None);
        assert_eq!(parse_form_date("start_date", Some("2017-1-3")).unwrap(), Some(ymd(2017, 1, 3)));
        assert_matches!(
            parse_form_date("end_date", Some("03/01/2017")),
            Err(TransformError::InvalidFormDate { ref field, .. }) if field == "end_date"
        );
    }

    #[test]
    fn test_resolve_both_bounds_given() {
        let window = DateWindow::resolve(Some(ymd(2016, 12, 1)), Some(ymd(2016, 12, 3)), &observations()).unwrap();
        assert_eq!(window, DateWindow::new(ymd(2016, 12, 1), ymd(2016, 12, 3)));
    }

    #[test]
    fn test_resolve_only_start_uses_data_max() {
        let window = DateWindow::resolve(Some(ymd(2017, 1, 3)), None, &observations()).unwrap();
        assert_eq!(window, DateWindow::new(ymd(2017, 1, 3), ymd(2017, 1, 9)));
    }

    #[test]
    fn test_resolve_only_end_uses_data_min() {
        let window = DateWindow::resolve(None, Some(ymd(2017, 1, 4)), &observations()).unwrap();
        assert_eq!(window, DateWindow::new(ymd(2017, 1, 2), ymd(2017, 1, 4)));
    }

    #[test]
    fn test_resolve_without_bounds_uses_data_range() {
        let window = DateWindow::resolve(None, None, &observations()).unwrap();
        assert_eq!(window, DateWindow::new(ymd(2017, 1, 2), ymd(2017, 1, 9)));
        assert_eq!(window.len(), 8);
    }

    #[test]
    fn test_resolve_empty_data_needs_both_bounds() {
        assert_matches!(DateWindow::resolve(Some(ymd(2017, 1, 1)), None, &[]), Err(TransformError::EmptyMerge));
        assert!(DateWindow::resolve(Some(ymd(2017, 1, 1)), Some(ymd(2017, 1, 2)), &[]).is_ok());
    }

    #[test]
    fn test_reversed_window_is_empty() {
        let window = DateWindow::new(ymd(2017, 1, 8), ymd(2017, 1, 3));
        assert!(window.is_empty());
        assert_eq!(window.days().count(), 0);
    }

    #[test]
    fn test_days_are_inclusive() {
        let window = DateWindow::new(ymd(2016, 12, 30), ymd(2017, 1, 2));
        let days: Vec<_> = window.days().collect();
        assert_eq!(days, vec![ymd(2016, 12, 30), ymd(2016, 12, 31), ymd(2017, 1, 1), ymd(2017, 1, 2)]);
        assert_eq!(window.len(), 4);
    }
}
