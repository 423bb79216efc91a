//! n 期差分

use std::collections::BTreeMap;

use super::error::{TransformError, TransformResult};
use super::model::{CompanyId, DenseRow, MergedRow};

/// 未提供或無法解析 `n` 時使用的期數
pub const DEFAULT_PERIODS: i64 = 1;

/// 解析 `n` 參數
///
/// 先以浮點數解析，失敗（包含空字串）則使用預設值；可解析但不是
/// 有限整數的值（例如 `2.5`、`inf`）視為錯誤。
pub fn parse_periods(raw: Option<&str>) -> TransformResult<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PERIODS);
    };

    match raw.trim().parse::<f64>() {
        Err(_) => Ok(DEFAULT_PERIODS),
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Ok(n as i64),
        Ok(_) => Err(TransformError::InvalidPeriods {
            value: raw.to_string(),
        }),
    }
}

/// 計算一個分組內依序排列的值的 n 期差分
///
/// 零值與缺值先被剔除，差分只在剩下的序列上計算：
/// 第 i 個保留值減去第 i-n 個保留值。`periods` 為負時改與後面第
/// |n| 個值相減。被剔除的位置，以及前後不足 |n| 個保留值的位置，
/// 結果為 None；相減溢位時同樣為 None。輸出與輸入等長。
pub fn n_period_difference(values: &[Option<i64>], periods: i64) -> Vec<Option<i64>> {
    let kept: Vec<(usize, i64)> = values
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| value.filter(|v| *v != 0).map(|v| (idx, v)))
        .collect();

    let mut out = vec![None; values.len()];
    let Ok(offset) = usize::try_from(periods.unsigned_abs()) else {
        return out;
    };

    for (pos, &(idx, current)) in kept.iter().enumerate() {
        let other = if periods >= 0 {
            pos.checked_sub(offset)
        } else {
            pos.checked_add(offset).filter(|p| *p < kept.len())
        };

        if let Some(other) = other {
            out[idx] = current.checked_sub(kept[other].1);
        }
    }

    out
}

/// 依 id 分組計算差分，再依原本的列位置合併回去
pub fn apply_differences(rows: Vec<DenseRow>, periods: i64) -> Vec<MergedRow> {
    let mut groups: BTreeMap<&CompanyId, Vec<usize>> = BTreeMap::new();
    for (idx, row) in rows.iter().enumerate() {
        groups.entry(&row.id).or_default().push(idx);
    }

    let mut differences = vec![None; rows.len()];
    for positions in groups.values() {
        let values: Vec<Option<i64>> = positions.iter().map(|&idx| rows[idx].value).collect();
        for (&idx, diff) in positions.iter().zip(n_period_difference(&values, periods)) {
            differences[idx] = diff;
        }
    }

    rows.into_iter()
        .zip(differences)
        .map(|(row, difference)| MergedRow {
            date: row.date,
            id: row.id,
            value: row.value,
            difference,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 1)]
    #[case(Some(""), 1)]
    #[case(Some("abc"), 1)]
    #[case(Some("1"), 1)]
    #[case(Some("3"), 3)]
    #[case(Some(" 2 "), 2)]
    #[case(Some("2.0"), 2)]
    #[case(Some("0"), 0)]
    #[case(Some("-1"), -1)]
    fn test_parse_periods(#[case] raw: Option<&str>, #[case] expected: i64) {
        assert_eq!(parse_periods(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("2.5")]
    #[case("inf")]
    #[case("NaN")]
    fn test_parse_periods_rejects_non_integers(#[case] raw: &str) {
        assert_matches!(parse_periods(Some(raw)), Err(TransformError::InvalidPeriods { .. }));
    }

    #[test]
    fn test_first_difference() {
        let values = [Some(10), Some(12), Some(15), Some(11)];
        assert_eq!(n_period_difference(&values, 1), vec![None, Some(2), Some(3), Some(-4)]);
    }

    #[test]
    fn test_zero_and_missing_values_are_skipped() {
        let values = [Some(10), None, Some(0), Some(13), None, Some(20)];
        assert_eq!(
            n_period_difference(&values, 1),
            vec![None, None, None, Some(3), None, Some(7)]
        );
    }

    #[test]
    fn test_larger_period_needs_history() {
        let values = [Some(1), Some(2), Some(4), Some(8), Some(16)];
        assert_eq!(
            n_period_difference(&values, 3),
            vec![None, None, None, Some(7), Some(14)]
        );

        // 保留值不足 n+1 個時全部為 None
        let short = [Some(1), None, Some(2), Some(0)];
        assert_eq!(n_period_difference(&short, 2), vec![None; 4]);
    }

    #[test]
    fn test_negative_period_looks_ahead() {
        let values = [Some(10), Some(12), Some(15)];
        assert_eq!(n_period_difference(&values, -1), vec![Some(-2), Some(-3), None]);
    }

    #[test]
    fn test_zero_period() {
        let values = [Some(5), None, Some(7)];
        assert_eq!(n_period_difference(&values, 0), vec![Some(0), None, Some(0)]);
    }

    #[test]
    fn test_apply_differences_per_group() {
        let date = |d| NaiveDate::from_ymd_opt(2017, 1, d).unwrap();
        let rows = vec![
            DenseRow { date: date(1), id: CompanyId::Int(1), value: Some(5) },
            DenseRow { date: date(1), id: CompanyId::Int(2), value: Some(100) },
            DenseRow { date: date(2), id: CompanyId::Int(1), value: None },
            DenseRow { date: date(2), id: CompanyId::Int(2), value: Some(90) },
            DenseRow { date: date(3), id: CompanyId::Int(1), value: Some(9) },
            DenseRow { date: date(3), id: CompanyId::Int(2), value: Some(0) },
        ];

        let merged = apply_differences(rows, 1);
        let diffs: Vec<_> = merged.iter().map(|r| r.difference).collect();

        assert_eq!(diffs, vec![None, None, None, Some(-10), Some(4), None]);
        assert_eq!(merged[4].value, Some(9));
    }

    proptest! {
        #[test]
        fn prop_output_length_and_gaps(
            values in prop::collection::vec(prop::option::of(-50i64..50), 0..40),
            periods in -5i64..6,
        ) {
            let out = n_period_difference(&values, periods);
            prop_assert_eq!(out.len(), values.len());

            // 被剔除的位置不會有差分
            for (value, diff) in values.iter().zip(&out) {
                if matches!(value, None | Some(0)) {
                    prop_assert!(diff.is_none());
                }
            }

            // 有差分的位置數等於保留值數減去 |n|
            let kept = values.iter().filter(|v| matches!(v, Some(x) if *x != 0)).count();
            let defined = out.iter().filter(|d| d.is_some()).count();
            prop_assert_eq!(defined, kept.saturating_sub(periods.unsigned_abs() as usize));
        }
    }
}
