//! 推薦の実行と網羅判定
//!
//! 支払い方法フィルタ付きで戦略を実行し、組織の全活動を網羅できなければ
//! フィルタなしで再実行する。再実行した結果には「支払い条件なし」フラグを付ける。

use crate::allocation::{allocate, AllocationResult, Strategy};
use crate::catalog::Catalog;
use crate::landscape::OrganizationLandscape;
use crate::types::UserPreference;
use serde::Serialize;
use std::collections::BTreeSet;

/// 網羅判定の結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub complete: bool,
    /// 未充足の活動キー（昇順）
    pub uncovered: Vec<String>,
}

/// 結果の充足活動が組織の全活動と一致するか
pub fn check_coverage(landscape: &OrganizationLandscape, result: &AllocationResult) -> Coverage {
    let required = landscape.all_activity_keys();
    let covered = result.covered_keys();
    let uncovered: Vec<String> = required.difference(&covered).cloned().collect();

    Coverage {
        complete: uncovered.is_empty(),
        uncovered,
    }
}

pub fn is_fully_covered(landscape: &OrganizationLandscape, result: &AllocationResult) -> bool {
    check_coverage(landscape, result).complete
}

/// 1戦略の推薦結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub title: &'static str,
    pub result: AllocationResult,
    /// 先頭エントリのスコア（結果が空なら `None`）
    pub aggregate_score: Option<f64>,
    /// 支払い方法を無視して再実行した結果か
    pub payment_unconstrained: bool,
    pub coverage: Coverage,
}

/// 戦略を1つ実行（支払い条件のフォールバック付き）
pub fn recommend(
    strategy: Strategy,
    landscape: &OrganizationLandscape,
    catalog: &Catalog,
    preference: Option<&UserPreference>,
) -> StrategyOutcome {
    let filter: Option<&BTreeSet<u32>> = preference.and_then(UserPreference::payment_filter);

    let mut result = allocate(strategy, landscape, catalog, preference, filter);
    let mut coverage = check_coverage(landscape, &result);
    let mut payment_unconstrained = false;

    if filter.is_some() && !coverage.complete {
        tracing::warn!(
            %strategy,
            uncovered = coverage.uncovered.len(),
            "payment methods leave activities uncovered, retrying without payment filter"
        );
        result = allocate(strategy, landscape, catalog, preference, None);
        coverage = check_coverage(landscape, &result);
        payment_unconstrained = true;
    }

    StrategyOutcome {
        strategy,
        title: strategy.title(),
        aggregate_score: result.aggregate_score(),
        result,
        payment_unconstrained,
        coverage,
    }
}

/// 3戦略をすべて実行
pub fn recommend_all(
    landscape: &OrganizationLandscape,
    catalog: &Catalog,
    preference: Option<&UserPreference>,
) -> Vec<StrategyOutcome> {
    Strategy::ALL
        .iter()
        .map(|&strategy| recommend(strategy, landscape, catalog, preference))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CandidateTool;
    use crate::ordinal::NeedForChange;
    use crate::types::ActivityRecord;

    fn tool(name: &str, activities: &[&str], payment: &[u32]) -> CandidateTool {
        CandidateTool::new(name)
            .with_activities(activities.iter().copied())
            .with_maturity(3, 5, 4)
            .with_attributes(5.0, 5.0, 5.0, 5.0, 5.0)
            .with_payment_methods(payment.iter().copied())
    }

    fn landscape() -> OrganizationLandscape {
        OrganizationLandscape::from_records(vec![
            ActivityRecord::manual("Data Entry").with_need_for_change(NeedForChange::MustChange),
            ActivityRecord::new("Reporting", "Sheets").with_need_for_change(NeedForChange::NoNeed),
        ])
    }

    #[test]
    fn test_coverage_complete() {
        let catalog = Catalog::from_tools([
            tool("ToolA", &["data entry"], &[]),
            tool("ToolB", &["reporting"], &[]),
        ]);
        let pref = UserPreference::new(1.0, 1.0, 1.0, 1.0);

        let outcome = recommend(Strategy::TotalScore, &landscape(), &catalog, Some(&pref));
        assert!(outcome.coverage.complete);
        assert!(outcome.coverage.uncovered.is_empty());
        assert!(!outcome.payment_unconstrained);
        assert_eq!(outcome.aggregate_score, outcome.result.aggregate_score());
    }

    #[test]
    fn test_coverage_reports_uncovered() {
        let catalog = Catalog::from_tools([tool("ToolA", &["data entry"], &[])]);
        let pref = UserPreference::new(1.0, 1.0, 1.0, 1.0);

        let outcome = recommend(Strategy::OneByOne, &landscape(), &catalog, Some(&pref));
        assert!(!outcome.coverage.complete);
        assert_eq!(outcome.coverage.uncovered, vec!["reporting".to_string()]);
        // フィルタなしなので再実行しない
        assert!(!outcome.payment_unconstrained);
    }

    #[test]
    fn test_payment_fallback() {
        let catalog = Catalog::from_tools([
            tool("ToolA", &["data entry"], &[1]),
            tool("ToolB", &["reporting"], &[2]),
        ]);
        let pref = UserPreference::new(1.0, 1.0, 1.0, 1.0).with_payment_methods([1]);

        let outcome = recommend(Strategy::TotalScore, &landscape(), &catalog, Some(&pref));
        assert!(outcome.payment_unconstrained);
        assert!(outcome.coverage.complete);
        assert_eq!(outcome.result.tool_names(), vec!["ToolA", "ToolB"]);
    }

    #[test]
    fn test_payment_filter_satisfied_no_fallback() {
        let catalog = Catalog::from_tools([
            tool("Cheap", &["data entry", "reporting"], &[1]),
            tool("Other", &["data entry", "reporting"], &[2]),
        ]);
        let pref = UserPreference::new(0.0, 0.0, 0.0, 5.0).with_payment_methods([2]);

        let outcome = recommend(Strategy::ForcedExchange, &landscape(), &catalog, Some(&pref));
        assert!(!outcome.payment_unconstrained);
        assert_eq!(outcome.result.tool_names(), vec!["Other"]);
    }

    #[test]
    fn test_recommend_all_order() {
        let catalog = Catalog::from_tools([tool("ToolA", &["data entry", "reporting"], &[])]);
        let outcomes = recommend_all(&landscape(), &catalog, None);
        let strategies: Vec<_> = outcomes.iter().map(|o| o.strategy).collect();
        assert_eq!(strategies, Strategy::ALL.to_vec());
        assert!(outcomes.iter().all(|o| o.coverage.complete));
    }

    #[test]
    fn test_empty_result_has_no_score() {
        let outcome = recommend(Strategy::TotalScore, &landscape(), &Catalog::new(), None);
        assert!(outcome.result.is_empty());
        assert_eq!(outcome.aggregate_score, None);
        assert_eq!(outcome.coverage.uncovered.len(), 2);
    }
}
