//! 候補ツールと要求活動の照合
//!
//! - デジタル化スコア: 成熟度3軸（自動化・AI・同期）で要求を満たす割合をNFCで加重平均
//! - 機能網羅スコア: 候補が対応を宣言している要求活動の割合をNFCで加重
//! - 総合スコア: デジタル化 × 機能網羅 × 嗜好（どれかが0なら0）

use crate::aggregate::{RequiredActivities, RequiredActivity};
use crate::catalog::{CandidateTool, UNSET_LEVEL};
use serde::Serialize;

/// 候補1件のスコア内訳
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CandidateScores {
    pub digitalization: f64,
    pub capability: f64,
    pub preference: f64,
    pub total: f64,
}

/// 1軸の判定: 未設定（-1）は常に不成立
fn axis_met(candidate_level: i32, required_level: i32) -> bool {
    candidate_level > UNSET_LEVEL && candidate_level >= required_level
}

/// 1活動あたりの成熟度充足率（0.0〜1.0）
fn gap_closure(tool: &CandidateTool, activity: &RequiredActivity) -> f64 {
    let points = [
        axis_met(tool.automation, activity.automation),
        axis_met(tool.ai_level, activity.ai_level),
        axis_met(tool.synchronization, activity.synchronization),
    ]
    .into_iter()
    .filter(|&met| met)
    .count();

    points as f64 / 3.0
}

/// デジタル化スコア
pub fn digitalization_score(tool: &CandidateTool, required: &RequiredActivities) -> f64 {
    let total_weight = required.total_weight();
    if total_weight <= 0 {
        return 0.0;
    }

    let weighted: f64 = required
        .iter()
        .map(|a| gap_closure(tool, a) * f64::from(a.need_for_change))
        .sum();

    weighted / f64::from(total_weight)
}

/// 機能網羅スコア
pub fn capability_score(tool: &CandidateTool, required: &RequiredActivities) -> f64 {
    let total_weight = required.total_weight();
    if total_weight <= 0 {
        return 0.0;
    }

    let keys = tool.activity_keys();
    let matched: i32 = required
        .iter()
        .filter(|a| keys.contains(&a.key))
        .map(|a| a.need_for_change)
        .sum();

    f64::from(matched) / f64::from(total_weight)
}

/// 総合スコア（嗜好スコアは事前計算済みのものを渡す）
pub fn score_candidate(
    tool: &CandidateTool,
    required: &RequiredActivities,
    preference: f64,
) -> CandidateScores {
    let digitalization = digitalization_score(tool, required);
    let capability = capability_score(tool, required);

    CandidateScores {
        digitalization,
        capability,
        preference,
        total: digitalization * capability * preference,
    }
}
