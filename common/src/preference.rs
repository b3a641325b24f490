//! 嗜好スコア
//!
//! ユーザーの重み（使いやすさ・サポート・連携・コスト）と候補ツールの属性から
//! 正規化された嗜好スコアを求める。機能性は常に固定重み5で加算するため、
//! ユーザーの重みがすべて0でも分母は0にならない。

use crate::catalog::CandidateTool;
use crate::types::UserPreference;

/// 機能性の固定重み
pub const FUNCTIONALITY_WEIGHT: f64 = 5.0;

/// 正規化係数（属性1〜5 × 重みスケール）
pub const NORMALIZATION_FACTOR: f64 = 25.0;

/// 嗜好スコア
///
/// ```text
/// (u·w_u + s·w_s + i·w_i + c·w_c + f·5) / (25 · (w_u + w_s + w_i + w_c + 5))
/// ```
///
/// 優先度が未入力（`None`）なら0.0。
pub fn preference_score(tool: &CandidateTool, preference: Option<&UserPreference>) -> f64 {
    let Some(pref) = preference else {
        return 0.0;
    };

    let weighted = tool.usability * pref.usability
        + tool.support * pref.support
        + tool.integration * pref.integration
        + tool.cost * pref.cost
        + tool.functionality * FUNCTIONALITY_WEIGHT;
    let weights = pref.usability + pref.support + pref.integration + pref.cost + FUNCTIONALITY_WEIGHT;

    weighted / (NORMALIZATION_FACTOR * weights)
}
