//! Tool Stack Common Library
//!
//! ツールスタック推薦エンジン本体（CLI・他のフロントエンドで共有）
//!
//! 1. 組織の活動レコードを要求活動に集約（最悪値が支配）
//! 2. 候補ツールごとに嗜好スコアを1回だけ計算
//! 3. 割当戦略が select-and-cover を繰り返して推薦スタックを作る

pub mod error;
pub mod ordinal;
pub mod types;
pub mod catalog;
pub mod aggregate;
pub mod landscape;
pub mod preference;
pub mod matcher;
pub mod allocation;
pub mod recommend;

pub use error::{Error, Result};
pub use ordinal::{normalize_key, score_of, AiLevel, Automation, NeedForChange, OrdinalLabel, Synchronization};
pub use types::{ActivityRecord, UserPreference, MANUAL_TOOL};
pub use catalog::{CandidateTool, Catalog, CatalogActivity, UNSET_LEVEL};
pub use aggregate::{flatten_activities, RequiredActivities, RequiredActivity};
pub use landscape::{tool_prioritization, OrganizationLandscape, ToolEntry};
pub use preference::preference_score;
pub use matcher::{capability_score, digitalization_score, score_candidate, CandidateScores};
pub use allocation::{
    allocate, run_forced_exchange, run_one_by_one_exchange, run_total_score_prioritization,
    AllocationEntry, AllocationResult, Strategy,
};
pub use recommend::{check_coverage, is_fully_covered, recommend, recommend_all, Coverage, StrategyOutcome};
