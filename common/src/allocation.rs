//! 割当戦略
//!
//! 候補プールから総合スコア最大の候補を1件選び、その候補が対応する要求活動を
//! 充足済みとして取り除く（select-and-cover）。これを繰り返す貪欲法を3通り提供する。
//!
//! ## 戦略
//! 1. 総合スコア優先: 全活動を最初に集約し、プールが尽きるか全活動が充足されるまで繰り返す
//! 2. 1件ずつ交換: 手作業を切り出した後、緊急度の高い現行ツールから順に活動を追加して1ラウンドずつ実行
//! 3. 強制交換: 2と同じ順序だが、各現行ツールの活動をすべて包含する候補だけを選ぶ
//!
//! 2と3は最後に残った活動を制約なしのラウンドで回収する。
//! 最適解ではなく比較用のヒューリスティクスである。

use crate::aggregate::RequiredActivities;
use crate::catalog::{CandidateTool, Catalog};
use crate::landscape::{OrganizationLandscape, ToolEntry};
use crate::matcher::{score_candidate, CandidateScores};
use crate::preference::preference_score;
use crate::types::UserPreference;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// 割当戦略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    TotalScore,
    OneByOne,
    ForcedExchange,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Self::TotalScore, Self::OneByOne, Self::ForcedExchange];

    /// 表示名
    pub fn title(&self) -> &'static str {
        match self {
            Self::TotalScore => "Total Score Prioritization Approach",
            Self::OneByOne => "One-by-One Exchange Approach",
            Self::ForcedExchange => "Forced Exchange Approach",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TotalScore => write!(f, "total-score"),
            Self::OneByOne => write!(f, "one-by-one"),
            Self::ForcedExchange => write!(f, "forced-exchange"),
        }
    }
}

/// 選定されたツール1件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationEntry {
    pub tool_name: String,
    /// 選定時の総合スコア
    pub score: f64,
    /// 充足した活動キー（要求集合の順）
    pub activities: Vec<String>,
    pub scores: CandidateScores,
    pub automation: i32,
    pub ai_level: i32,
    pub synchronization: i32,
}

/// 割当結果（選定順。並べ替えはしない）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocationResult {
    pub entries: Vec<AllocationEntry>,
}

impl AllocationResult {
    /// 推薦スコア: 先頭（最初に選ばれた）エントリのスコア
    pub fn aggregate_score(&self) -> Option<f64> {
        self.entries.first().map(|e| e.score)
    }

    /// 充足された活動キーの和集合
    pub fn covered_keys(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .flat_map(|e| e.activities.iter().cloned())
            .collect()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.tool_name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// 1戦略の実行状態（呼び出しごとに入力から作り直す）
struct Allocator<'a> {
    /// (候補, 事前計算した嗜好スコア)。カタログ順
    pool: Vec<(&'a CandidateTool, f64)>,
    required: RequiredActivities,
    covered: HashSet<String>,
    entries: Vec<AllocationEntry>,
}

impl<'a> Allocator<'a> {
    fn new(
        catalog: &'a Catalog,
        preference: Option<&UserPreference>,
        payment_filter: Option<&BTreeSet<u32>>,
    ) -> Self {
        let pool = catalog
            .iter()
            .filter(|tool| tool.accepts_payment(payment_filter))
            .map(|tool| (tool, preference_score(tool, preference)))
            .collect();

        Self {
            pool,
            required: RequiredActivities::new(),
            covered: HashSet::new(),
            entries: Vec::new(),
        }
    }

    /// 未充足の活動だけを要求集合に加える
    fn require(&mut self, tool: &ToolEntry) {
        for record in &tool.activities {
            if !self.covered.contains(&record.activity_key()) {
                self.required.insert_record(record);
            }
        }
    }

    /// 総合スコア最大の候補（同点は先に見つかった方）
    fn find_highest_scorer(
        &self,
        superset_of: Option<&HashSet<String>>,
    ) -> Option<(usize, CandidateScores)> {
        let mut best: Option<(usize, CandidateScores)> = None;

        for (idx, (tool, preference)) in self.pool.iter().enumerate() {
            if let Some(keys) = superset_of {
                if !tool.activity_keys().is_superset(keys) {
                    continue;
                }
            }
            let scores = score_candidate(tool, &self.required, *preference);
            if best.map_or(true, |(_, b)| scores.total > b.total) {
                best = Some((idx, scores));
            }
        }

        best
    }

    /// select-and-cover 1ラウンド
    ///
    /// 候補を選べなかった場合のみ `false`。選ばれた候補は何も充足しなくてもプールから外す。
    fn select_and_cover(&mut self, superset_of: Option<&HashSet<String>>) -> bool {
        if self.required.is_empty() {
            return false;
        }
        let Some((idx, scores)) = self.find_highest_scorer(superset_of) else {
            return false;
        };
        let (tool, _) = self.pool.remove(idx);

        let activities: Vec<String> = self
            .required
            .keys()
            .filter(|key| tool.supports(key))
            .map(str::to_string)
            .collect();

        tracing::debug!(
            tool = %tool.name,
            score = scores.total,
            covered = activities.len(),
            remaining = self.required.len() - activities.len(),
            "select-and-cover"
        );

        if activities.is_empty() {
            return true;
        }
        for key in &activities {
            self.required.remove(key);
            self.covered.insert(key.clone());
        }
        self.entries.push(AllocationEntry {
            tool_name: tool.name.clone(),
            score: scores.total,
            activities,
            scores,
            automation: tool.automation,
            ai_level: tool.ai_level,
            synchronization: tool.synchronization,
        });
        true
    }

    /// 要求がなくなるかプールが尽きるまで繰り返す
    fn drain(&mut self) {
        while self.select_and_cover(None) {}
    }

    fn finish(self, strategy: Strategy) -> AllocationResult {
        tracing::info!(
            %strategy,
            tools = self.entries.len(),
            uncovered = self.required.len(),
            "allocation finished"
        );
        AllocationResult {
            entries: self.entries,
        }
    }
}

/// 現行ツールを緊急度の降順に並べる（同点は元の順）
fn order_by_priority(mut tools: Vec<ToolEntry>) -> Vec<ToolEntry> {
    tools.sort_by(|a, b| b.priority().total_cmp(&a.priority()));
    tools
}

/// 総合スコア優先
pub fn run_total_score_prioritization(
    landscape: &OrganizationLandscape,
    catalog: &Catalog,
    preference: Option<&UserPreference>,
    payment_filter: Option<&BTreeSet<u32>>,
) -> AllocationResult {
    let mut allocator = Allocator::new(catalog, preference, payment_filter);
    allocator.required = landscape.required_activities();
    allocator.drain();
    allocator.finish(Strategy::TotalScore)
}

/// 1件ずつ交換
pub fn run_one_by_one_exchange(
    landscape: &OrganizationLandscape,
    catalog: &Catalog,
    preference: Option<&UserPreference>,
    payment_filter: Option<&BTreeSet<u32>>,
) -> AllocationResult {
    let mut allocator = Allocator::new(catalog, preference, payment_filter);
    let (manual, tools) = landscape.split_manual();
    allocator.required = manual;

    for tool in order_by_priority(tools) {
        allocator.require(&tool);
        allocator.select_and_cover(None);
    }

    allocator.drain();
    allocator.finish(Strategy::OneByOne)
}

/// 強制交換
pub fn run_forced_exchange(
    landscape: &OrganizationLandscape,
    catalog: &Catalog,
    preference: Option<&UserPreference>,
    payment_filter: Option<&BTreeSet<u32>>,
) -> AllocationResult {
    let mut allocator = Allocator::new(catalog, preference, payment_filter);
    let (manual, tools) = landscape.split_manual();
    allocator.required = manual;

    for tool in order_by_priority(tools) {
        allocator.require(&tool);
        let outgoing = tool.activity_keys();
        allocator.select_and_cover(Some(&outgoing));
    }

    allocator.drain();
    allocator.finish(Strategy::ForcedExchange)
}

/// 戦略を指定して実行
pub fn allocate(
    strategy: Strategy,
    landscape: &OrganizationLandscape,
    catalog: &Catalog,
    preference: Option<&UserPreference>,
    payment_filter: Option<&BTreeSet<u32>>,
) -> AllocationResult {
    match strategy {
        Strategy::TotalScore => {
            run_total_score_prioritization(landscape, catalog, preference, payment_filter)
        }
        Strategy::OneByOne => run_one_by_one_exchange(landscape, catalog, preference, payment_filter),
        Strategy::ForcedExchange => run_forced_exchange(landscape, catalog, preference, payment_filter),
    }
}
