//! 組織の現行ツール構成
//!
//! 活動レコードを現行ツール単位にまとめる。手作業（ツールなし）の活動は
//! 交換系の割当戦略で先に切り出される。

use crate::aggregate::{flatten_activities, RequiredActivities};
use crate::error::Result;
use crate::ordinal::{normalize_key, OrdinalLabel, NeedForChange};
use crate::types::ActivityRecord;
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashSet};

/// 現行ツール1件とその活動
#[derive(Debug, Clone, Default)]
pub struct ToolEntry {
    pub tool_id: String,
    pub tool_name: String,
    pub activities: Vec<ActivityRecord>,
}

impl ToolEntry {
    /// すべての活動が手作業なら手作業エントリ
    pub fn is_manual_task(&self) -> bool {
        !self.activities.is_empty() && self.activities.iter().all(ActivityRecord::is_manual)
    }

    /// 置き換えの緊急度
    pub fn priority(&self) -> f64 {
        tool_prioritization(&self.activities)
    }

    /// 活動キー集合
    pub fn activity_keys(&self) -> HashSet<String> {
        self.activities
            .iter()
            .map(ActivityRecord::activity_key)
            .filter(|k| !k.is_empty())
            .collect()
    }
}

/// ツールの優先度 = 活動のNFCスコアの平均（活動なしは0）
pub fn tool_prioritization(activities: &[ActivityRecord]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }
    let total: i32 = activities.iter().map(ActivityRecord::nfc_score).sum();
    f64::from(total) / activities.len() as f64
}

/// 組織の現行ツール構成
#[derive(Debug, Clone, Default)]
pub struct OrganizationLandscape {
    tools: IndexMap<String, ToolEntry>,
}

impl OrganizationLandscape {
    /// レコードをツール単位にまとめる
    ///
    /// グループキーは `base_tool_id`、なければツール名。
    /// IDのない手作業は活動ごとに別エントリになる。
    pub fn from_records(records: impl IntoIterator<Item = ActivityRecord>) -> Self {
        let mut tools: IndexMap<String, ToolEntry> = IndexMap::new();

        for record in records {
            let tool_id = match &record.base_tool_id {
                Some(id) => id.clone(),
                None if record.is_manual() => format!("manual:{}", record.activity_key()),
                None => record.tool.trim().to_string(),
            };
            let entry = tools.entry(tool_id.clone()).or_insert_with(|| ToolEntry {
                tool_id,
                tool_name: record.tool.trim().to_string(),
                activities: Vec::new(),
            });
            entry.activities.push(record);
        }

        Self { tools }
    }

    /// ウィザードのJSON（レコード配列）から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<ActivityRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    pub fn tools(&self) -> impl Iterator<Item = &ToolEntry> {
        self.tools.values()
    }

    pub fn records(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.tools.values().flat_map(|t| t.activities.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.tools.values().all(|t| t.activities.is_empty())
    }

    /// 全活動（手作業含む）を集約
    pub fn required_activities(&self) -> RequiredActivities {
        flatten_activities(self.records())
    }

    /// 手作業の活動を切り出す
    ///
    /// 戻り値は (手作業の要求活動, 手作業を除いた残りのツール)。
    /// 手作業のみのエントリは残りから外れる。入力は変更しない。
    pub fn split_manual(&self) -> (RequiredActivities, Vec<ToolEntry>) {
        let mut manual = RequiredActivities::new();
        let mut remaining = Vec::new();

        for entry in self.tools.values() {
            let (manual_records, tool_records): (Vec<_>, Vec<_>) =
                entry.activities.iter().partition(|r| r.is_manual());

            for record in manual_records {
                manual.insert_record(record);
            }
            if !tool_records.is_empty() {
                remaining.push(ToolEntry {
                    tool_id: entry.tool_id.clone(),
                    tool_name: entry.tool_name.clone(),
                    activities: tool_records.into_iter().cloned().collect(),
                });
            }
        }

        (manual, remaining)
    }

    /// 全活動キー（網羅判定の基準）
    pub fn all_activity_keys(&self) -> BTreeSet<String> {
        self.records()
            .map(ActivityRecord::activity_key)
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// 活動に付いた最も強い変更必要度
    pub fn max_need_for_change(&self, activity: &str) -> Option<NeedForChange> {
        let key = normalize_key(activity);
        self.records()
            .filter(|r| r.activity_key() == key)
            .filter_map(|r| r.need_for_change)
            .max_by_key(|nfc| nfc.score())
    }
}
