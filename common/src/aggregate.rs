//! 要求活動の集約
//!
//! 組織の活動レコードを活動名（小文字化・trim）で重複排除し、
//! 各軸について観測された最大の順序値を保持する（最悪値が支配する）。

use crate::ordinal::score_of;
use crate::types::ActivityRecord;
use indexmap::IndexMap;
use serde::Serialize;

/// 集約済みの要求活動
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredActivity {
    /// 集約キー
    pub key: String,
    /// 最初に観測した表記（表示用）
    pub name: String,
    pub automation: i32,
    pub ai_level: i32,
    pub synchronization: i32,
    pub need_for_change: i32,
}

impl RequiredActivity {
    pub fn from_record(record: &ActivityRecord) -> Self {
        Self {
            key: record.activity_key(),
            name: record.category.trim().to_string(),
            automation: score_of(record.digitalization),
            ai_level: score_of(record.ai_level),
            synchronization: score_of(record.synchronization),
            need_for_change: record.nfc_score(),
        }
    }

    /// 各軸を max で取り込む（値は減少しない）
    pub fn absorb(&mut self, other: &RequiredActivity) {
        self.automation = self.automation.max(other.automation);
        self.ai_level = self.ai_level.max(other.ai_level);
        self.synchronization = self.synchronization.max(other.synchronization);
        self.need_for_change = self.need_for_change.max(other.need_for_change);
    }
}

/// 要求活動の集合（挿入順を保持）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequiredActivities {
    inner: IndexMap<String, RequiredActivity>,
}

impl RequiredActivities {
    pub fn new() -> Self {
        Self::default()
    }

    /// レコードを追加（既存キーは要素ごとに max で更新）
    pub fn insert_record(&mut self, record: &ActivityRecord) {
        let activity = RequiredActivity::from_record(record);
        if activity.key.is_empty() {
            return;
        }
        self.insert(activity);
    }

    pub fn insert(&mut self, activity: RequiredActivity) {
        match self.inner.get_mut(&activity.key) {
            Some(existing) => existing.absorb(&activity),
            None => {
                self.inner.insert(activity.key.clone(), activity);
            }
        }
    }

    /// 別の集合を取り込む
    pub fn merge(&mut self, other: &RequiredActivities) {
        for activity in other.iter() {
            self.insert(activity.clone());
        }
    }

    /// 充足済みとして取り除く（残りの順序は維持）
    pub fn remove(&mut self, key: &str) -> Option<RequiredActivity> {
        self.inner.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&RequiredActivity> {
        self.inner.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RequiredActivity> {
        self.inner.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// NFCの総重み
    pub fn total_weight(&self) -> i32 {
        self.inner.values().map(|a| a.need_for_change).sum()
    }
}

/// 活動レコード群を要求活動の集合に平坦化
pub fn flatten_activities<'a, I>(records: I) -> RequiredActivities
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    let mut required = RequiredActivities::new();
    for record in records {
        required.insert_record(record);
    }
    required
}
