//! 推薦候補ツールのカタログ
//!
//! ツール名 → 候補定義のマップ。走査順（= 同点時の優先順）は読み込み順を保持する。

use crate::error::{Error, Result};
use crate::ordinal::normalize_key;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// 成熟度が未設定
pub const UNSET_LEVEL: i32 = -1;

/// 支払い方法「未申告」を表すコード
pub const NO_PAYMENT_METHOD: u32 = 0;

/// 候補ツールが対応する活動
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogActivity {
    /// 活動名（要求活動との照合に使う）
    pub activity: String,
    /// 活動の分類（表示用）
    pub category: String,
}

impl CatalogActivity {
    pub fn new(activity: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            category: String::new(),
        }
    }
}

/// 推薦候補ツール
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateTool {
    pub name: String,
    pub activities: Vec<CatalogActivity>,
    /// 自動化レベル（-1 = 未設定）
    pub automation: i32,
    pub ai_level: i32,
    pub synchronization: i32,
    pub integration: f64,
    pub usability: f64,
    pub cost: f64,
    pub support: f64,
    pub functionality: f64,
    /// 対応する支払い方法（未申告は空）
    pub payment_methods: BTreeSet<u32>,
}

impl CandidateTool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activities: Vec::new(),
            automation: UNSET_LEVEL,
            ai_level: UNSET_LEVEL,
            synchronization: UNSET_LEVEL,
            integration: 0.0,
            usability: 0.0,
            cost: 0.0,
            support: 0.0,
            functionality: 0.0,
            payment_methods: BTreeSet::new(),
        }
    }

    pub fn with_activities<I, S>(mut self, activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activities = activities.into_iter().map(CatalogActivity::new).collect();
        self
    }

    pub fn with_maturity(mut self, automation: i32, ai_level: i32, synchronization: i32) -> Self {
        self.automation = automation;
        self.ai_level = ai_level;
        self.synchronization = synchronization;
        self
    }

    /// 嗜好スコア用の属性（usability, support, integration, cost, functionality）
    pub fn with_attributes(
        mut self,
        usability: f64,
        support: f64,
        integration: f64,
        cost: f64,
        functionality: f64,
    ) -> Self {
        self.usability = usability;
        self.support = support;
        self.integration = integration;
        self.cost = cost;
        self.functionality = functionality;
        self
    }

    pub fn with_payment_methods(mut self, codes: impl IntoIterator<Item = u32>) -> Self {
        self.payment_methods = payment_set(codes);
        self
    }

    /// 対応活動の正規化キー集合
    pub fn activity_keys(&self) -> HashSet<String> {
        self.activities
            .iter()
            .map(|a| normalize_key(&a.activity))
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// 正規化キーで対応可否を判定
    pub fn supports(&self, activity_key: &str) -> bool {
        self.activities
            .iter()
            .any(|a| normalize_key(&a.activity) == activity_key)
    }

    /// 支払い方法フィルタを満たすか（フィルタなしは常に可）
    pub fn accepts_payment(&self, filter: Option<&BTreeSet<u32>>) -> bool {
        match filter {
            None => true,
            Some(accepted) if accepted.is_empty() => true,
            Some(accepted) => !self.payment_methods.is_disjoint(accepted),
        }
    }
}

fn payment_set(codes: impl IntoIterator<Item = u32>) -> BTreeSet<u32> {
    codes
        .into_iter()
        .filter(|&c| c != NO_PAYMENT_METHOD)
        .collect()
}

/// カタログJSONのレコード（数値属性はすべて任意）
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateRecord {
    activities: Option<Vec<CatalogActivity>>,
    automation: Option<f64>,
    ai_level: Option<f64>,
    #[serde(alias = "synchronization")]
    syncronization: Option<f64>,
    integration: Option<f64>,
    usability: Option<f64>,
    cost: Option<f64>,
    support: Option<f64>,
    functionality: Option<f64>,
    payment_method: Option<Vec<f64>>,
}

/// 整数値のコードだけを残す（1.0 は 1、1.5 や負数は捨てる）
pub(crate) fn whole_codes(values: Vec<f64>) -> Vec<u32> {
    values
        .into_iter()
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v as u32)
        .collect()
}

impl CandidateRecord {
    fn into_tool(self, name: String) -> CandidateTool {
        let level = |v: Option<f64>| {
            v.filter(|x| x.is_finite())
                .map_or(UNSET_LEVEL, |x| x.round() as i32)
        };
        let attr = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(0.0);

        CandidateTool {
            name,
            activities: self.activities.unwrap_or_default(),
            automation: level(self.automation),
            ai_level: level(self.ai_level),
            synchronization: level(self.syncronization),
            integration: attr(self.integration),
            usability: attr(self.usability),
            cost: attr(self.cost),
            support: attr(self.support),
            functionality: attr(self.functionality),
            payment_methods: payment_set(whole_codes(self.payment_method.unwrap_or_default())),
        }
    }
}

/// 候補ツールカタログ
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tools: IndexMap<String, CandidateTool>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 候補ツールの並びからカタログを作成（同名は後勝ち、位置は先勝ち）
    pub fn from_tools(tools: impl IntoIterator<Item = CandidateTool>) -> Self {
        let mut catalog = Self::new();
        for tool in tools {
            catalog.insert(tool);
        }
        catalog
    }

    /// JSON（ツール名 → レコード）から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let records: IndexMap<String, CandidateRecord> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (name, record) in records {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(Error::InvalidCatalog("tool name is empty".into()));
            }
            catalog.insert(record.into_tool(name));
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, tool: CandidateTool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    pub fn get(&self, name: &str) -> Option<&CandidateTool> {
        self.tools.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateTool> {
        self.tools.values()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
