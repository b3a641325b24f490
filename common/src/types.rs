//! 入力データの型定義
//!
//! - ActivityRecord: 組織の現行ツール（または手作業）と活動の組
//! - UserPreference: ユーザーの優先度（重み）と支払い方法

use crate::catalog::whole_codes;
use crate::error::Result;
use crate::ordinal::{self, AiLevel, Automation, NeedForChange, Synchronization};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// 手作業を表すツール名
pub const MANUAL_TOOL: &str = "None";

/// 組織の活動レコード（1活動 × 1ツール）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// 活動名（集約キーの元）
    #[serde(default)]
    pub category: String,

    /// 現行ツール名（手作業は "None"）
    #[serde(default)]
    pub tool: String,

    #[serde(default, with = "ordinal::label_serde")]
    pub digitalization: Option<Automation>,

    #[serde(default, with = "ordinal::label_serde")]
    pub ai_level: Option<AiLevel>,

    #[serde(default, with = "ordinal::label_serde")]
    pub synchronization: Option<Synchronization>,

    #[serde(default, with = "ordinal::label_serde")]
    pub need_for_change: Option<NeedForChange>,

    #[serde(default)]
    pub is_manual: bool,

    /// 同一ツールのレコードをまとめるID
    #[serde(
        default,
        rename = "base_tool_id",
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_tool_id: Option<String>,

    /// ユーザー評価の平均（表示用）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voe: Option<f64>,
}

impl ActivityRecord {
    /// ツール利用の活動レコードを作成
    pub fn new(category: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            tool: tool.into(),
            ..Default::default()
        }
    }

    /// 手作業レコードを作成
    pub fn manual(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            tool: MANUAL_TOOL.to_string(),
            digitalization: Some(Automation::Manual),
            is_manual: true,
            ..Default::default()
        }
    }

    pub fn with_need_for_change(mut self, nfc: NeedForChange) -> Self {
        self.need_for_change = Some(nfc);
        self
    }

    pub fn with_maturity(
        mut self,
        digitalization: Automation,
        ai_level: AiLevel,
        synchronization: Synchronization,
    ) -> Self {
        self.digitalization = Some(digitalization);
        self.ai_level = Some(ai_level);
        self.synchronization = Some(synchronization);
        self
    }

    pub fn with_base_tool_id(mut self, id: impl Into<String>) -> Self {
        self.base_tool_id = Some(id.into());
        self
    }

    /// 手作業かどうか（フラグ未設定でもツール名が "None" なら手作業）
    pub fn is_manual(&self) -> bool {
        self.is_manual || self.tool.trim() == MANUAL_TOOL
    }

    /// 集約キー（小文字化・trim済みの活動名）
    pub fn activity_key(&self) -> String {
        ordinal::normalize_key(&self.category)
    }

    pub fn nfc_score(&self) -> i32 {
        ordinal::score_of(self.need_for_change)
    }
}

/// ユーザー優先度（重みベクトル）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserPreference {
    pub usability: f64,
    pub support: f64,
    pub integration: f64,
    pub cost: f64,
    /// 受け入れ可能な支払い方法コード（空 = すべて可）
    pub payment_methods: BTreeSet<u32>,
}

/// ウィザードが保存する優先度レコード
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PreferenceRecord {
    tool_usability: Option<f64>,
    methodical_support: Option<f64>,
    tool_integration: Option<f64>,
    cost: Option<f64>,
    payment_method: Option<Vec<f64>>,
}

impl From<PreferenceRecord> for UserPreference {
    fn from(record: PreferenceRecord) -> Self {
        Self {
            usability: non_negative(record.tool_usability),
            support: non_negative(record.methodical_support),
            integration: non_negative(record.tool_integration),
            cost: non_negative(record.cost),
            payment_methods: whole_codes(record.payment_method.unwrap_or_default())
                .into_iter()
                .collect(),
        }
    }
}

fn non_negative(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0)
}

impl UserPreference {
    pub fn new(usability: f64, support: f64, integration: f64, cost: f64) -> Self {
        Self {
            usability,
            support,
            integration,
            cost,
            payment_methods: BTreeSet::new(),
        }
    }

    pub fn with_payment_methods(mut self, codes: impl IntoIterator<Item = u32>) -> Self {
        self.payment_methods = codes.into_iter().collect();
        self
    }

    /// 支払い方法の条件を外したコピー
    pub fn without_payment_filter(&self) -> Self {
        Self {
            payment_methods: BTreeSet::new(),
            ..self.clone()
        }
    }

    /// 支払い方法フィルタ（未指定なら `None` = すべて可）
    pub fn payment_filter(&self) -> Option<&BTreeSet<u32>> {
        if self.payment_methods.is_empty() {
            None
        } else {
            Some(&self.payment_methods)
        }
    }

    /// JSONから読み込み
    ///
    /// オブジェクト単体と1行のレコード配列の両方を受け付ける。
    /// 空配列・`null` は優先度なし（`None`）。
    pub fn from_json(json: &str) -> Result<Option<Self>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let record = match value {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::Array(mut rows) => {
                if rows.is_empty() {
                    return Ok(None);
                }
                rows.swap_remove(0)
            }
            other => other,
        };
        let record: PreferenceRecord = serde_json::from_value(record)?;
        Ok(Some(record.into()))
    }
}

/// 文字列・数値どちらのIDも文字列として受け付ける
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
