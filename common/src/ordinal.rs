//! 成熟度ラベルの順序値
//!
//! ウィザードで選択されるカテゴリラベル（変更必要度・AIレベル・自動化・同期）を
//! 固定の全順序で整数に写像する。ツール間の比較はすべてこの値で行う。
//!
//! | 軸 | ラベル → 値 |
//! |----|-------------|
//! | 変更必要度 | No need to change=1, Nice to change=2, Must change=3 |
//! | AIレベル | No=1, Descriptive=2, Diagnostic=3, Predictive=4, Prescriptive=5 |
//! | 自動化 | Automated=1, AI-Assisted=2, AI-Driven Automation=3 |
//! | 同期 | Ad-Hoc File Sharing=1 … Real-Time Ecosystem Integration=4 |
//!
//! 未知・未入力のラベルは0（最も未成熟）として扱い、エラーにはしない。

use serde::{Deserialize, Deserializer, Serializer};

/// 比較キー: 前後の空白を除去し小文字化
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 順序付きカテゴリラベル
pub trait OrdinalLabel: Copy + PartialEq + Sized + 'static {
    /// ログ出力用の軸名
    const KIND: &'static str;

    /// ラベル表（先頭が正式表記、後続は別名）
    const TABLE: &'static [(&'static str, Self)];

    /// 順序値
    fn score(self) -> i32;

    /// ラベル文字列から変換（大文字小文字・前後空白を無視）
    fn from_label(label: &str) -> Option<Self> {
        let key = normalize_key(label);
        Self::TABLE
            .iter()
            .find(|(l, _)| normalize_key(l) == key)
            .map(|(_, v)| *v)
    }

    /// 正式表記
    fn label(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, v)| *v == self)
            .map(|(l, _)| *l)
            .unwrap_or_default()
    }
}

/// 未設定は0
pub fn score_of<T: OrdinalLabel>(value: Option<T>) -> i32 {
    value.map_or(0, OrdinalLabel::score)
}

/// 変更必要度（NFC）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NeedForChange {
    NoNeed,
    NiceToChange,
    MustChange,
}

impl OrdinalLabel for NeedForChange {
    const KIND: &'static str = "needForChange";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("No need to change", Self::NoNeed),
        ("Nice to change", Self::NiceToChange),
        ("Must change", Self::MustChange),
    ];

    fn score(self) -> i32 {
        match self {
            Self::NoNeed => 1,
            Self::NiceToChange => 2,
            Self::MustChange => 3,
        }
    }
}

/// AI活用レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AiLevel {
    No,
    Descriptive,
    Diagnostic,
    Predictive,
    Prescriptive,
}

impl OrdinalLabel for AiLevel {
    const KIND: &'static str = "aiLevel";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("No", Self::No),
        ("Descriptive", Self::Descriptive),
        ("Diagnostic", Self::Diagnostic),
        ("Predictive", Self::Predictive),
        ("Prescriptive", Self::Prescriptive),
    ];

    fn score(self) -> i32 {
        match self {
            Self::No => 1,
            Self::Descriptive => 2,
            Self::Diagnostic => 3,
            Self::Predictive => 4,
            Self::Prescriptive => 5,
        }
    }
}

/// 自動化（デジタル化）レベル
///
/// `Manual` はツールなしの手作業を表し、順序値は0。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Automation {
    Manual,
    Automated,
    AiAssisted,
    AiDrivenAutomation,
}

impl OrdinalLabel for Automation {
    const KIND: &'static str = "digitalization";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("Manual", Self::Manual),
        ("Automated", Self::Automated),
        ("AI-Assisted", Self::AiAssisted),
        ("AI-Driven Automation", Self::AiDrivenAutomation),
        ("Automation", Self::AiDrivenAutomation),
    ];

    fn score(self) -> i32 {
        match self {
            Self::Manual => 0,
            Self::Automated => 1,
            Self::AiAssisted => 2,
            Self::AiDrivenAutomation => 3,
        }
    }
}

/// データ同期レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Synchronization {
    AdHocFileSharing,
    PlannedBatchExchange,
    StandardizedDataInterfaces,
    RealTimeEcosystemIntegration,
}

impl OrdinalLabel for Synchronization {
    const KIND: &'static str = "synchronization";
    const TABLE: &'static [(&'static str, Self)] = &[
        ("Ad-Hoc File Sharing", Self::AdHocFileSharing),
        ("Planned Batch Exchange", Self::PlannedBatchExchange),
        ("Standardized Data Interfaces", Self::StandardizedDataInterfaces),
        ("Real-Time Ecosystem Integration", Self::RealTimeEcosystemIntegration),
    ];

    fn score(self) -> i32 {
        match self {
            Self::AdHocFileSharing => 1,
            Self::PlannedBatchExchange => 2,
            Self::StandardizedDataInterfaces => 3,
            Self::RealTimeEcosystemIntegration => 4,
        }
    }
}

/// ラベル文字列 ⇔ `Option<T>` のserdeアダプタ
///
/// `#[serde(default, with = "crate::ordinal::label_serde")]` で使用する。
/// 未知のラベルは警告ログを出して `None` にする。
pub mod label_serde {
    use super::*;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: OrdinalLabel,
    {
        match value {
            Some(v) => serializer.serialize_str(v.label()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: OrdinalLabel,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|label| parse_lenient(&label)))
    }
}

/// 未知のラベルをログに残して `None` を返す
pub fn parse_lenient<T: OrdinalLabel>(label: &str) -> Option<T> {
    if label.trim().is_empty() {
        return None;
    }
    let parsed = T::from_label(label);
    if parsed.is_none() {
        tracing::warn!(kind = T::KIND, label, "unknown label, scored as 0");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_need_for_change_scores() {
        assert_eq!(score_of(NeedForChange::from_label("No need to change")), 1);
        assert_eq!(score_of(NeedForChange::from_label("Nice to change")), 2);
        assert_eq!(score_of(NeedForChange::from_label("Must change")), 3);
        assert_eq!(score_of(NeedForChange::from_label("Should change")), 0);
        assert_eq!(score_of::<NeedForChange>(None), 0);
    }

    #[test]
    fn test_ai_level_scores() {
        let expected = [
            ("No", 1),
            ("Descriptive", 2),
            ("Diagnostic", 3),
            ("Predictive", 4),
            ("Prescriptive", 5),
            ("Generative", 0),
        ];
        for (label, score) in expected {
            assert_eq!(score_of(AiLevel::from_label(label)), score, "{label}");
        }
    }

    #[test]
    fn test_automation_scores() {
        assert_eq!(score_of(Automation::from_label("Automated")), 1);
        assert_eq!(score_of(Automation::from_label("AI-Assisted")), 2);
        assert_eq!(score_of(Automation::from_label("AI-Driven Automation")), 3);
        // 手作業は最も未成熟
        assert_eq!(score_of(Automation::from_label("Manual")), 0);
    }

    #[test]
    fn test_automation_alias_keeps_canonical_label() {
        let alias = Automation::from_label("Automation").unwrap();
        assert_eq!(alias, Automation::AiDrivenAutomation);
        assert_eq!(alias.label(), "AI-Driven Automation");
    }

    #[test]
    fn test_synchronization_scores() {
        assert_eq!(score_of(Synchronization::from_label("Ad-Hoc File Sharing")), 1);
        assert_eq!(score_of(Synchronization::from_label("Planned Batch Exchange")), 2);
        assert_eq!(score_of(Synchronization::from_label("Standardized Data Interfaces")), 3);
        assert_eq!(score_of(Synchronization::from_label("Real-Time Ecosystem Integration")), 4);
    }

    #[test]
    fn test_from_label_ignores_case_and_whitespace() {
        assert_eq!(
            NeedForChange::from_label("  must CHANGE "),
            Some(NeedForChange::MustChange)
        );
        assert_eq!(AiLevel::from_label("predictive"), Some(AiLevel::Predictive));
    }

    #[test]
    fn test_parse_lenient_empty_is_none() {
        assert_eq!(parse_lenient::<AiLevel>("   "), None);
        assert_eq!(parse_lenient::<AiLevel>("Diagnostic"), Some(AiLevel::Diagnostic));
    }

    #[test]
    fn test_order_matches_scores() {
        for pair in NeedForChange::TABLE.windows(2) {
            assert!(pair[0].1.score() < pair[1].1.score());
        }
        for pair in AiLevel::TABLE.windows(2) {
            assert!(pair[0].1.score() < pair[1].1.score());
        }
    }
}
