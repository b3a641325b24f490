//! Excelカタログの読み込み（calamine）
//!
//! 先頭シートの1行目をヘッダーとし、1行 = 1（ツール, 活動）として読む。
//! 同じツールの行はまとめ、数値属性は最初に入力された値を採用する。

use crate::error::{AdvisorError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use indexmap::IndexMap;
use std::path::Path;
use toolstack_common::{CandidateTool, Catalog, CatalogActivity, UNSET_LEVEL};

/// 列の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Tool,
    Activity,
    Category,
    Automation,
    AiLevel,
    Synchronization,
    Integration,
    Usability,
    Cost,
    Support,
    Functionality,
    PaymentMethod,
}

impl Column {
    fn from_header(header: &str) -> Option<Self> {
        let key = header.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "tool" | "tool_name" | "name" => Some(Self::Tool),
            "activity" => Some(Self::Activity),
            "category" => Some(Self::Category),
            "automation" => Some(Self::Automation),
            "ai_level" | "ailevel" => Some(Self::AiLevel),
            "syncronization" | "synchronization" => Some(Self::Synchronization),
            "integration" => Some(Self::Integration),
            "usability" => Some(Self::Usability),
            "cost" => Some(Self::Cost),
            "support" => Some(Self::Support),
            "functionality" => Some(Self::Functionality),
            "payment_method" | "payment_methods" => Some(Self::PaymentMethod),
            _ => None,
        }
    }
}

/// ツール1件分の集計
#[derive(Debug, Default)]
struct ToolRows {
    activities: Vec<CatalogActivity>,
    automation: Option<f64>,
    ai_level: Option<f64>,
    synchronization: Option<f64>,
    integration: Option<f64>,
    usability: Option<f64>,
    cost: Option<f64>,
    support: Option<f64>,
    functionality: Option<f64>,
    payment_methods: Option<Vec<u32>>,
}

impl ToolRows {
    fn into_tool(self, name: String) -> CandidateTool {
        let level = |v: Option<f64>| v.map_or(UNSET_LEVEL, |x| x.round() as i32);
        let attr = |v: Option<f64>| v.unwrap_or(0.0);

        let mut tool = CandidateTool::new(name)
            .with_maturity(
                level(self.automation),
                level(self.ai_level),
                level(self.synchronization),
            )
            .with_attributes(
                attr(self.usability),
                attr(self.support),
                attr(self.integration),
                attr(self.cost),
                attr(self.functionality),
            )
            .with_payment_methods(self.payment_methods.unwrap_or_default());
        tool.activities = self.activities;
        tool
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) if f.is_finite() => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// "1, 2" や 3.0 を支払い方法コードの並びに変換
fn cell_codes(cell: &Data) -> Option<Vec<u32>> {
    match cell {
        Data::Float(f) if *f >= 0.0 => Some(vec![f.round() as u32]),
        Data::Int(i) if *i >= 0 => Some(vec![*i as u32]),
        Data::String(s) if !s.trim().is_empty() => Some(
            s.split([',', ';'])
                .filter_map(|part| part.trim().parse::<u32>().ok())
                .collect(),
        ),
        _ => None,
    }
}

/// 空でなければ最初の値を残す
fn keep_first(slot: &mut Option<f64>, value: Option<f64>) {
    if slot.is_none() {
        *slot = value;
    }
}

/// ワークシートの行からカタログを構築
pub fn parse_catalog_rows<'a, I>(rows: I) -> Result<Catalog>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| AdvisorError::InvalidCatalog("ヘッダー行がありません".into()))?;

    let columns: Vec<Option<Column>> = header
        .iter()
        .map(|cell| Column::from_header(&cell_text(cell)))
        .collect();

    for required in [Column::Tool, Column::Activity] {
        if !columns.contains(&Some(required)) {
            return Err(AdvisorError::InvalidCatalog(format!(
                "必須列がありません: {:?}",
                required
            )));
        }
    }

    let mut tools: IndexMap<String, ToolRows> = IndexMap::new();

    for row in rows {
        let mut name = String::new();
        let mut activity = String::new();
        let mut category = String::new();
        let mut parsed = ToolRows::default();

        for (cell, column) in row.iter().zip(columns.iter()) {
            let Some(column) = column else { continue };
            match column {
                Column::Tool => name = cell_text(cell),
                Column::Activity => activity = cell_text(cell),
                Column::Category => category = cell_text(cell),
                Column::Automation => parsed.automation = cell_number(cell),
                Column::AiLevel => parsed.ai_level = cell_number(cell),
                Column::Synchronization => parsed.synchronization = cell_number(cell),
                Column::Integration => parsed.integration = cell_number(cell),
                Column::Usability => parsed.usability = cell_number(cell),
                Column::Cost => parsed.cost = cell_number(cell),
                Column::Support => parsed.support = cell_number(cell),
                Column::Functionality => parsed.functionality = cell_number(cell),
                Column::PaymentMethod => parsed.payment_methods = cell_codes(cell),
            }
        }

        // 空行・ツール名なしはスキップ
        if name.is_empty() {
            continue;
        }

        let entry = tools.entry(name).or_default();
        keep_first(&mut entry.automation, parsed.automation);
        keep_first(&mut entry.ai_level, parsed.ai_level);
        keep_first(&mut entry.synchronization, parsed.synchronization);
        keep_first(&mut entry.integration, parsed.integration);
        keep_first(&mut entry.usability, parsed.usability);
        keep_first(&mut entry.cost, parsed.cost);
        keep_first(&mut entry.support, parsed.support);
        keep_first(&mut entry.functionality, parsed.functionality);
        if entry.payment_methods.is_none() {
            entry.payment_methods = parsed.payment_methods;
        }
        if !activity.is_empty() {
            entry.activities.push(CatalogActivity { activity, category });
        }
    }

    Ok(Catalog::from_tools(
        tools.into_iter().map(|(name, rows)| rows.into_tool(name)),
    ))
}

/// Excelファイルからカタログを読み込み
pub fn read_catalog(path: &Path) -> Result<Catalog> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AdvisorError::ExcelRead(format!("シートがありません: {}", path.display())))??;

    parse_catalog_rows(range.rows())
}
