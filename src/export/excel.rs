//! Excelレポート生成（rust_xlsxwriter）
//!
//! 1シートに「戦略 / 推薦スコア / 支払い条件 / ツール / スコア / 活動」を1ツール1行で出力する。

use super::text::{describe_activity, format_score};
use crate::error::Result;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;
use toolstack_common::{OrganizationLandscape, StrategyOutcome};

const HEADERS: [&str; 6] = [
    "Approach",
    "Recommendation Score",
    "Payment Method",
    "Tool",
    "Tool Score",
    "Activities (Need For Change)",
];

const COLUMN_WIDTHS: [f64; 6] = [36.0, 22.0, 18.0, 28.0, 12.0, 60.0];

pub fn generate_excel(
    outcomes: &[StrategyOutcome],
    landscape: &OrganizationLandscape,
    output_path: &Path,
    title: &str,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Recommendation")?;

    let title_format = Format::new().set_bold().set_font_size(14);
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF0F0F0))
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
        .set_align(FormatAlign::Top);
    let score_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_num_format("0.0000")
        .set_align(FormatAlign::Top);

    worksheet.write_string_with_format(0, 0, title, &title_format)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(2, col as u16, *header, &header_format)?;
        worksheet.set_column_width(col as u16, COLUMN_WIDTHS[col])?;
    }

    let mut row: u32 = 3;
    for outcome in outcomes {
        let score = format_score(outcome.aggregate_score);
        let payment = if outcome.payment_unconstrained {
            "not considered"
        } else {
            "considered"
        };

        if outcome.result.is_empty() {
            worksheet.write_string_with_format(row, 0, outcome.title, &cell_format)?;
            worksheet.write_string_with_format(row, 1, &score, &cell_format)?;
            worksheet.write_string_with_format(row, 2, payment, &cell_format)?;
            worksheet.write_string_with_format(row, 3, "-", &cell_format)?;
            worksheet.write_string_with_format(row, 4, "-", &cell_format)?;
            worksheet.write_string_with_format(
                row,
                5,
                "No recommendation returned for this approach.",
                &cell_format,
            )?;
            row += 1;
            continue;
        }

        for entry in &outcome.result.entries {
            let activities: Vec<String> = entry
                .activities
                .iter()
                .map(|a| describe_activity(landscape, a))
                .collect();

            worksheet.write_string_with_format(row, 0, outcome.title, &cell_format)?;
            worksheet.write_string_with_format(row, 1, &score, &cell_format)?;
            worksheet.write_string_with_format(row, 2, payment, &cell_format)?;
            worksheet.write_string_with_format(row, 3, &entry.tool_name, &cell_format)?;
            worksheet.write_number_with_format(row, 4, entry.score, &score_format)?;
            worksheet.write_string_with_format(row, 5, activities.join("\n"), &cell_format)?;
            row += 1;
        }
    }

    workbook.save(output_path)?;
    Ok(())
}
