//! テキストレポート（標準出力用）

use toolstack_common::{OrdinalLabel, OrganizationLandscape, StrategyOutcome, UNSET_LEVEL};

/// 1行追加
fn push_line(out: &mut String, line: impl AsRef<str>) {
    out.push_str(line.as_ref());
    out.push('\n');
}

/// 先頭1文字を大文字に
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 推薦スコアの表示（結果なしは N/A）
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.2}%", score * 100.0),
        None => "N/A".into(),
    }
}

fn format_level(level: i32) -> String {
    if level <= UNSET_LEVEL {
        "N/A".into()
    } else {
        level.to_string()
    }
}

/// 活動名と最も強い変更必要度
pub fn describe_activity(landscape: &OrganizationLandscape, activity: &str) -> String {
    let nfc = landscape
        .max_need_for_change(activity)
        .map(|n| n.label())
        .unwrap_or("");
    format!("{} ({})", capitalize(activity), nfc)
}

pub fn render_report(
    outcomes: &[StrategyOutcome],
    landscape: &OrganizationLandscape,
    title: &str,
) -> String {
    let mut out = String::new();
    push_line(&mut out, title);
    push_line(&mut out, "=".repeat(title.chars().count().max(1)));

    for outcome in outcomes {
        push_line(&mut out, "");
        push_line(
            &mut out,
            format!(
                "{} - Recommendation Score: {}",
                outcome.title,
                format_score(outcome.aggregate_score)
            ),
        );
        if outcome.payment_unconstrained {
            push_line(
                &mut out,
                "⚠ Couldn't find a recommendation that fits your payment method preferences. \
                 Showing best possible match without considering payment method.",
            );
        }
        if outcome.result.is_empty() {
            push_line(&mut out, "  No recommendation returned for this approach.");
            continue;
        }

        for entry in &outcome.result.entries {
            push_line(&mut out, format!("  ■ {} (score {:.4})", entry.tool_name, entry.score));
            push_line(
                &mut out,
                format!(
                    "    Automation: {}  AI Level: {}  Syncronization: {}",
                    format_level(entry.automation),
                    format_level(entry.ai_level),
                    format_level(entry.synchronization)
                ),
            );
            push_line(
                &mut out,
                format!(
                    "    digitalization {:.3} / capability {:.3} / preference {:.3}",
                    entry.scores.digitalization, entry.scores.capability, entry.scores.preference
                ),
            );
            for activity in &entry.activities {
                push_line(&mut out, format!("    - {}", describe_activity(landscape, activity)));
            }
        }

        if !outcome.coverage.complete {
            let uncovered: Vec<String> = outcome
                .coverage
                .uncovered
                .iter()
                .map(|a| capitalize(a))
                .collect();
            push_line(&mut out, format!("  未充足の活動: {}", uncovered.join(", ")));
        }
    }

    out
}

/// 要求活動と現行ツールの優先度一覧
pub fn render_inspection(landscape: &OrganizationLandscape) -> String {
    let mut out = String::new();

    push_line(&mut out, "Required activities");
    push_line(
        &mut out,
        format!("  {:<32} {:>4} {:>4} {:>4} {:>4}", "Activity", "NFC", "Auto", "AI", "Sync"),
    );
    for activity in landscape.required_activities().iter() {
        push_line(
            &mut out,
            format!(
                "  {:<32} {:>4} {:>4} {:>4} {:>4}",
                activity.name,
                activity.need_for_change,
                activity.automation,
                activity.ai_level,
                activity.synchronization
            ),
        );
    }

    push_line(&mut out, "");
    push_line(&mut out, "Current tools (by replacement priority)");
    let mut tools: Vec<_> = landscape.tools().collect();
    tools.sort_by(|a, b| b.priority().total_cmp(&a.priority()));
    for tool in tools {
        let name = if tool.is_manual_task() {
            "Manual Task"
        } else {
            tool.tool_name.as_str()
        };
        push_line(
            &mut out,
            format!(
                "  {:<32} priority {:.2} ({} activities)",
                name,
                tool.priority(),
                tool.activities.len()
            ),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolstack_common::{
        recommend_all, ActivityRecord, CandidateTool, Catalog, NeedForChange, UserPreference,
    };

    fn landscape() -> OrganizationLandscape {
        OrganizationLandscape::from_records(vec![
            ActivityRecord::manual("data entry").with_need_for_change(NeedForChange::MustChange),
            ActivityRecord::new("reporting", "Sheets").with_need_for_change(NeedForChange::NoNeed),
        ])
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("data entry"), "Data entry");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some(0.1234)), "12.34%");
        assert_eq!(format_score(None), "N/A");
    }

    #[test]
    fn test_describe_activity_uses_worst_nfc() {
        assert_eq!(describe_activity(&landscape(), "data entry"), "Data entry (Must change)");
    }

    #[test]
    fn test_render_report() {
        let catalog = Catalog::from_tools([CandidateTool::new("ToolA")
            .with_activities(["data entry"])
            .with_maturity(3, 5, 4)
            .with_attributes(5.0, 5.0, 5.0, 5.0, 5.0)]);
        let pref = UserPreference::new(1.0, 1.0, 1.0, 1.0);
        let outcomes = recommend_all(&landscape(), &catalog, Some(&pref));

        let report = render_report(&outcomes, &landscape(), "Report");
        assert!(report.contains("Total Score Prioritization Approach - Recommendation Score:"));
        assert!(report.contains("■ ToolA"));
        assert!(report.contains("- Data entry (Must change)"));
        assert!(report.contains("未充足の活動: Reporting"));
    }

    #[test]
    fn test_render_report_empty_result() {
        let outcomes = recommend_all(&landscape(), &Catalog::new(), None);
        let report = render_report(&outcomes, &landscape(), "Report");
        assert!(report.contains("Forced Exchange Approach - Recommendation Score: N/A"));
        assert!(report.contains("No recommendation returned"));
    }

    #[test]
    fn test_render_report_line_layout() {
        let outcomes = recommend_all(&landscape(), &Catalog::new(), None);
        let report = render_report(&outcomes, &landscape(), "Report");
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Report");
        assert_eq!(lines[1], "======");
        assert_eq!(lines[2], "");
        assert!(report.ends_with("approach.\n"));
    }

    #[test]
    fn test_render_inspection() {
        let rendered = render_inspection(&landscape());
        assert!(rendered.contains("data entry"));
        assert!(rendered.contains("Manual Task"));
        assert!(rendered.contains("priority 3.00"));
    }
}
