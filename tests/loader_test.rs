//! 入力ファイル読み込みの統合テスト

use rust_xlsxwriter::Workbook;
use tempfile::tempdir;
use toolstack_advisor::error::AdvisorError;
use toolstack_advisor::loader;
use toolstack_common::UNSET_LEVEL;

#[test]
fn test_load_catalog_from_xlsx() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("catalog.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header = ["Tool", "Activity", "Category", "Automation", "AI Level", "Syncronization", "Usability", "Payment Method"];
    for (col, title) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *title).unwrap();
    }
    sheet.write_string(1, 0, "Ledger").unwrap();
    sheet.write_string(1, 1, "Bookkeeping").unwrap();
    sheet.write_string(1, 2, "Finance").unwrap();
    sheet.write_number(1, 3, 2).unwrap();
    sheet.write_number(1, 4, 3).unwrap();
    sheet.write_number(1, 5, 4).unwrap();
    sheet.write_number(1, 6, 4.5).unwrap();
    sheet.write_string(1, 7, "1, 3").unwrap();
    sheet.write_string(2, 0, "Ledger").unwrap();
    sheet.write_string(2, 1, "Invoicing").unwrap();
    sheet.write_string(3, 0, "Notes").unwrap();
    sheet.write_string(3, 1, "Documentation").unwrap();
    workbook.save(&path).expect("Excel保存失敗");

    let catalog = loader::load_catalog(&path).expect("カタログ読み込み失敗");
    assert_eq!(catalog.len(), 2);

    let ledger = catalog.get("Ledger").expect("Ledgerがない");
    assert_eq!(ledger.activities.len(), 2);
    assert!(ledger.supports("invoicing"));
    assert_eq!(ledger.automation, 2);
    assert_eq!(ledger.synchronization, 4);
    assert_eq!(ledger.usability, 4.5);
    assert_eq!(ledger.payment_methods.iter().copied().collect::<Vec<_>>(), vec![1, 3]);

    let notes = catalog.get("Notes").expect("Notesがない");
    assert_eq!(notes.ai_level, UNSET_LEVEL);
    assert!(notes.payment_methods.is_empty());
}

#[test]
fn test_load_catalog_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("catalog.csv");
    std::fs::write(&path, "tool,activity").unwrap();

    let err = loader::load_catalog(&path).unwrap_err();
    assert!(matches!(err, AdvisorError::InvalidCatalog(_)));
}

#[test]
fn test_load_catalog_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    for name in ["missing.json", "missing.xlsx"] {
        let err = loader::load_catalog(&dir.path().join(name)).unwrap_err();
        assert!(matches!(err, AdvisorError::FileNotFound(_)), "{}: {:?}", name, err);
    }
}

#[test]
fn test_load_landscape_empty_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("details.json");
    std::fs::write(&path, "[]").unwrap();

    let err = loader::load_landscape(&path).unwrap_err();
    assert!(matches!(err, AdvisorError::NoActivities(_)));
}

#[test]
fn test_load_landscape_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("details.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = loader::load_landscape(&path).unwrap_err();
    assert!(matches!(err, AdvisorError::InvalidDetails(_)));
}

#[test]
fn test_load_preference_absent() {
    let dir = tempdir().expect("Failed to create temp dir");
    assert!(loader::load_preference(None).unwrap().is_none());
    assert!(loader::load_preference(Some(&dir.path().join("none.json")))
        .unwrap()
        .is_none());
}

#[test]
fn test_load_preference_with_payment_methods() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("preference.json");
    std::fs::write(
        &path,
        r#"{"tool_usability": 4, "methodical_support": 2, "tool_integration": 1, "cost": 5, "payment_method": [2, 3]}"#,
    )
    .unwrap();

    let preference = loader::load_preference(Some(&path))
        .expect("優先度読み込み失敗")
        .expect("優先度がない");
    assert_eq!(preference.usability, 4.0);
    assert_eq!(preference.cost, 5.0);
    assert_eq!(preference.payment_filter().map(|f| f.len()), Some(2));
}
