//! Tests for validation statistics

use super::*;
use crate::app::services::row_processor::ValidationStats;

#[test]
fn test_validation_stats_new() {
    let stats = ValidationStats::new();
    assert_eq!(stats.total_rows, 0);
    assert_eq!(stats.clean_rate(), 100.0);
    assert_eq!(stats.error_rate(), 0.0);
    assert!(stats.is_balanced());
    assert!(stats.most_common_failure().is_none());
}

#[test]
fn test_stats_track_routing() {
    let profile = LocaleProfile::cook_islands();
    let layout = create_layout(COOK_HEADER, &profile);
    let processor = create_processor(profile);
    let mut stats = ValidationStats::new();

    let clean = create_row(&layout, &["P1", "C1", "22123", "a@b.com", "12345", "01/02/1990"]);
    let failed = create_row(&layout, &["P2", "C2", "71234", "a@b", "", "01/02/1990"]);

    stats.record_processed(&processor.process(&clean, 1));
    stats.record_processed(&processor.process(&failed, 2));
    stats.record_skipped();

    assert_eq!(stats.total_rows, 3);
    assert_eq!(stats.clean_rows, 1);
    assert_eq!(stats.error_rows, 1);
    assert_eq!(stats.skipped_rows, 1);
    assert!(stats.is_balanced());

    // account padding on the clean row; landline warning on the clean row
    assert_eq!(stats.corrections, 1);
    assert_eq!(stats.warnings, 1);
    assert_eq!(stats.field_error_counts.get("email_add"), Some(&1));
    assert_eq!(stats.field_error_counts.get("Acc_no"), Some(&1));
}

#[test]
fn test_stats_count_short_circuits() {
    let profile = LocaleProfile::samoa();
    let layout = create_layout(SAMOA_HEADER, &profile);
    let processor = create_processor(profile);
    let mut stats = ValidationStats::new();

    let raw = create_row(&layout, &["P1", "C1", "7123456", "", "01/02/1990"]);
    stats.record_processed(&processor.process(&raw, 1));

    assert_eq!(stats.short_circuited_rows, 1);
    assert_eq!(stats.most_common_failure(), Some(("email_add", 1)));
}

#[test]
fn test_stats_summary() {
    let stats = ValidationStats {
        total_rows: 10,
        clean_rows: 7,
        error_rows: 2,
        skipped_rows: 1,
        corrections: 4,
        warnings: 3,
        ..ValidationStats::default()
    };

    assert_eq!(stats.clean_rate(), 70.0);
    assert_eq!(stats.error_rate(), 20.0);
    assert_eq!(
        stats.summary(),
        "10 rows: 7 clean, 2 error, 1 skipped (70.0% clean), 4 corrections, 3 warnings"
    );
}
