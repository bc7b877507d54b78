// ==========================================
// BatchSummaryEngine 集成测试
// ==========================================
// 职责: 验证过滤 + 累计 + 归一化的整体行为
// ==========================================

mod helpers;

use batch_summary::domain::batch::{BatchItem, BatchSnapshot, PresetTotals};
use batch_summary::domain::filter::{FilterConfiguration, SelectionDescriptor};
use batch_summary::domain::settings::{CasePackFlags, GlobalSettings, CM, KG};
use batch_summary::domain::summary::BatchSummary;
use batch_summary::domain::types::FeedState;
use batch_summary::engine::{BatchSummaryEngine, ExclusionReason, StoredCasePacked};
use helpers::test_data_builder::{plain_item, BatchItemBuilder};
use std::cell::Cell;

// ==========================================
// 测试辅助函数
// ==========================================

fn summarize(batch: &BatchSnapshot, filter: &FilterConfiguration) -> BatchSummary {
    summarize_with_settings(batch, filter, &GlobalSettings::default())
}

fn summarize_with_settings(
    batch: &BatchSnapshot,
    filter: &FilterConfiguration,
    settings: &GlobalSettings,
) -> BatchSummary {
    BatchSummaryEngine::new().summarize(batch, filter, settings, &StoredCasePacked)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// 两条计入条目 + 一条已删除条目
fn scenario_items() -> Vec<BatchItem> {
    vec![
        BatchItemBuilder::new("a")
            .quantity(1)
            .ordered(1)
            .buylist(10.0, 1)
            .payout(100.0)
            .rank(20.0)
            .build(),
        BatchItemBuilder::new("b")
            .quantity(1)
            .ordered(1)
            .buylist(10.0, 1)
            .payout(100.0)
            .rank(40.0)
            .build(),
        BatchItemBuilder::new("c")
            .quantity(9)
            .ordered(9)
            .buylist(99.0, 9)
            .payout(999.0)
            .rank(1.0)
            .deleted()
            .build(),
    ]
}

// ==========================================
// 未加载批次
// ==========================================

#[test]
fn test_unloaded_batch_passes_preset_through() {
    let preset = PresetTotals {
        total_count: Some(7),
        total_quantity: Some(12),
        total_ordered: Some(15),
        total_cost: Some(80.5),
        total_payout: Some(300.0),
        total_volume: Some(42.0),
        total_weight: Some(3.5),
        avg_rank: Some(1234.0),
    };
    let mut batch = BatchSnapshot::pending(preset);
    // 未加载时条目被忽略
    batch.items = scenario_items();

    let filter = FilterConfiguration {
        filter_items_with_errors: true,
        ..Default::default()
    };
    let summary = summarize(&batch, &filter);

    assert_eq!(summary.total_count, 7);
    assert_eq!(summary.total_quantity, 12);
    assert_eq!(summary.total_ordered, 15);
    assert_eq!(summary.total_cost, 80.5);
    assert_eq!(summary.total_payout, 300.0);
    assert_eq!(summary.total_volume, 42.0);
    assert_eq!(summary.total_weight, 3.5);
    assert_eq!(summary.avg_rank, Some(1234.0));
    assert_eq!(summary.total_rank, 0.0);
}

#[test]
fn test_unloaded_batch_without_preset_is_zero() {
    let summary = summarize(
        &BatchSnapshot::pending(PresetTotals::default()),
        &FilterConfiguration::default(),
    );
    assert_eq!(summary, BatchSummary::default());
    assert!(summary.avg_rank.is_none());
}

// ==========================================
// 累计与归一化
// ==========================================

#[test]
fn test_scenario_totals() {
    batch_summary::logging::init_test();
    let batch = BatchSnapshot::loaded(scenario_items());
    let summary = summarize(&batch, &FilterConfiguration::default());

    assert_eq!(summary.total_count, 2);
    assert_eq!(summary.total_quantity, 2);
    assert_eq!(summary.total_ordered, 2);
    assert_eq!(summary.total_cost, 20.0);
    assert_eq!(summary.total_payout, 180.0);
    assert_eq!(summary.total_rank, 60.0);
    assert_eq!(summary.avg_rank, Some(30.0));
}

#[test]
fn test_empty_loaded_batch() {
    let summary = summarize(&BatchSnapshot::loaded(vec![]), &FilterConfiguration::default());
    assert_eq!(summary, BatchSummary::default());
}

#[test]
fn test_avg_rank_is_floored_weighted_mean() {
    let batch = BatchSnapshot::loaded(vec![
        BatchItemBuilder::new("a").quantity(2).ordered(2).rank(10.0).build(),
        BatchItemBuilder::new("b").quantity(1).ordered(1).rank(15.0).build(),
    ]);
    let summary = summarize(&batch, &FilterConfiguration::default());

    // (10*2 + 15*1) / 3 = 11.67 -> 11
    assert_eq!(summary.total_rank, 35.0);
    assert_eq!(summary.avg_rank, Some(11.0));
}

#[test]
fn test_zero_quantity_items_leave_avg_rank_unset() {
    let batch = BatchSnapshot::loaded(vec![
        BatchItemBuilder::new("a").ordered(3).rank(500.0).payout(10.0).build(),
    ]);
    let summary = summarize(&batch, &FilterConfiguration::default());

    assert_eq!(summary.total_count, 1);
    assert_eq!(summary.total_quantity, 0);
    assert_eq!(summary.total_ordered, 3);
    assert!(summary.avg_rank.is_none());
    assert_eq!(summary.total_payout, 10.0);
}

#[test]
fn test_net_payout_identity() {
    let batch = BatchSnapshot::loaded(vec![
        BatchItemBuilder::new("a")
            .quantity(3)
            .ordered(3)
            .buylist(2.5, 2)
            .buylist(4.0, 1)
            .payout(17.0)
            .build(),
        BatchItemBuilder::new("b").quantity(1).ordered(1).payout(8.0).build(),
    ]);
    let summary = summarize(&batch, &FilterConfiguration::default());

    assert_close(summary.total_cost, 9.0);
    assert_close(summary.total_payout + summary.total_cost, 25.0);
}

#[test]
fn test_volume_only_counts_items_with_plans() {
    let without_plan = BatchItemBuilder::new("a")
        .quantity(5)
        .ordered(5)
        .dimensions(100.0, 100.0, 100.0, 100.0)
        .build();
    let batch = BatchSnapshot::loaded(vec![without_plan.clone()]);
    let summary = summarize(&batch, &FilterConfiguration::default());

    assert_eq!(summary.total_volume, 0.0);
    assert_eq!(summary.total_weight, 5.0);

    let with_plan = BatchItemBuilder::new("b")
        .quantity(5)
        .ordered(5)
        .dimensions(100.0, 100.0, 100.0, 100.0)
        .plan("S1", "FTW3", "NONE")
        .build();
    let batch = BatchSnapshot::loaded(vec![without_plan, with_plan]);
    let summary = summarize(&batch, &FilterConfiguration::default());

    assert_eq!(summary.total_volume, 5.0);
    assert_eq!(summary.total_weight, 10.0);
}

#[test]
fn test_metric_conversion() {
    let batch = BatchSnapshot::loaded(vec![BatchItemBuilder::new("a")
        .quantity(2)
        .ordered(2)
        .dimensions(1000.0, 500.0, 200.0, 150.0)
        .plan("S1", "FTW3", "NONE")
        .build()]);
    let settings = GlobalSettings {
        metric: true,
        ..Default::default()
    };
    let summary = summarize_with_settings(&batch, &FilterConfiguration::default(), &settings);

    assert_close(summary.total_volume, (10.0 * CM) * (5.0 * CM) * (2.0 * CM) * 2.0);
    assert_close(summary.total_weight, 1.5 * KG * 2.0);
}

#[test]
fn test_overridden_unit_table() {
    let batch = BatchSnapshot::loaded(vec![BatchItemBuilder::new("a")
        .quantity(1)
        .ordered(1)
        .dimensions(100.0, 100.0, 100.0, 100.0)
        .plan("S1", "FTW3", "NONE")
        .build()]);
    let mut settings = GlobalSettings {
        metric: true,
        ..Default::default()
    };
    settings.units.length_multiplier = 2.0;
    settings.units.mass_multiplier = 3.0;

    let summary = summarize_with_settings(&batch, &FilterConfiguration::default(), &settings);
    assert_eq!(summary.total_volume, 8.0);
    assert_eq!(summary.total_weight, 3.0);
}

// ==========================================
// 纯函数性质
// ==========================================

#[test]
fn test_summarize_is_idempotent() {
    let batch = BatchSnapshot::loaded(scenario_items());
    let filter = FilterConfiguration {
        filter_items_to_receive: true,
        ..Default::default()
    };
    let before = batch.clone();

    let first = summarize(&batch, &filter);
    let second = summarize(&batch, &filter);

    assert_eq!(first, second);
    assert_eq!(batch, before);
}

#[test]
fn test_enabling_flags_never_increases_count() {
    let batch = BatchSnapshot::loaded(vec![
        BatchItemBuilder::new("a").quantity(1).ordered(3).build(),
        BatchItemBuilder::new("b").quantity(3).ordered(3).build(),
        BatchItemBuilder::new("c").quantity(0).ordered(2).shipment("S1").build(),
        BatchItemBuilder::new("d")
            .quantity(0)
            .ordered(2)
            .dimensions_feed(FeedState::Present)
            .error("stale")
            .build(),
    ]);

    let mut filter = FilterConfiguration::default();
    let mut previous = summarize(&batch, &filter).total_count;
    assert_eq!(previous, 4);

    let steps: [fn(&mut FilterConfiguration); 4] = [
        |f| f.filter_items_to_receive = true,
        |f| f.exclude_items_in_shipments = true,
        |f| f.filter_items_missing_dimensions = true,
        |f| f.filter_items_with_errors = true,
    ];
    for step in steps {
        step(&mut filter);
        let count = summarize(&batch, &filter).total_count;
        assert!(count <= previous);
        previous = count;
    }
    // 仅剩带错误且有尺寸的未收齐条目
    assert_eq!(previous, 1);
}

// ==========================================
// 过滤
// ==========================================

#[test]
fn test_filter_items_to_receive() {
    let batch = BatchSnapshot::loaded(vec![
        plain_item("a", 3, 3),
        BatchItemBuilder::new("b").quantity(2).ordered(3).damaged(1).build(),
        plain_item("c", 1, 3),
    ]);
    let filter = FilterConfiguration {
        filter_items_to_receive: true,
        ..Default::default()
    };

    let summary = summarize(&batch, &filter);
    assert_eq!(summary.total_count, 1);
    assert_eq!(summary.total_quantity, 1);
    assert_eq!(summary.total_ordered, 3);
}

#[test]
fn test_filter_items_with_errors_keeps_only_failing_items() {
    let batch = BatchSnapshot::loaded(vec![
        plain_item("ok", 1, 1),
        BatchItemBuilder::new("feed")
            .quantity(1)
            .ordered(1)
            .product_feed(FeedState::Error)
            .build(),
        BatchItemBuilder::new("plan")
            .quantity(1)
            .ordered(1)
            .plan_error("no inbound eligibility")
            .build(),
        BatchItemBuilder::new("item")
            .quantity(1)
            .ordered(1)
            .error("restricted")
            .build(),
    ]);
    let filter = FilterConfiguration {
        filter_items_with_errors: true,
        ..Default::default()
    };

    assert_eq!(summarize(&batch, &filter).total_count, 3);
}

#[test]
fn test_missing_dimensions_filter() {
    let batch = BatchSnapshot::loaded(vec![
        plain_item("missing", 1, 1),
        BatchItemBuilder::new("error")
            .quantity(1)
            .ordered(1)
            .dimensions_feed(FeedState::Error)
            .build(),
        BatchItemBuilder::new("present")
            .quantity(1)
            .ordered(1)
            .dimensions_feed(FeedState::Present)
            .build(),
    ]);
    let filter = FilterConfiguration {
        filter_items_missing_dimensions: true,
        ..Default::default()
    };

    let included = BatchSummaryEngine::new().included_items(
        &batch,
        &filter,
        &GlobalSettings::default(),
        &StoredCasePacked,
    );
    let ids: Vec<_> = included.iter().filter_map(|item| item.id.as_deref()).collect();
    assert_eq!(ids, vec!["error", "present"]);
}

#[test]
fn test_shipment_filter_matches_all_four_fields() {
    let items = vec![
        BatchItemBuilder::new("match")
            .quantity(2)
            .ordered(2)
            .plan("SHIP1", "FTW3", "SELLER_LABEL")
            .case_packed(false)
            .build(),
        BatchItemBuilder::new("case_packed")
            .quantity(4)
            .ordered(4)
            .plan("SHIP1", "FTW3", "SELLER_LABEL")
            .case_packed(true)
            .build(),
        BatchItemBuilder::new("other_fc")
            .quantity(8)
            .ordered(8)
            .plan("SHIP1", "GYR2", "SELLER_LABEL")
            .build(),
        BatchItemBuilder::new("no_plans").quantity(16).ordered(16).build(),
    ];
    let batch = BatchSnapshot::loaded(items);
    let filter = FilterConfiguration::default().select_shipment(SelectionDescriptor::new(
        "FTW3",
        "SELLER_LABEL",
        "SHIP1",
        false,
    ));

    let summary = summarize(&batch, &filter);
    assert_eq!(summary.total_count, 1);
    assert_eq!(summary.total_quantity, 2);
}

#[test]
fn test_shipment_filter_with_empty_descriptor_list_rejects_all() {
    let batch = BatchSnapshot::loaded(scenario_items());
    let mut filter = FilterConfiguration::default();
    filter.batch_items_filter.insert("SHIP1".to_string(), vec![]);

    assert!(filter.has_shipment_filter());
    assert_eq!(summarize(&batch, &filter).total_count, 0);
}

#[test]
fn test_external_case_pack_predicate() {
    let batch = BatchSnapshot::loaded(vec![
        BatchItemBuilder::new("a")
            .quantity(1)
            .ordered(1)
            .plan("S1", "FTW3", "NONE")
            .plan("S2", "FTW3", "NONE")
            .build(),
        BatchItemBuilder::new("b")
            .quantity(1)
            .ordered(1)
            .plan("S9", "FTW3", "NONE")
            .build(),
    ]);
    let filter = FilterConfiguration::default()
        .select_shipment(SelectionDescriptor::new("FTW3", "NONE", "S1", true))
        .select_shipment(SelectionDescriptor::new("FTW3", "NONE", "S2", true));

    let calls = Cell::new(0);
    let predicate = |_: &BatchItem, flags: CasePackFlags| {
        calls.set(calls.get() + 1);
        flags.fudge_case_packed
    };
    let settings = GlobalSettings {
        fudge_case_packed: true,
        ..Default::default()
    };

    let summary = BatchSummaryEngine::new().summarize(&batch, &filter, &settings, &predicate);
    assert_eq!(summary.total_count, 1);
    // 只有 "a" 的前三字段匹配, 且只计算一次
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_classify_reports_first_rejecting_stage() {
    let engine = BatchSummaryEngine::new();
    let settings = GlobalSettings::default();
    let filter = FilterConfiguration {
        filter_items_with_errors: true,
        filter_items_to_receive: true,
        ..Default::default()
    };

    let clean = plain_item("clean", 0, 1);
    assert_eq!(
        engine.classify(&clean, &filter, &settings, &StoredCasePacked),
        Err(ExclusionReason::NoErrors)
    );

    let received_with_error = BatchItemBuilder::new("r")
        .quantity(1)
        .ordered(1)
        .error("x")
        .build();
    assert_eq!(
        engine.classify(&received_with_error, &filter, &settings, &StoredCasePacked),
        Err(ExclusionReason::FullyReceived)
    );

    let open_with_error = BatchItemBuilder::new("o")
        .quantity(0)
        .ordered(1)
        .error("x")
        .build();
    assert_eq!(
        engine.classify(&open_with_error, &filter, &settings, &StoredCasePacked),
        Ok(())
    );
}

#[test]
fn test_included_items_agree_with_summary() {
    let batch = BatchSnapshot::loaded(scenario_items());
    let filter = FilterConfiguration::default();
    let engine = BatchSummaryEngine::new();

    let included = engine.included_items(&batch, &filter, &GlobalSettings::default(), &StoredCasePacked);
    let summary = summarize(&batch, &filter);
    assert_eq!(included.len() as u64, summary.total_count);

    let pending = BatchSnapshot::pending(PresetTotals::default());
    assert!(engine
        .included_items(&pending, &filter, &GlobalSettings::default(), &StoredCasePacked)
        .is_empty());
}
