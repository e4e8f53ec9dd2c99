// ==========================================
// ReportComposer 集成测试
// ==========================================
// 测试范围:
// 1. 车间 × 机型切片结构
// 2. 跨车间对比 (加工时间占比 + 开机数)
// 3. 空车间 / 无数据切片的 None 表达
// ==========================================

mod helpers;

use capacity_dashboard::config::DashboardConfig;
use capacity_dashboard::domain::{MachineTypeFilter, UtilizationRecord};
use capacity_dashboard::engine::ReportComposer;
use helpers::test_data_builder::RecordBuilder;

const ALL_FILTERS: [MachineTypeFilter; 3] = [
    MachineTypeFilter::Lathe,
    MachineTypeFilter::Milling,
    MachineTypeFilter::All,
];

fn composer() -> ReportComposer {
    ReportComposer::new(DashboardConfig::default())
}

fn departments() -> Vec<String> {
    vec!["生产一部".to_string(), "生产二部".to_string()]
}

fn sample_records() -> Vec<UtilizationRecord> {
    vec![
        // 生产一部: 车床 48 + 铣床 62
        RecordBuilder::new("48")
            .department("生产一部")
            .processing(100.0)
            .quantity(2.0)
            .build(),
        RecordBuilder::new("62")
            .department("生产一部")
            .processing(50.0)
            .build(),
        // 生产二部: 仅车床 55
        RecordBuilder::new("55")
            .department("生产二部")
            .processing(30.0)
            .stop(40.0)
            .build(),
    ]
}

#[test]
fn test_compose_车间与切片结构() {
    let report = composer().compose(&sample_records(), &[], &departments(), &ALL_FILTERS);

    assert_eq!(report.departments.len(), 2);
    let d1 = &report.departments[0];
    assert_eq!(d1.department, "生产一部");
    assert_eq!(d1.slices.len(), 3);

    // 合计切片不统计开机数
    let all_slice = d1
        .slices
        .iter()
        .find(|s| s.filter == MachineTypeFilter::All)
        .unwrap();
    assert!(all_slice.active_count.is_none());
    assert!(all_slice.breakdown.is_some());

    let lathe_slice = d1
        .slices
        .iter()
        .find(|s| s.filter == MachineTypeFilter::Lathe)
        .unwrap();
    assert_eq!(lathe_slice.active_count, Some(1));
}

#[test]
fn test_compose_无数据切片为None() {
    let report = composer().compose(&sample_records(), &[], &departments(), &ALL_FILTERS);

    // 生产二部没有铣床数据
    let d2 = &report.departments[1];
    assert!(d2.breakdown(MachineTypeFilter::Milling).is_none());
    assert!(d2.breakdown(MachineTypeFilter::Lathe).is_some());
}

#[test]
fn test_compose_跨车间对比占比() {
    let report = composer().compose(&sample_records(), &[], &departments(), &ALL_FILTERS);

    // 对比单元: 一部车床 200, 一部铣床 50, 二部车床 30 (无数据单元不输出)
    assert_eq!(report.comparison.len(), 3);
    let total: f64 = report
        .comparison
        .iter()
        .map(|c| c.processing_weighted_min)
        .sum();
    assert_eq!(total, 280.0);

    let share_sum: f64 = report
        .comparison
        .iter()
        .map(|c| c.processing_share_pct)
        .sum();
    assert!((share_sum - 100.0).abs() < 1e-9, "对比占比之和应为 100");

    let d1_lathe = report
        .comparison
        .iter()
        .find(|c| c.department == "生产一部" && c.filter == MachineTypeFilter::Lathe)
        .unwrap();
    assert!((d1_lathe.processing_share_pct - 200.0 / 280.0 * 100.0).abs() < 1e-9);
    assert_eq!(d1_lathe.active_count, 1);
}

#[test]
fn test_compose_空记录集() {
    let report = composer().compose(&[], &[], &departments(), &ALL_FILTERS);

    assert_eq!(report.departments.len(), 2);
    assert!(report.comparison.is_empty());
    for dept in &report.departments {
        for slice in &dept.slices {
            assert!(slice.breakdown.is_none());
        }
        assert!(dept.machine_stats.is_empty());
    }
}

#[test]
fn test_compose_花名册只作用于本车间切片() {
    let roster = vec!["48".to_string(), "55".to_string(), "99".to_string()];
    let report = composer().compose(&sample_records(), &roster, &departments(), &ALL_FILTERS);

    // 生产一部数据里只有 48/62: 花名册的 55 和 99 都算无数据
    let d1 = &report.departments[0];
    let idle_names: Vec<&str> = d1
        .idle_machines
        .iter()
        .map(|m| m.machine_no.as_str())
        .collect();
    assert_eq!(idle_names, vec!["55", "99"]);
}
