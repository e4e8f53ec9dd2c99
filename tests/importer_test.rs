// ==========================================
// 导入层集成测试
// ==========================================
// 测试范围:
// 1. CSV 工时日报 → 标准化记录全链路
// 2. 脏数据兜底 (不可解析 → 默认值, 不报错)
// 3. 花名册读取
// 4. 文件数据源 (FileRecordSource) 懒加载与 refresh
// ==========================================

use std::io::Write;

use capacity_dashboard::importer::{RosterReader, RowNormalizer, UniversalFileParser};
use capacity_dashboard::repository::{FileRecordSource, RecordSource};
use chrono::NaiveDate;
use tempfile::NamedTempFile;

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".csv").expect("无法创建临时文件");
    file.write_all(content.as_bytes()).expect("写入失败");
    file.flush().expect("flush 失败");
    file
}

#[test]
fn test_csv导入全链路() {
    let file = write_csv(
        "机台号,车间,日期,准备,试切,装夹,加工,停机,其他停机,修整,实际数量,说明\n\
         48,生产一部,2025-09-03,10,0,2,20,420,0,0,1,设备保养\n\
         50,生产一部,2025-09-03,0,0,0,30,0,0,0,2,\n\
         51,生产二部,04/09/2025,5,,,,660,,,abc,\n",
    );

    let rows = UniversalFileParser.parse(file.path()).expect("解析失败");
    assert_eq!(rows.len(), 3);

    let records = RowNormalizer::new().normalize_rows(&rows);
    assert_eq!(records.len(), 3);

    // 第一行: 完整解析
    assert_eq!(records[0].machine_no, "48");
    assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2025, 9, 3));
    assert_eq!(records[0].stop_min, 420.0);
    assert_eq!(records[0].explanation.as_deref(), Some("设备保养"));

    // 第三行: 日报格式日期 + 脏数量兜底为 1
    assert_eq!(records[2].date, NaiveDate::from_ymd_opt(2025, 9, 4));
    assert_eq!(records[2].actual_quantity, 1.0);
    // 缺失时间列 → 0
    assert_eq!(records[2].processing_min, 0.0);
    assert_eq!(records[2].stop_min, 660.0);
}

#[test]
fn test_小数逗号与空行() {
    let file = write_csv(
        "机台号,装夹,实际数量\n\
         48,\"7,5\",3\n\
         ,,\n\
         50,2,\"1,5\"\n",
    );

    let rows = UniversalFileParser.parse(file.path()).expect("解析失败");
    // 空行跳过
    assert_eq!(rows.len(), 2);

    let records = RowNormalizer::new().normalize_rows(&rows);
    assert_eq!(records[0].setup_min, 7.5);
    assert_eq!(records[1].actual_quantity, 1.5);
}

#[test]
fn test_花名册读取保序() {
    let file = write_csv("机台号\n55\n48\n102\n\n62\n");
    let machines = RosterReader::new().read(file.path()).expect("读取失败");
    // 保留文件顺序, 不排序
    assert_eq!(machines, vec!["55", "48", "102", "62"]);
}

#[test]
fn test_file_record_source_懒加载与refresh() {
    let file = write_csv("机台号,加工\n48,60\n");
    let source = FileRecordSource::new(file.path());

    let snap1 = source.snapshot().expect("快照失败");
    assert_eq!(snap1.records.len(), 1);
    assert_eq!(snap1.records[0].processing_min, 60.0);

    // 未刷新: 令牌不变
    let snap2 = source.snapshot().expect("快照失败");
    assert_eq!(snap1.version_token, snap2.version_token);

    // 刷新: 令牌变化
    source.refresh().expect("刷新失败");
    let snap3 = source.snapshot().expect("快照失败");
    assert_ne!(snap1.version_token, snap3.version_token);
}

#[test]
fn test_file_record_source_文件不存在() {
    let source = FileRecordSource::new("/nonexistent/报表.csv");
    assert!(source.snapshot().is_err());
}
