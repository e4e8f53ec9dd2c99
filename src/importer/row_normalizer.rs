// ==========================================
// 机加工产能看板系统 - 行标准化器
// ==========================================
// 职责: 原始字符串行 → 类型化工时记录
// 口径: 时间字段不可解析取 0, 实际数量不可解析取 1,
//       日期不可解析取 None; 小数逗号视为小数点
// ==========================================

use crate::domain::UtilizationRecord;
use crate::importer::file_parser::RawRow;
use chrono::NaiveDate;

// ==========================================
// 标准列名与别名
// ==========================================
// 工时日报的列名在不同车间的模板里略有出入,
// 按别名表逐一尝试, 第一个非空值生效。
pub mod columns {
    pub const MACHINE_NO: &[&str] = &["机台号", "机号", "设备号"];
    pub const DEPARTMENT: &[&str] = &["车间", "部门"];
    pub const DATE: &[&str] = &["日期", "生产日期"];
    pub const PREP: &[&str] = &["准备", "准备时间"];
    pub const TRIAL_RUN: &[&str] = &["试切", "试运行"];
    pub const SETUP: &[&str] = &["装夹", "装夹时间"];
    pub const PROCESSING: &[&str] = &["加工", "加工时间"];
    pub const STOP: &[&str] = &["停机", "停机时间"];
    pub const STOP_OTHER: &[&str] = &["其他停机", "其它停机"];
    pub const REPAIR: &[&str] = &["修整", "返修"];
    pub const ACTUAL_QUANTITY: &[&str] = &["实际数量", "数量"];
    pub const EXPLANATION: &[&str] = &["说明", "原因", "备注"];
}

// ==========================================
// RowNormalizer - 行标准化器
// ==========================================
pub struct RowNormalizer;

impl RowNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// 标准化一批原始行
    pub fn normalize_rows(&self, rows: &[RawRow]) -> Vec<UtilizationRecord> {
        rows.iter().map(|row| self.normalize(row)).collect()
    }

    /// 标准化单行
    ///
    /// 所有字段都有默认值, 本方法不会失败 (脏数据就地兜底)。
    pub fn normalize(&self, row: &RawRow) -> UtilizationRecord {
        UtilizationRecord {
            machine_no: self.get_string(row, columns::MACHINE_NO).unwrap_or_default(),
            department: self.get_string(row, columns::DEPARTMENT).unwrap_or_default(),
            date: self
                .get_string(row, columns::DATE)
                .and_then(|v| parse_date(&v)),
            prep_min: self.parse_minutes(row, columns::PREP),
            trial_run_min: self.parse_minutes(row, columns::TRIAL_RUN),
            setup_min: self.parse_minutes(row, columns::SETUP),
            processing_min: self.parse_minutes(row, columns::PROCESSING),
            stop_min: self.parse_minutes(row, columns::STOP),
            stop_other_min: self.parse_minutes(row, columns::STOP_OTHER),
            repair_min: self.parse_minutes(row, columns::REPAIR),
            actual_quantity: self.parse_quantity(row, columns::ACTUAL_QUANTITY),
            explanation: self.get_string(row, columns::EXPLANATION),
        }
    }

    /// 按别名表提取字符串字段 (trim 后非空才算命中)
    fn get_string(&self, row: &RawRow, aliases: &[&str]) -> Option<String> {
        for alias in aliases {
            if let Some(v) = row.get(*alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 解析时间字段 (分钟)
    ///
    /// # 口径
    /// - 缺列 / 空值 / 不可解析 → 0
    /// - 小数逗号 ("7,5") 视为小数点
    /// - 负数与非有限值按 0 处理 (时间字段必须非负有限)
    fn parse_minutes(&self, row: &RawRow, aliases: &[&str]) -> f64 {
        match self.get_string(row, aliases) {
            None => 0.0,
            Some(value) => match parse_locale_number(&value) {
                Some(n) if n.is_finite() && n >= 0.0 => n,
                _ => 0.0,
            },
        }
    }

    /// 解析实际数量
    ///
    /// # 口径
    /// - 缺列 / 空值 / 不可解析 → 1 (默认单件)
    /// - 解析成功的值原样保留 (包括 0)
    fn parse_quantity(&self, row: &RawRow, aliases: &[&str]) -> f64 {
        match self.get_string(row, aliases) {
            None => 1.0,
            Some(value) => match parse_locale_number(&value) {
                Some(n) if n.is_finite() => n,
                _ => 1.0,
            },
        }
    }
}

impl Default for RowNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// 解析数值, 容忍小数逗号
fn parse_locale_number(value: &str) -> Option<f64> {
    value.trim().replace(',', ".").parse::<f64>().ok()
}

/// 解析日期, 依次尝试 ISO (2025-09-03) 与日报格式 (03/09/2025)
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn raw_row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn test_normalize_完整行() {
        let row = raw_row(&[
            ("机台号", "48"),
            ("车间", "生产一部"),
            ("日期", "03/09/2025"),
            ("准备", "10"),
            ("试切", "5"),
            ("装夹", "7,5"),
            ("加工", "120"),
            ("停机", "30"),
            ("其他停机", "0"),
            ("修整", "15"),
            ("实际数量", "3"),
            ("说明", "换刀具"),
        ]);

        let record = RowNormalizer::new().normalize(&row);
        assert_eq!(record.machine_no, "48");
        assert_eq!(record.department, "生产一部");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 9, 3));
        // 小数逗号: "7,5" → 7.5
        assert_eq!(record.setup_min, 7.5);
        assert_eq!(record.processing_min, 120.0);
        assert_eq!(record.actual_quantity, 3.0);
        assert_eq!(record.explanation.as_deref(), Some("换刀具"));
    }

    #[test]
    fn test_normalize_脏数据兜底() {
        let row = raw_row(&[
            ("机台号", "62"),
            ("日期", "不是日期"),
            ("加工", "abc"),
            ("停机", "-5"),
            ("实际数量", "??"),
        ]);

        let record = RowNormalizer::new().normalize(&row);
        // 不可解析的时间 → 0
        assert_eq!(record.processing_min, 0.0);
        // 负的时间 → 0
        assert_eq!(record.stop_min, 0.0);
        // 不可解析的数量 → 1
        assert_eq!(record.actual_quantity, 1.0);
        // 不可解析的日期 → None
        assert!(record.date.is_none());
        // 缺列 → 0
        assert_eq!(record.prep_min, 0.0);
    }

    #[test]
    fn test_normalize_别名列() {
        let row = raw_row(&[("机号", "50"), ("部门", "生产二部"), ("数量", "2")]);
        let record = RowNormalizer::new().normalize(&row);
        assert_eq!(record.machine_no, "50");
        assert_eq!(record.department, "生产二部");
        assert_eq!(record.actual_quantity, 2.0);
    }

    #[test]
    fn test_parse_date_两种格式() {
        assert_eq!(parse_date("2025-09-03"), NaiveDate::from_ymd_opt(2025, 9, 3));
        assert_eq!(parse_date("03/09/2025"), NaiveDate::from_ymd_opt(2025, 9, 3));
        assert_eq!(parse_date("09/03/2025"), NaiveDate::from_ymd_opt(2025, 3, 9));
        assert!(parse_date("2025/09/03").is_none());
    }

    #[test]
    fn test_数量为零保留原值() {
        let row = raw_row(&[("机台号", "48"), ("实际数量", "0")]);
        let record = RowNormalizer::new().normalize(&row);
        assert_eq!(record.actual_quantity, 0.0);
    }
}
