// ==========================================
// 机加工产能看板系统 - 工时记录领域模型
// ==========================================
// 职责: 单条 "班次 × 机台 × 日期" 工时记录
// 口径: 七个时间分量均为分钟, 经标准化后保证非负有限
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// UtilizationRecord - 工时记录
// ==========================================
// 来源: 车间日报表 (CSV/Excel), 经 RowNormalizer 标准化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationRecord {
    // ===== 标识 =====
    pub machine_no: String,        // 机台号 (通常为数字字符串, 允许非数字)
    pub department: String,        // 车间
    pub date: Option<NaiveDate>,   // 日期 (解析失败为 None)

    // ===== 时间分量 (分钟) =====
    pub prep_min: f64,             // 准备时间
    pub trial_run_min: f64,        // 试切时间
    pub setup_min: f64,            // 装夹时间 (单件, 汇总时乘实际数量)
    pub processing_min: f64,       // 加工时间 (单件, 汇总时乘实际数量)
    pub stop_min: f64,             // 停机时间
    pub stop_other_min: f64,       // 其他停机时间
    pub repair_min: f64,           // 修整时间

    // ===== 产量与说明 =====
    pub actual_quantity: f64,      // 实际数量 (缺失/不可解析时为 1)
    pub explanation: Option<String>, // 说明 (停机原因等自由文本)
}

impl UtilizationRecord {
    /// 装夹加权时间: 装夹 × 实际数量
    pub fn setup_weighted_min(&self) -> f64 {
        self.setup_min * self.actual_quantity
    }

    /// 加工加权时间: 加工 × 实际数量
    pub fn processing_weighted_min(&self) -> f64 {
        self.processing_min * self.actual_quantity
    }

    /// 不加权的生产时间合计 (准备 + 试切 + 装夹 + 加工)
    ///
    /// 整班停机判定 (MachineActivityCounter) 使用此口径,
    /// 与聚合器的加权口径刻意不同, 不得混用。
    pub fn production_sum_unweighted(&self) -> f64 {
        self.prep_min + self.trial_run_min + self.setup_min + self.processing_min
    }
}
