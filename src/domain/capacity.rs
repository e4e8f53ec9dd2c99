// ==========================================
// 机加工产能看板系统 - 产能分解领域模型
// ==========================================
// 职责: 一个切片 (车间 × 机型) 上的时间分量汇总与占比
// 口径: 复刻车间工时日报的手工核算公式
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CapacityBreakdown - 产能分解
// ==========================================
// 生命周期: 每次查询新建, 创建后不再修改
// total_min == 0 的切片不生成分解 (返回 None, 表示无数据)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityBreakdown {
    // ===== 时间合计 (分钟) =====
    pub prep_min: f64,                 // 准备 (直接求和)
    pub trial_run_min: f64,            // 试切 (直接求和)
    pub setup_weighted_min: f64,       // 装夹 (乘实际数量后求和)
    pub processing_weighted_min: f64,  // 加工 (乘实际数量后求和)
    pub stop_min: f64,                 // 停机 (剔除整班哨兵值后求和)
    pub stop_other_min: f64,           // 其他停机 (剔除整班哨兵值后求和)
    pub repair_min: f64,               // 修整 (直接求和)
    pub total_min: f64,                // 七个分量之和 (> 0)

    // ===== 占比 (%) =====
    pub pct_prep: f64,
    pub pct_trial_run: f64,
    pub pct_setup: f64,
    pub pct_processing: f64,
    pub pct_stop: f64,
    pub pct_stop_other: f64,
    pub pct_repair: f64,
}

impl CapacityBreakdown {
    /// 由七个分量合计构造产能分解
    ///
    /// # 返回
    /// - `Some(CapacityBreakdown)`: 合计 > 0, 占比 = 分量 / 合计 × 100 (不做舍入)
    /// - `None`: 合计为 0, 该切片无数据
    #[allow(clippy::too_many_arguments)]
    pub fn from_sums(
        prep_min: f64,
        trial_run_min: f64,
        setup_weighted_min: f64,
        processing_weighted_min: f64,
        stop_min: f64,
        stop_other_min: f64,
        repair_min: f64,
    ) -> Option<Self> {
        let total_min = prep_min
            + trial_run_min
            + setup_weighted_min
            + processing_weighted_min
            + stop_min
            + stop_other_min
            + repair_min;

        if total_min == 0.0 {
            return None;
        }

        Some(Self {
            prep_min,
            trial_run_min,
            setup_weighted_min,
            processing_weighted_min,
            stop_min,
            stop_other_min,
            repair_min,
            total_min,
            pct_prep: prep_min / total_min * 100.0,
            pct_trial_run: trial_run_min / total_min * 100.0,
            pct_setup: setup_weighted_min / total_min * 100.0,
            pct_processing: processing_weighted_min / total_min * 100.0,
            pct_stop: stop_min / total_min * 100.0,
            pct_stop_other: stop_other_min / total_min * 100.0,
            pct_repair: repair_min / total_min * 100.0,
        })
    }
}

// ==========================================
// MachineStat - 单机台明细统计
// ==========================================
// 用途: 明细页签的阈值筛选 (停机 > 10% / 装夹 > 10% / 准备 > 10%)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineStat {
    pub machine_no: String,       // 机台号
    pub total_min: f64,           // 七分量合计 (> 0, 为 0 的机台不生成统计)
    pub stop_min: f64,            // 停机合计 (剔除哨兵值)
    pub stop_other_min: f64,      // 其他停机合计 (剔除哨兵值)
    pub setup_weighted_min: f64,  // 装夹加权合计
    pub prep_min: f64,            // 准备合计
    pub pct_stop: f64,            // 停机占比
    pub pct_stop_other: f64,      // 其他停机占比
    pub pct_setup: f64,           // 装夹占比
    pub pct_prep: f64,            // 准备占比
    pub pct_total_stop: f64,      // 合并停机占比 (停机 + 其他停机)
    pub explanation: String,      // 说明文本拼接 (逗号分隔, 空说明跳过)
}
