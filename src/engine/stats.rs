// ==========================================
// 机加工产能看板系统 - 单机台明细统计引擎
// ==========================================
// 职责: 车间切片内逐机台的时间统计与阈值筛选
// 口径: 与聚合引擎同一套加权/哨兵规则
// 用途: 明细页签 (停机 > 10% / 装夹 > 10% / 准备 > 10%)
// ==========================================

use crate::config::DashboardConfig;
use crate::domain::{machine_sort_key, MachineStat, UtilizationRecord};
use std::collections::HashMap;

// ==========================================
// MachineStatsEngine - 明细统计引擎
// ==========================================
pub struct MachineStatsEngine {
    config: DashboardConfig,
}

/// 按机台累加的中间量
#[derive(Default)]
struct MachineSums {
    prep: f64,
    trial_run: f64,
    setup_weighted: f64,
    processing_weighted: f64,
    stop: f64,
    stop_other: f64,
    repair: f64,
    explanations: Vec<String>,
}

impl MachineStatsEngine {
    /// 构造函数
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    /// 逐机台统计
    ///
    /// # 参数
    /// - `records`: 某车间在查询周期内的全部工时记录
    ///
    /// # 返回
    /// 合计 > 0 的机台统计, 按机台号数值排序 (非数字机台号排最后)
    pub fn machine_stats(&self, records: &[UtilizationRecord]) -> Vec<MachineStat> {
        let mut sums: HashMap<&str, MachineSums> = HashMap::new();

        for record in records {
            let entry = sums.entry(record.machine_no.as_str()).or_default();
            entry.prep += record.prep_min;
            entry.trial_run += record.trial_run_min;
            entry.setup_weighted += record.setup_weighted_min();
            entry.processing_weighted += record.processing_weighted_min();
            entry.repair += record.repair_min;
            if !self.config.is_shift_sentinel(record.stop_min) {
                entry.stop += record.stop_min;
            }
            if !self.config.is_shift_sentinel(record.stop_other_min) {
                entry.stop_other += record.stop_other_min;
            }
            if let Some(text) = record.explanation.as_deref() {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    entry.explanations.push(trimmed.to_string());
                }
            }
        }

        let mut stats: Vec<MachineStat> = sums
            .into_iter()
            .filter_map(|(machine_no, s)| {
                let total = s.prep
                    + s.trial_run
                    + s.setup_weighted
                    + s.processing_weighted
                    + s.stop
                    + s.stop_other
                    + s.repair;
                if total <= 0.0 {
                    return None;
                }
                Some(MachineStat {
                    machine_no: machine_no.to_string(),
                    total_min: total,
                    stop_min: s.stop,
                    stop_other_min: s.stop_other,
                    setup_weighted_min: s.setup_weighted,
                    prep_min: s.prep,
                    pct_stop: s.stop / total * 100.0,
                    pct_stop_other: s.stop_other / total * 100.0,
                    pct_setup: s.setup_weighted / total * 100.0,
                    pct_prep: s.prep / total * 100.0,
                    pct_total_stop: (s.stop + s.stop_other) / total * 100.0,
                    explanation: s.explanations.join(", "),
                })
            })
            .collect();

        stats.sort_by_key(|s| machine_sort_key(&s.machine_no));
        stats
    }

    /// 合并停机占比超阈值的机台
    pub fn stats_over_stop_threshold(&self, stats: &[MachineStat]) -> Vec<MachineStat> {
        self.filter_over_threshold(stats, |s| s.pct_total_stop)
    }

    /// 装夹占比超阈值的机台
    pub fn stats_over_setup_threshold(&self, stats: &[MachineStat]) -> Vec<MachineStat> {
        self.filter_over_threshold(stats, |s| s.pct_setup)
    }

    /// 准备占比超阈值的机台
    pub fn stats_over_prep_threshold(&self, stats: &[MachineStat]) -> Vec<MachineStat> {
        self.filter_over_threshold(stats, |s| s.pct_prep)
    }

    fn filter_over_threshold(
        &self,
        stats: &[MachineStat],
        pct: impl Fn(&MachineStat) -> f64,
    ) -> Vec<MachineStat> {
        stats
            .iter()
            .filter(|s| pct(s) > self.config.detail_threshold_pct)
            .cloned()
            .collect()
    }
}
