// ==========================================
// 机加工产能看板系统 - 机台活动统计引擎
// ==========================================
// 职责: 开机机台计数 + 整班停机机台识别
// 口径:
//   - 开机 = 加权加工时间合计 > 0
//   - 整班停机 = 花名册无数据, 或单条停机 >= 整班阈值
//     且四项生产时间 (不加权) 合计为 0
// 注意: 整班停机用 ">= 420 / 不加权" 的宽松口径,
//       与聚合器的哨兵精确匹配刻意不同, 不得统一
// ==========================================

use crate::config::DashboardConfig;
use crate::domain::{machine_sort_key, IdleReason, MachineTypeFilter, UtilizationRecord};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ==========================================
// IdleMachine - 整班停机机台
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdleMachine {
    pub machine_no: String,
    pub reason: IdleReason,
}

// ==========================================
// MachineActivityCounter - 机台活动统计引擎
// ==========================================
pub struct MachineActivityCounter {
    config: DashboardConfig,
}

impl MachineActivityCounter {
    /// 构造函数
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    /// 统计开机机台数
    ///
    /// # 参数
    /// - `records`: 工时记录 (调用方已按车间/周期切好片)
    /// - `filter`: 机型筛选
    ///
    /// # 返回
    /// 加权加工时间合计 > 0 的去重机台数
    pub fn count_active(&self, records: &[UtilizationRecord], filter: MachineTypeFilter) -> usize {
        let mut processing_by_machine: HashMap<&str, f64> = HashMap::new();

        for record in records {
            if !filter.accepts(self.config.is_lathe(&record.machine_no)) {
                continue;
            }
            *processing_by_machine
                .entry(record.machine_no.as_str())
                .or_insert(0.0) += record.processing_weighted_min();
        }

        processing_by_machine.values().filter(|&&t| t > 0.0).count()
    }

    /// 识别整班停机机台
    ///
    /// # 参数
    /// - `records`: 某车间在查询周期内的全部工时记录
    /// - `roster`: 机台花名册 (空切片表示花名册缺失, 退化为仅条件 b)
    ///
    /// # 判定
    /// - 条件 a: 花名册机台在本期数据中无任何记录 → NoData
    /// - 条件 b: 数据中的机台, 单条停机或其他停机最大值 >= 整班阈值,
    ///   且准备 + 试切 + 装夹 + 加工 (均不加权) 合计为 0 → StoppedAllShift
    ///
    /// # 返回
    /// 按机台号数值排序的整班停机清单
    pub fn find_fully_idle(
        &self,
        records: &[UtilizationRecord],
        roster: &[String],
    ) -> Vec<IdleMachine> {
        // 按机台汇总: 最大单条停机值 + 不加权生产时间合计
        let mut max_stop: HashMap<&str, f64> = HashMap::new();
        let mut production_sum: HashMap<&str, f64> = HashMap::new();

        for record in records {
            let machine = record.machine_no.as_str();
            let stop_peak = record.stop_min.max(record.stop_other_min);
            let entry = max_stop.entry(machine).or_insert(0.0);
            *entry = entry.max(stop_peak);
            *production_sum.entry(machine).or_insert(0.0) += record.production_sum_unweighted();
        }

        let machines_in_data: HashSet<&str> = max_stop.keys().copied().collect();
        let mut idle = Vec::new();

        // 条件 a: 花名册机台无数据
        for machine in roster {
            if !machines_in_data.contains(machine.as_str()) {
                idle.push(IdleMachine {
                    machine_no: machine.clone(),
                    reason: IdleReason::NoData,
                });
            }
        }

        // 条件 b: 整班停机且无任何生产时间
        for machine in &machines_in_data {
            let stopped_all_shift =
                max_stop.get(machine).copied().unwrap_or(0.0) >= self.config.full_shift_threshold_min;
            let no_production = production_sum.get(machine).copied().unwrap_or(0.0) == 0.0;

            if stopped_all_shift && no_production {
                idle.push(IdleMachine {
                    machine_no: machine.to_string(),
                    reason: IdleReason::StoppedAllShift,
                });
            }
        }

        idle.sort_by_key(|m| machine_sort_key(&m.machine_no));
        idle.dedup_by(|a, b| a.machine_no == b.machine_no);
        idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(machine_no: &str, processing: f64, qty: f64, stop: f64) -> UtilizationRecord {
        UtilizationRecord {
            machine_no: machine_no.to_string(),
            department: "生产一部".to_string(),
            date: None,
            prep_min: 0.0,
            trial_run_min: 0.0,
            setup_min: 0.0,
            processing_min: processing,
            stop_min: stop,
            stop_other_min: 0.0,
            repair_min: 0.0,
            actual_quantity: qty,
            explanation: None,
        }
    }

    #[test]
    fn test_count_active_同机台只计一次() {
        let counter = MachineActivityCounter::new(DashboardConfig::default());
        let records = vec![
            record("48", 0.0, 1.0, 0.0),
            record("48", 5.0, 1.0, 0.0),
            record("50", 0.0, 3.0, 0.0),
        ];
        // 48 有两条记录但只计一次; 50 加工为 0 不计
        assert_eq!(counter.count_active(&records, MachineTypeFilter::All), 1);
        assert_eq!(counter.count_active(&records, MachineTypeFilter::Lathe), 1);
        assert_eq!(counter.count_active(&records, MachineTypeFilter::Milling), 0);
    }

    #[test]
    fn test_find_fully_idle_宽松阈值() {
        let counter = MachineActivityCounter::new(DashboardConfig::default());
        // 停机 500 不是哨兵值, 但 >= 420 且无生产时间 → 整班停机
        let records = vec![record("48", 0.0, 1.0, 500.0)];
        let idle = counter.find_fully_idle(&records, &[]);
        assert_eq!(idle.len(), 1);
        assert_eq!(idle[0].machine_no, "48");
        assert_eq!(idle[0].reason, IdleReason::StoppedAllShift);
    }

    #[test]
    fn test_find_fully_idle_有生产时间不算() {
        let counter = MachineActivityCounter::new(DashboardConfig::default());
        let mut r = record("48", 0.0, 1.0, 660.0);
        r.prep_min = 1.0;
        let idle = counter.find_fully_idle(&[r], &[]);
        assert!(idle.is_empty(), "有准备时间的机台不算整班停机");
    }
}
