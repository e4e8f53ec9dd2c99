// ==========================================
// 机加工产能看板系统 - 报表组装引擎
// ==========================================
// 职责: 编排聚合/活动/明细三个引擎, 生成车间级与
//       跨车间对比的结构化报表
// 红线: 纯函数, 不做 IO; 呈现层 (图表/表格) 在库外
// ==========================================

use crate::config::DashboardConfig;
use crate::domain::{CapacityBreakdown, MachineStat, MachineTypeFilter, UtilizationRecord};
use crate::engine::activity::{IdleMachine, MachineActivityCounter};
use crate::engine::aggregator::CapacityAggregator;
use crate::engine::stats::MachineStatsEngine;
use serde::{Deserialize, Serialize};

// ==========================================
// 报表结构
// ==========================================

/// 单个切片 (机型筛选) 的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceReport {
    pub filter: MachineTypeFilter,
    /// 产能分解 (无数据时为 None)
    pub breakdown: Option<CapacityBreakdown>,
    /// 开机机台数 (仅车床/铣床切片统计, 合计切片为 None)
    pub active_count: Option<usize>,
}

/// 单车间报表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentReport {
    pub department: String,
    pub slices: Vec<SliceReport>,
    /// 整班停机机台 (按机台号数值排序)
    pub idle_machines: Vec<IdleMachine>,
    /// 逐机台明细统计
    pub machine_stats: Vec<MachineStat>,
    /// 合并停机占比超阈值的机台
    pub stats_over_stop: Vec<MachineStat>,
    /// 装夹占比超阈值的机台
    pub stats_over_setup: Vec<MachineStat>,
    /// 准备占比超阈值的机台
    pub stats_over_prep: Vec<MachineStat>,
}

impl DepartmentReport {
    /// 取指定筛选的产能分解
    pub fn breakdown(&self, filter: MachineTypeFilter) -> Option<&CapacityBreakdown> {
        self.slices
            .iter()
            .find(|s| s.filter == filter)
            .and_then(|s| s.breakdown.as_ref())
    }
}

/// 跨车间对比单元 (车间 × 机型)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonCell {
    pub department: String,
    pub filter: MachineTypeFilter,
    /// 加权加工时间合计 (分钟)
    pub processing_weighted_min: f64,
    /// 占所有对比单元加工时间之和的比例 (%)
    pub processing_share_pct: f64,
    /// 开机机台数
    pub active_count: usize,
}

/// 看板报表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityReport {
    pub departments: Vec<DepartmentReport>,
    /// 跨车间对比: 车间 × {车床, 铣床}, 无数据的单元不输出
    pub comparison: Vec<ComparisonCell>,
}

// ==========================================
// ReportComposer - 报表组装引擎
// ==========================================
pub struct ReportComposer {
    aggregator: CapacityAggregator,
    counter: MachineActivityCounter,
    stats_engine: MachineStatsEngine,
}

impl ReportComposer {
    /// 构造函数
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            aggregator: CapacityAggregator::new(config.clone()),
            counter: MachineActivityCounter::new(config.clone()),
            stats_engine: MachineStatsEngine::new(config),
        }
    }

    /// 组装看板报表
    ///
    /// # 参数
    /// - `records`: 查询周期内的全部工时记录 (已按周期过滤)
    /// - `roster`: 机台花名册 (空切片表示花名册缺失)
    /// - `departments`: 车间清单 (报表按此顺序输出)
    /// - `type_filters`: 每个车间要计算的机型切片
    pub fn compose(
        &self,
        records: &[UtilizationRecord],
        roster: &[String],
        departments: &[String],
        type_filters: &[MachineTypeFilter],
    ) -> CapacityReport {
        let mut department_reports = Vec::with_capacity(departments.len());
        let mut comparison = Vec::new();

        for department in departments {
            let dept_records: Vec<UtilizationRecord> = records
                .iter()
                .filter(|r| &r.department == department)
                .cloned()
                .collect();

            let slices: Vec<SliceReport> = type_filters
                .iter()
                .map(|&filter| SliceReport {
                    filter,
                    breakdown: self.aggregator.aggregate(&dept_records, filter),
                    active_count: match filter {
                        MachineTypeFilter::All => None,
                        _ => Some(self.counter.count_active(&dept_records, filter)),
                    },
                })
                .collect();

            // 跨车间对比: 车床/铣床两个切片的加工时间与开机数
            for slice in &slices {
                if slice.filter == MachineTypeFilter::All {
                    continue;
                }
                if let Some(breakdown) = &slice.breakdown {
                    comparison.push(ComparisonCell {
                        department: department.clone(),
                        filter: slice.filter,
                        processing_weighted_min: breakdown.processing_weighted_min,
                        processing_share_pct: 0.0, // 第二遍统一计算
                        active_count: slice.active_count.unwrap_or(0),
                    });
                }
            }

            let machine_stats = self.stats_engine.machine_stats(&dept_records);
            department_reports.push(DepartmentReport {
                department: department.clone(),
                idle_machines: self.counter.find_fully_idle(&dept_records, roster),
                stats_over_stop: self.stats_engine.stats_over_stop_threshold(&machine_stats),
                stats_over_setup: self.stats_engine.stats_over_setup_threshold(&machine_stats),
                stats_over_prep: self.stats_engine.stats_over_prep_threshold(&machine_stats),
                machine_stats,
                slices,
            });
        }

        // 对比单元的加工时间占比
        let total_processing: f64 = comparison.iter().map(|c| c.processing_weighted_min).sum();
        if total_processing > 0.0 {
            for cell in &mut comparison {
                cell.processing_share_pct = cell.processing_weighted_min / total_processing * 100.0;
            }
        }

        CapacityReport {
            departments: department_reports,
            comparison,
        }
    }
}
