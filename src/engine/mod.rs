// ==========================================
// 机加工产能看板系统 - 引擎层
// ==========================================
// 职责: 业务口径计算 (聚合 / 活动统计 / 明细 / 报表组装)
// 红线: 引擎不做 IO, 所有口径规则集中在配置层
// ==========================================

pub mod activity;
pub mod aggregator;
pub mod report;
pub mod stats;

// 重导出核心引擎
pub use activity::{IdleMachine, MachineActivityCounter};
pub use aggregator::CapacityAggregator;
pub use report::{CapacityReport, ComparisonCell, DepartmentReport, ReportComposer, SliceReport};
pub use stats::MachineStatsEngine;
