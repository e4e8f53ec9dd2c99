// ==========================================
// 机加工产能看板系统 - 核心库
// ==========================================
// 系统定位: 决策支持系统 (产能聚合 + 看板报表)
// 口径来源: 车间工时日报的手工核算公式
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 口径配置
pub mod config;

// 导入层 - 外部文件
pub mod importer;

// 引擎层 - 业务口径计算
pub mod engine;

// 数据源层 - 数据访问
pub mod repository;

// 日志系统
pub mod logging;

// API 层 - 查询接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{CapacityBreakdown, IdleReason, MachineStat, MachineTypeFilter, UtilizationRecord};

// 配置
pub use config::DashboardConfig;

// 引擎
pub use engine::{
    CapacityAggregator, CapacityReport, DepartmentReport, IdleMachine, MachineActivityCounter,
    MachineStatsEngine, ReportComposer,
};

// 数据源
pub use repository::{
    FileRecordSource, FileRosterSource, InMemoryRecordSource, InMemoryRosterSource, RecordSnapshot,
    RecordSource, RosterSource,
};

// API
pub use api::{DashboardApi, ReportQuery, YearMonth};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "机加工产能看板系统";
