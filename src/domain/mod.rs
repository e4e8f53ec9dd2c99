// ==========================================
// 机加工产能看板系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod capacity;
pub mod record;
pub mod types;

// 重导出核心类型
pub use capacity::{CapacityBreakdown, MachineStat};
pub use record::UtilizationRecord;
pub use types::{machine_sort_key, IdleReason, MachineTypeFilter};
