// ==========================================
// 机加工产能看板系统 - 数据源层
// ==========================================
// 职责: 数据访问接口与快照管理
// 红线: 不含业务口径计算
// ==========================================

pub mod error;
pub mod record_repo;
pub mod roster_repo;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use record_repo::{FileRecordSource, InMemoryRecordSource, RecordSnapshot, RecordSource};
pub use roster_repo::{FileRosterSource, InMemoryRosterSource, RosterSource};
