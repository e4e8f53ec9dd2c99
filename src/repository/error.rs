// ==========================================
// 机加工产能看板系统 - 数据源层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::importer::ImportError;
use thiserror::Error;

/// 数据源层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据加载错误 =====
    #[error("工时数据加载失败: {0}")]
    RecordLoadError(String),

    #[error("花名册加载失败: {0}")]
    RosterLoadError(String),

    #[error(transparent)]
    Import(#[from] ImportError),

    // ===== 通用错误 =====
    #[error("数据源锁获取失败: {0}")]
    LockError(String),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
