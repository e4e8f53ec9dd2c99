// ==========================================
// 机加工产能看板系统 - API层错误类型
// ==========================================
// 职责: 把数据源/导入层错误转换为调用方可读的错误
// 注意: 空切片 (无数据) 不是错误, 以 Option/None 表达
// ==========================================

use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 查询参数错误 =====
    #[error("无效查询参数: {0}")]
    InvalidQuery(String),

    #[error("未知车间: {0}")]
    UnknownDepartment(String),

    #[error("月份格式错误: {0}（期望 YYYY-MM）")]
    BadMonthFormat(String),

    // ===== 数据访问错误 =====
    #[error("数据访问失败: {0}")]
    DataAccessError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从下层错误转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Other(e) => ApiError::Other(e),
            other => ApiError::DataAccessError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::DataAccessError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
