// ==========================================
// 机加工产能看板系统 - API 层
// ==========================================
// 职责: 面向呈现层的查询接口
// ==========================================

pub mod dashboard_api;
pub mod error;

// 重导出核心类型
pub use dashboard_api::{DashboardApi, ReportQuery, YearMonth};
pub use error::{ApiError, ApiResult};
