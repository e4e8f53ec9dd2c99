// ==========================================
// 机加工产能看板系统 - 配置层
// ==========================================
// 职责: 看板口径配置 (车床清单 / 哨兵值 / 车间清单 / 阈值)
// ==========================================

pub mod config_manager;

pub use config_manager::DashboardConfig;
