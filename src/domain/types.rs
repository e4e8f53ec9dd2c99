// ==========================================
// 机加工产能看板系统 - 领域类型定义
// ==========================================
// 职责: 定义切片筛选类型与通用辅助函数
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// MachineTypeFilter - 机型筛选
// ==========================================
// 口径: 车床 = 机台号属于配置的车床清单
//       铣床 = 车床清单的补集
//       All  = 不筛选
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MachineTypeFilter {
    /// 全部机台
    All,
    /// 车床
    Lathe,
    /// 铣床 (非车床)
    Milling,
}

impl MachineTypeFilter {
    /// 判断机台号是否落入本筛选
    ///
    /// # 参数
    /// - `machine_no`: 机台号
    /// - `is_lathe`: 机台号是否属于车床清单 (由配置层判定)
    pub fn accepts(&self, is_lathe: bool) -> bool {
        match self {
            MachineTypeFilter::All => true,
            MachineTypeFilter::Lathe => is_lathe,
            MachineTypeFilter::Milling => !is_lathe,
        }
    }

    /// 筛选的稳定标识 (缓存键、日志用)
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineTypeFilter::All => "all",
            MachineTypeFilter::Lathe => "lathe",
            MachineTypeFilter::Milling => "milling",
        }
    }
}

impl fmt::Display for MachineTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MachineTypeFilter::All => "合计",
            MachineTypeFilter::Lathe => "车床",
            MachineTypeFilter::Milling => "铣床",
        };
        write!(f, "{}", label)
    }
}

// ==========================================
// IdleReason - 整班停机原因
// ==========================================
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IdleReason {
    /// 本期无任何数据 (花名册有此机台但数据为空)
    NoData,
    /// 整班停机 (停机时长达到整班阈值且无任何生产时间)
    StoppedAllShift,
}

impl fmt::Display for IdleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IdleReason::NoData => "无数据",
            IdleReason::StoppedAllShift => "整班停机",
        };
        write!(f, "{}", label)
    }
}

// ==========================================
// 机台号排序键
// ==========================================

/// 机台号的数字排序键
///
/// 机台号通常是数字字符串 ("48", "61"), 按数值排序;
/// 非数字机台号排在所有数字之后, 按字典序兜底。
pub fn machine_sort_key(machine_no: &str) -> (u64, String) {
    match machine_no.trim().parse::<u64>() {
        Ok(n) => (n, String::new()),
        Err(_) => (u64::MAX, machine_no.to_string()),
    }
}
