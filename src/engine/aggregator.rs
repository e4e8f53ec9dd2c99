// ==========================================
// 机加工产能看板系统 - 产能聚合引擎
// ==========================================
// 职责: 工时记录 → 产能分解 (时间合计 + 占比)
// 口径: 复刻 Excel 手工公式
//   - 装夹 / 加工 乘实际数量 (单件工时 × 件数)
//   - 准备 / 试切 / 修整 直接求和
//   - 停机 / 其他停机 剔除整班哨兵值 (420/630/660) 后求和
// 红线: 纯计算, 不做 IO, 不持有可变状态
// ==========================================

use crate::config::DashboardConfig;
use crate::domain::{CapacityBreakdown, MachineTypeFilter, UtilizationRecord};

// ==========================================
// CapacityAggregator - 产能聚合引擎
// ==========================================
pub struct CapacityAggregator {
    config: DashboardConfig,
}

impl CapacityAggregator {
    /// 构造函数
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    /// 聚合一组工时记录为产能分解
    ///
    /// # 参数
    /// - `records`: 工时记录 (调用方已按车间/周期切好片)
    /// - `filter`: 机型筛选 (车床 / 铣床 / 全部)
    ///
    /// # 返回
    /// - `Some(CapacityBreakdown)`: 七分量合计 > 0
    /// - `None`: 该切片无数据 (不是错误)
    pub fn aggregate(
        &self,
        records: &[UtilizationRecord],
        filter: MachineTypeFilter,
    ) -> Option<CapacityBreakdown> {
        let mut prep = 0.0;
        let mut trial_run = 0.0;
        let mut setup_weighted = 0.0;
        let mut processing_weighted = 0.0;
        let mut stop = 0.0;
        let mut stop_other = 0.0;
        let mut repair = 0.0;

        for record in self.filter_by_type(records, filter) {
            prep += record.prep_min;
            trial_run += record.trial_run_min;
            setup_weighted += record.setup_weighted_min();
            processing_weighted += record.processing_weighted_min();
            repair += record.repair_min;

            // 整班哨兵值按列独立剔除: 一条记录的停机列命中哨兵
            // 不影响其其他停机列照常计入
            if !self.config.is_shift_sentinel(record.stop_min) {
                stop += record.stop_min;
            }
            if !self.config.is_shift_sentinel(record.stop_other_min) {
                stop_other += record.stop_other_min;
            }
        }

        CapacityBreakdown::from_sums(
            prep,
            trial_run,
            setup_weighted,
            processing_weighted,
            stop,
            stop_other,
            repair,
        )
    }

    /// 按机型筛选记录
    pub fn filter_by_type<'a>(
        &'a self,
        records: &'a [UtilizationRecord],
        filter: MachineTypeFilter,
    ) -> impl Iterator<Item = &'a UtilizationRecord> {
        records
            .iter()
            .filter(move |r| filter.accepts(self.config.is_lathe(&r.machine_no)))
    }
}
