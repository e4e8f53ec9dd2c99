// ==========================================
// 机加工产能看板系统 - 看板 API
// ==========================================
// 职责: 面向呈现层的查询门面
//   - 周期过滤 (按月 / 按日)
//   - 报表缓存 (键 = 查询参数 + 数据版本令牌)
// 架构: API 层 → 引擎层 (ReportComposer) + 数据源层
// ==========================================

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::DashboardConfig;
use crate::domain::{CapacityBreakdown, MachineTypeFilter, UtilizationRecord};
use crate::engine::{CapacityReport, DepartmentReport, IdleMachine, ReportComposer};
use crate::repository::{RecordSource, RosterSource};

// ==========================================
// YearMonth - 年月
// ==========================================
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// 日期是否落在本月
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ApiError;

    /// 解析 "YYYY-MM"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ApiError::BadMonthFormat(s.to_string());
        let (year_str, month_str) = s.trim().split_once('-').ok_or_else(bad)?;
        let year: i32 = year_str.parse().map_err(|_| bad())?;
        let month: u32 = month_str.parse().map_err(|_| bad())?;
        if !(1..=12).contains(&month) {
            return Err(bad());
        }
        Ok(Self { year, month })
    }
}

// ==========================================
// ReportQuery - 报表查询参数
// ==========================================
// month 与 date 同时给出时, 两个条件都生效
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportQuery {
    /// 按月过滤 (None = 不限)
    pub month: Option<YearMonth>,
    /// 按日过滤 (None = 不限)
    pub date: Option<NaiveDate>,
}

impl ReportQuery {
    /// 记录是否通过周期过滤
    ///
    /// 设了周期条件时, 日期解析失败 (None) 的记录一律排除。
    fn matches(&self, record: &UtilizationRecord) -> bool {
        if let Some(month) = self.month {
            match record.date {
                Some(d) if month.contains(d) => {}
                _ => return false,
            }
        }
        if let Some(date) = self.date {
            if record.date != Some(date) {
                return false;
            }
        }
        true
    }

    /// 缓存键片段
    fn cache_key(&self) -> String {
        format!(
            "month={};date={}",
            self.month.map(|m| m.to_string()).unwrap_or_default(),
            self.date.map(|d| d.to_string()).unwrap_or_default(),
        )
    }
}

// ==========================================
// DashboardApi - 看板 API
// ==========================================
pub struct DashboardApi {
    record_source: Arc<dyn RecordSource>,
    roster_source: Arc<dyn RosterSource>,
    config: DashboardConfig,
    composer: ReportComposer,
    /// 报表缓存: (数据版本令牌, 查询参数) → 报表
    /// 令牌随数据源 refresh 变化, 旧条目自然失效后被清理
    report_cache: Mutex<HashMap<(String, String), Arc<CapacityReport>>>,
}

impl DashboardApi {
    /// 创建新的 DashboardApi 实例
    ///
    /// # 参数
    /// - `record_source`: 工时记录数据源
    /// - `roster_source`: 机台花名册数据源
    /// - `config`: 看板口径配置
    pub fn new(
        record_source: Arc<dyn RecordSource>,
        roster_source: Arc<dyn RosterSource>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            composer: ReportComposer::new(config.clone()),
            record_source,
            roster_source,
            config,
            report_cache: Mutex::new(HashMap::new()),
        }
    }

    // ==========================================
    // 报表查询
    // ==========================================

    /// 组装完整看板报表 (带缓存)
    ///
    /// 聚合是输入的纯函数, 相同 (查询参数, 数据版本) 直接命中缓存;
    /// 数据源 refresh 后令牌变化, 缓存自动失效。
    pub fn compose_report(&self, query: &ReportQuery) -> ApiResult<Arc<CapacityReport>> {
        let snapshot = self.record_source.snapshot()?;
        let cache_key = (snapshot.version_token.clone(), query.cache_key());

        {
            let cache = self
                .report_cache
                .lock()
                .map_err(|e| ApiError::InternalError(format!("缓存锁获取失败: {}", e)))?;
            if let Some(report) = cache.get(&cache_key) {
                tracing::debug!(key = ?cache_key, "报表缓存命中");
                return Ok(Arc::clone(report));
            }
        }

        let roster = self.roster_source.roster().unwrap_or_else(|e| {
            // 花名册缺失按合同降级, 不作为错误向上传播
            tracing::warn!(error = %e, "花名册不可用, 整班停机识别降级");
            Vec::new()
        });

        let filtered: Vec<UtilizationRecord> = snapshot
            .records
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();

        let report = Arc::new(self.composer.compose(
            &filtered,
            &roster,
            &self.config.departments,
            &[
                MachineTypeFilter::Lathe,
                MachineTypeFilter::Milling,
                MachineTypeFilter::All,
            ],
        ));

        let mut cache = self
            .report_cache
            .lock()
            .map_err(|e| ApiError::InternalError(format!("缓存锁获取失败: {}", e)))?;
        // 数据版本变化后旧令牌条目不再命中, 直接清掉
        cache.retain(|(token, _), _| *token == snapshot.version_token);
        cache.insert(cache_key, Arc::clone(&report));

        Ok(report)
    }

    /// 查询单车间报表
    pub fn department_report(
        &self,
        department: &str,
        query: &ReportQuery,
    ) -> ApiResult<DepartmentReport> {
        self.validate_department(department)?;
        let report = self.compose_report(query)?;
        report
            .departments
            .iter()
            .find(|d| d.department == department)
            .cloned()
            .ok_or_else(|| ApiError::UnknownDepartment(department.to_string()))
    }

    /// 查询产能分解 (单车间 × 机型)
    ///
    /// # 返回
    /// - `Ok(Some(..))`: 有数据
    /// - `Ok(None)`: 该切片无数据 (不是错误)
    pub fn capacity_breakdown(
        &self,
        department: &str,
        filter: MachineTypeFilter,
        query: &ReportQuery,
    ) -> ApiResult<Option<CapacityBreakdown>> {
        let report = self.department_report(department, query)?;
        Ok(report.breakdown(filter).cloned())
    }

    /// 查询开机机台数 (单车间 × 机型)
    pub fn active_machine_count(
        &self,
        department: &str,
        filter: MachineTypeFilter,
        query: &ReportQuery,
    ) -> ApiResult<usize> {
        let report = self.department_report(department, query)?;
        Ok(report
            .slices
            .iter()
            .find(|s| s.filter == filter)
            .and_then(|s| s.active_count)
            .unwrap_or(0))
    }

    /// 查询整班停机机台 (单车间)
    pub fn fully_idle_machines(
        &self,
        department: &str,
        query: &ReportQuery,
    ) -> ApiResult<Vec<IdleMachine>> {
        let report = self.department_report(department, query)?;
        Ok(report.idle_machines)
    }

    // ==========================================
    // 周期选项查询 (呈现层下拉框用)
    // ==========================================

    /// 数据中出现过的月份 (降序)
    pub fn available_months(&self) -> ApiResult<Vec<YearMonth>> {
        let snapshot = self.record_source.snapshot()?;
        let mut months: Vec<YearMonth> = snapshot
            .records
            .iter()
            .filter_map(|r| r.date)
            .map(|d| YearMonth::new(d.year(), d.month()))
            .collect();
        months.sort();
        months.dedup();
        months.reverse();
        Ok(months)
    }

    /// 数据中出现过的日期 (降序, 可按月份限定)
    pub fn available_dates(&self, month: Option<YearMonth>) -> ApiResult<Vec<NaiveDate>> {
        let snapshot = self.record_source.snapshot()?;
        let mut dates: Vec<NaiveDate> = snapshot
            .records
            .iter()
            .filter_map(|r| r.date)
            .filter(|d| month.map_or(true, |m| m.contains(*d)))
            .collect();
        dates.sort();
        dates.dedup();
        dates.reverse();
        Ok(dates)
    }

    /// 刷新数据源 (重新加载, 报表缓存随令牌失效)
    pub fn refresh(&self) -> ApiResult<()> {
        self.record_source.refresh()?;
        Ok(())
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn validate_department(&self, department: &str) -> ApiResult<()> {
        if self.config.departments.iter().any(|d| d == department) {
            Ok(())
        } else {
            Err(ApiError::UnknownDepartment(department.to_string()))
        }
    }
}
