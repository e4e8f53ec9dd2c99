// ==========================================
// 机加工产能看板系统 - 工时记录数据源
// ==========================================
// 职责: 向引擎层提供不可变的工时记录快照
// 设计: 显式注入的数据访问接口 + 数据版本令牌,
//       缓存失效以版本令牌为键
// ==========================================

use crate::domain::UtilizationRecord;
use crate::importer::{RowNormalizer, UniversalFileParser};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

// ==========================================
// RecordSnapshot - 工时记录快照
// ==========================================
// 生命周期: 加载时生成, 不再修改; 重新加载产生新令牌
#[derive(Debug, Clone)]
pub struct RecordSnapshot {
    /// 数据版本令牌 (报表缓存键的一部分)
    pub version_token: String,
    /// 加载时刻
    pub loaded_at: DateTime<Utc>,
    /// 工时记录
    pub records: Vec<UtilizationRecord>,
}

impl RecordSnapshot {
    /// 由记录集合新建快照 (生成新令牌)
    pub fn new(records: Vec<UtilizationRecord>) -> Self {
        Self {
            version_token: Uuid::new_v4().to_string(),
            loaded_at: Utc::now(),
            records,
        }
    }
}

// ==========================================
// RecordSource Trait
// ==========================================
pub trait RecordSource: Send + Sync {
    /// 取当前快照 (克隆)
    fn snapshot(&self) -> RepositoryResult<RecordSnapshot>;

    /// 重新加载数据, 生成新的版本令牌
    fn refresh(&self) -> RepositoryResult<()>;
}

// ==========================================
// InMemoryRecordSource - 内存数据源
// ==========================================
// 用途: 测试与上游已解析好数据的嵌入场景
pub struct InMemoryRecordSource {
    snapshot: Mutex<RecordSnapshot>,
}

impl InMemoryRecordSource {
    pub fn new(records: Vec<UtilizationRecord>) -> Self {
        Self {
            snapshot: Mutex::new(RecordSnapshot::new(records)),
        }
    }

    /// 替换记录集合 (生成新令牌)
    pub fn replace(&self, records: Vec<UtilizationRecord>) -> RepositoryResult<()> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        *guard = RecordSnapshot::new(records);
        Ok(())
    }
}

impl RecordSource for InMemoryRecordSource {
    fn snapshot(&self) -> RepositoryResult<RecordSnapshot> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(guard.clone())
    }

    fn refresh(&self) -> RepositoryResult<()> {
        // 内存数据源无外部来源, refresh 仅更换令牌
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        let records = guard.records.clone();
        *guard = RecordSnapshot::new(records);
        Ok(())
    }
}

// ==========================================
// FileRecordSource - 文件数据源
// ==========================================
// 支持 CSV / Excel 工时日报文件, 懒加载 + 显式 refresh
pub struct FileRecordSource {
    path: PathBuf,
    normalizer: RowNormalizer,
    cached: Mutex<Option<RecordSnapshot>>,
}

impl FileRecordSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            normalizer: RowNormalizer::new(),
            cached: Mutex::new(None),
        }
    }

    /// 从文件加载并标准化
    fn load(&self) -> RepositoryResult<RecordSnapshot> {
        let rows = UniversalFileParser.parse(&self.path)?;
        let records = self.normalizer.normalize_rows(&rows);
        tracing::info!(
            path = %self.path.display(),
            rows = records.len(),
            "工时数据加载完成"
        );
        Ok(RecordSnapshot::new(records))
    }
}

impl RecordSource for FileRecordSource {
    fn snapshot(&self) -> RepositoryResult<RecordSnapshot> {
        let mut guard = self
            .cached
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        match guard.as_ref() {
            Some(snapshot) => Ok(snapshot.clone()),
            None => {
                let snapshot = self.load()?;
                *guard = Some(snapshot.clone());
                Ok(snapshot)
            }
        }
    }

    fn refresh(&self) -> RepositoryResult<()> {
        let fresh = self.load()?;
        let mut guard = self
            .cached
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        *guard = Some(fresh);
        Ok(())
    }
}
