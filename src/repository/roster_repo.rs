// ==========================================
// 机加工产能看板系统 - 机台花名册数据源
// ==========================================
// 职责: 向引擎层提供规范机台号清单
// 降级: 花名册缺失时返回空清单,
//       整班停机识别退化为仅 "数据中整班停机" 条件
// ==========================================

use crate::importer::RosterReader;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// ==========================================
// RosterSource Trait
// ==========================================
pub trait RosterSource: Send + Sync {
    /// 取机台花名册 (有序, 可为空)
    fn roster(&self) -> RepositoryResult<Vec<String>>;
}

// ==========================================
// InMemoryRosterSource - 内存花名册
// ==========================================
pub struct InMemoryRosterSource {
    machines: Vec<String>,
}

impl InMemoryRosterSource {
    pub fn new(machines: Vec<String>) -> Self {
        Self { machines }
    }

    /// 空花名册 (花名册协作方缺失时使用)
    pub fn empty() -> Self {
        Self { machines: Vec::new() }
    }
}

impl RosterSource for InMemoryRosterSource {
    fn roster(&self) -> RepositoryResult<Vec<String>> {
        Ok(self.machines.clone())
    }
}

// ==========================================
// FileRosterSource - 文件花名册
// ==========================================
pub struct FileRosterSource {
    path: PathBuf,
    reader: RosterReader,
    cached: Mutex<Option<Vec<String>>>,
}

impl FileRosterSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            reader: RosterReader::new(),
            cached: Mutex::new(None),
        }
    }
}

impl RosterSource for FileRosterSource {
    fn roster(&self) -> RepositoryResult<Vec<String>> {
        let mut guard = self
            .cached
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        if guard.is_none() {
            let machines = self.reader.read(&self.path)?;
            tracing::info!(
                path = %self.path.display(),
                machines = machines.len(),
                "机台花名册加载完成"
            );
            *guard = Some(machines);
        }
        Ok(guard.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_roster_降级() {
        let source = InMemoryRosterSource::empty();
        assert!(source.roster().unwrap().is_empty());
    }
}
