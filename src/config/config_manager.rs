// ==========================================
// 机加工产能看板系统 - 配置管理器
// ==========================================
// 职责: 看板口径配置的默认值、加载与保存
// 存储: JSON 文件 (默认位于系统配置目录)
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::path::{Path, PathBuf};

// ==========================================
// DashboardConfig - 看板配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 车床机台清单 (补集即为铣床)
    pub lathe_machines: Vec<String>,

    /// 整班停机哨兵值 (分钟)
    ///
    /// 车间日报用 "等于整班时长" 的停机值表示整班停机,
    /// 聚合时按精确匹配剔除, 不计入停机分钟数。
    /// 注意: 该集合对所有车间统一生效, 即使某车间班次时长
    /// 只有 420 分钟, 630/660 也同样被剔除。
    pub shift_sentinels: Vec<f64>,

    /// 整班停机判定阈值 (分钟, 取最短班次时长)
    ///
    /// 整班停机机台判定用 ">= 阈值", 口径刻意比哨兵值宽松。
    pub full_shift_threshold_min: f64,

    /// 车间清单 (报表按此顺序输出)
    pub departments: Vec<String>,

    /// 明细页签的占比阈值 (%)
    pub detail_threshold_pct: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            lathe_machines: [
                "48", "50", "51", "52", "54", "55", "56", "57", "58", "59", "60", "61",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            shift_sentinels: vec![420.0, 630.0, 660.0],
            full_shift_threshold_min: 420.0,
            departments: vec!["生产一部".to_string(), "生产二部".to_string()],
            detail_threshold_pct: 10.0,
        }
    }
}

impl DashboardConfig {
    /// 判断机台号是否为车床
    pub fn is_lathe(&self, machine_no: &str) -> bool {
        self.lathe_machines.iter().any(|m| m == machine_no)
    }

    /// 判断停机值是否为整班哨兵值 (精确匹配)
    pub fn is_shift_sentinel(&self, minutes: f64) -> bool {
        self.shift_sentinels.iter().any(|&s| s == minutes)
    }

    /// 默认配置文件路径 (系统配置目录下)
    ///
    /// # 返回
    /// - `Some(path)`: {config_dir}/capacity-dashboard/config.json
    /// - `None`: 无法确定系统配置目录
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("capacity-dashboard").join("config.json"))
    }

    /// 从 JSON 文件加载配置
    ///
    /// # 返回
    /// - `Ok(DashboardConfig)`: 加载成功 (缺失字段取默认值)
    /// - `Err`: 文件读取或 JSON 解析失败
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: DashboardConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从默认路径加载配置, 文件不存在时返回默认配置
    pub fn load_or_default() -> Self {
        match Self::default_config_path() {
            Some(path) if path.exists() => match Self::load_from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "配置文件解析失败, 使用默认配置");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// 保存配置到 JSON 文件 (自动创建父目录)
    pub fn save_to_file(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 配置合法性校验
    ///
    /// # 规则
    /// - 哨兵值与阈值必须为正有限数
    /// - 车间清单不得重复
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        for &s in &self.shift_sentinels {
            if !s.is_finite() || s <= 0.0 {
                return Err(format!("整班哨兵值非法: {}", s).into());
            }
        }
        if !self.full_shift_threshold_min.is_finite() || self.full_shift_threshold_min <= 0.0 {
            return Err(format!("整班阈值非法: {}", self.full_shift_threshold_min).into());
        }
        let unique: HashSet<&String> = self.departments.iter().collect();
        if unique.len() != self.departments.len() {
            return Err("车间清单存在重复项".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_车床清单() {
        let config = DashboardConfig::default();
        assert!(config.is_lathe("48"));
        assert!(config.is_lathe("61"));
        assert!(!config.is_lathe("47"));
        assert!(!config.is_lathe(""));
    }

    #[test]
    fn test_哨兵值精确匹配() {
        let config = DashboardConfig::default();
        assert!(config.is_shift_sentinel(420.0));
        assert!(config.is_shift_sentinel(630.0));
        assert!(config.is_shift_sentinel(660.0));
        // 精确匹配: 421 不是哨兵值
        assert!(!config.is_shift_sentinel(421.0));
        assert!(!config.is_shift_sentinel(419.5));
    }

    #[test]
    fn test_validate_拒绝非法哨兵() {
        let config = DashboardConfig {
            shift_sentinels: vec![420.0, -1.0],
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_load_往返() {
        let dir = tempfile::tempdir().expect("无法创建临时目录");
        let path = dir.path().join("config.json");

        let mut config = DashboardConfig::default();
        config.detail_threshold_pct = 15.0;
        config.save_to_file(&path).expect("保存失败");

        let loaded = DashboardConfig::load_from_file(&path).expect("加载失败");
        assert_eq!(loaded.detail_threshold_pct, 15.0);
        assert_eq!(loaded.lathe_machines, config.lathe_machines);
    }
}
