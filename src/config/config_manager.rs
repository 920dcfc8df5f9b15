// ==========================================
// 生产排程优化前端 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入、快照恢复
// 存储: JSON 文件 (key-value),未配置的键取默认值
// ==========================================

use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

use crate::config::solver_config_trait::SolverConfigReader;

/// 求解服务地址环境变量
pub const SOLVER_ENDPOINT_ENV: &str = "SCHEDULE_SOLVER_ENDPOINT";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置文件格式错误: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置值无效: key={key}, value={value}")]
    InvalidValue { key: String, value: String },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    /// 持久化路径（None 表示仅内存）
    path: Option<PathBuf>,
    values: Mutex<BTreeMap<String, String>>,
}

impl ConfigManager {
    /// 从配置文件创建 ConfigManager
    ///
    /// 文件不存在时以空配置启动,首次写入时创建。
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let values = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::info!("加载配置: path={}, keys={}", path.display(), values.len());

        Ok(Self {
            path: Some(path),
            values: Mutex::new(values),
        })
    }

    /// 仅内存配置（测试/无配置目录时使用）
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock_values(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> Option<String> {
        self.lock_values().get(key).cloned()
    }

    /// 读取配置值,带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_global_config_value(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// 全部配置（已设置的键）
    pub fn list_configs(&self) -> BTreeMap<String, String> {
        self.lock_values().clone()
    }

    /// 写入配置并持久化
    ///
    /// 已知键会先做取值校验,未知键原样保存。
    pub fn update_config(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key = key.trim();
        let value = value.trim();
        validate_value(key, value)?;

        // 先落盘再提交到内存,写盘失败时内存保持原值
        let mut values = self.lock_values();
        let mut candidate = values.clone();
        candidate.insert(key.to_string(), value.to_string());
        self.persist(&candidate)?;
        *values = candidate;
        drop(values);

        tracing::info!("配置已更新: {}={}", key, value);
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        let json_value = json!(self.list_configs());
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 从配置快照恢复配置（整体替换）
    ///
    /// # 返回
    /// - Ok(usize): 恢复的键数量
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> Result<usize, ConfigError> {
        let restored: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;
        for (key, value) in &restored {
            validate_value(key, value)?;
        }

        let count = restored.len();
        let mut values = self.lock_values();
        self.persist(&restored)?;
        *values = restored;
        drop(values);

        tracing::info!("配置已从快照恢复: keys={}", count);
        Ok(count)
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(values)?)?;
        Ok(())
    }
}

/// 已知键的取值校验
fn validate_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let ok = match key {
        config_keys::REQUEST_TIMEOUT_SECS => value.parse::<u64>().map(|v| v > 0).unwrap_or(false),
        config_keys::STRICT_UNIQUE_NAMES => value.parse::<bool>().is_ok(),
        config_keys::DEFAULT_HOURS_PER_DAY => value
            .parse::<u32>()
            .map(|v| (1..=24).contains(&v))
            .unwrap_or(false),
        config_keys::SOLVER_ENDPOINT => value.parse::<reqwest::Url>().is_ok(),
        config_keys::LOCALE => SUPPORTED_LOCALES.contains(&value),
        _ => true,
    };

    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// 支持的界面语言
pub const SUPPORTED_LOCALES: &[&str] = &["zh-CN", "en"];

// ==========================================
// SolverConfigReader 实现
// ==========================================
#[async_trait]
impl SolverConfigReader for ConfigManager {
    async fn get_solver_endpoint(&self) -> Result<String, ConfigError> {
        if let Ok(endpoint) = std::env::var(SOLVER_ENDPOINT_ENV) {
            let trimmed = endpoint.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
        Ok(self.get_config_or_default(
            config_keys::SOLVER_ENDPOINT,
            "http://localhost:8000/api/v1/schedule",
        ))
    }

    async fn get_request_timeout(&self) -> Result<Duration, ConfigError> {
        let value = self.get_config_or_default(config_keys::REQUEST_TIMEOUT_SECS, "300");
        Ok(Duration::from_secs(value.parse::<u64>().unwrap_or(300)))
    }

    async fn get_strict_unique_names(&self) -> Result<bool, ConfigError> {
        let value = self.get_config_or_default(config_keys::STRICT_UNIQUE_NAMES, "false");
        Ok(value.parse::<bool>().unwrap_or(false))
    }

    async fn get_default_hours_per_day(&self) -> Result<u32, ConfigError> {
        let value = self.get_config_or_default(config_keys::DEFAULT_HOURS_PER_DAY, "24");
        Ok(value.parse::<u32>().unwrap_or(24))
    }

    async fn get_locale(&self) -> Result<String, ConfigError> {
        Ok(self.get_config_or_default(config_keys::LOCALE, "zh-CN"))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 求解服务
    pub const SOLVER_ENDPOINT: &str = "solver_endpoint";
    pub const REQUEST_TIMEOUT_SECS: &str = "request_timeout_secs";

    // 请求构建
    pub const STRICT_UNIQUE_NAMES: &str = "strict_unique_names";
    pub const DEFAULT_HOURS_PER_DAY: &str = "default_hours_per_day";

    // 界面
    pub const LOCALE: &str = "locale";
}

/// 获取默认配置文件路径
///
/// 环境变量 PRODUCTION_SCHEDULE_CONFIG_PATH 优先,否则使用用户配置目录。
pub fn get_default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("PRODUCTION_SCHEDULE_CONFIG_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(dir) => dir.join("production-schedule-console").join("config.json"),
        None => PathBuf::from("./production_schedule_console.json"),
    }
}
