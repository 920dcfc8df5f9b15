// ==========================================
// 生产排程优化前端 - 求解配置读取 Trait
// ==========================================
// 职责: 定义装配网关/构建器所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入
// ==========================================

use async_trait::async_trait;
use std::time::Duration;

use crate::config::config_manager::ConfigError;

// ==========================================
// SolverConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config.json 读取）
#[async_trait]
pub trait SolverConfigReader: Send + Sync {
    /// 求解服务地址
    ///
    /// # 默认值
    /// - http://localhost:8000/api/v1/schedule
    /// - 环境变量 SCHEDULE_SOLVER_ENDPOINT 优先
    async fn get_solver_endpoint(&self) -> Result<String, ConfigError>;

    /// 单次求解请求超时
    ///
    /// # 默认值
    /// - 300 秒
    async fn get_request_timeout(&self) -> Result<Duration, ConfigError>;

    /// 是否严格校验重名（true 时重名报错,false 时后写覆盖）
    ///
    /// # 默认值
    /// - false
    async fn get_strict_unique_names(&self) -> Result<bool, ConfigError>;

    /// 新表单的每日小时数
    ///
    /// # 默认值
    /// - 24
    async fn get_default_hours_per_day(&self) -> Result<u32, ConfigError>;

    /// 界面语言
    ///
    /// # 默认值
    /// - zh-CN
    async fn get_locale(&self) -> Result<String, ConfigError>;
}
