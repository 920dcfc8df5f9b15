// ==========================================
// 生产排程优化前端 - 配置层
// ==========================================
// 职责: 求解服务地址、超时、校验策略、界面语言
// 存储: 用户配置目录下的 config.json (key-value)
// ==========================================

pub mod config_manager;
pub mod solver_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, get_default_config_path, ConfigError, ConfigManager};
pub use solver_config_trait::SolverConfigReader;
