// ==========================================
// 生产排程优化前端 - 核心库
// ==========================================
// 流水线: 参数表单 → 请求构建 → 求解网关 → 结果聚合
// 技术栈: Tauri + Rust + reqwest
// 系统定位: 外部求解服务的客户端,不在本地求解
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 参数、请求、响应、视图
pub mod domain;

// 引擎层 - 请求构建与结果聚合
pub mod engine;

// 网关层 - 求解服务交互
pub mod gateway;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - Tauri 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{RowId, SubmissionState};

// 领域实体
pub use domain::{
    AggregateView, ParameterForm, ScheduleEntry, ScheduleParameters, SolveRequest, SolveResponse,
};

// 引擎
pub use engine::{RequestBuilder, ResultAggregator, ValidationError, ValidationErrorKind};

// 网关
pub use gateway::{GatewayError, HttpSolverTransport, SolverGateway, SolverTransport};

// API
pub use api::{ApiError, ApiResult, ConfigApi, ScheduleApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产排程优化前端";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
