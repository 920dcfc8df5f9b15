// ==========================================
// 生产排程优化前端 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 Tauri 命令调用
// ==========================================

pub mod config_api;
pub mod error;
pub mod schedule_api;

// 重导出核心类型
pub use config_api::{ConfigApi, ConfigItem};
pub use error::{ApiError, ApiResult};
pub use schedule_api::{LatestResult, ScheduleApi, DETAILS_CSV_HEADER};
