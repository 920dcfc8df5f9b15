// ==========================================
// 生产排程优化前端 - 引擎层
// ==========================================
// 职责: 请求规整与结果聚合,纯函数引擎
// 红线: Engine 不发网络请求,不持有跨结果状态
// ==========================================

pub mod error;
pub mod request_builder;
pub mod result_aggregator;

// 重导出核心引擎
pub use error::{AggregationError, ValidationError, ValidationErrorKind};
pub use request_builder::{RequestBuilder, MAX_HOURS_PER_DAY};
pub use result_aggregator::{ResultAggregator, FULFILLMENT_TOLERANCE};
