// ==========================================
// 生产排程优化前端 - 求解网关层
// ==========================================
// 职责: 与外部求解服务的唯一交互点
// 说明: 传输层以 trait 隔离,网关只持有状态机与提交槽
// ==========================================

pub mod error;
pub mod observer;
pub mod solver_gateway;
pub mod transport;

// 重导出
pub use error::GatewayError;
pub use observer::{NoOpObserver, RecordingObserver, SubmissionObserver};
pub use solver_gateway::{SolverGateway, Submission};
pub use transport::{HttpSolverTransport, SolverTransport, TransportError, TransportResponse};
