// ==========================================
// 生产排程优化前端 - 求解网关错误类型
// ==========================================
// 职责: 提交期错误,重新提交即可恢复
// 红线: 不做自动重试
// ==========================================

use thiserror::Error;

use crate::engine::error::AggregationError;

/// 求解网关错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// 已有求解在途,新提交被立即拒绝（不排队）
    #[error("已有求解请求在途,请等待完成后再提交")]
    AlreadyInFlight,

    /// 无法连接求解服务（含超时）
    #[error("求解服务不可达: {0}")]
    Network(String),

    /// 服务可达但返回非成功状态
    #[error("求解服务拒绝请求(HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// 成功状态但响应体不符合结构约定
    #[error("求解结果格式错误: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// 错误代码（返回给前端）
    pub fn code(&self) -> &str {
        match self {
            GatewayError::AlreadyInFlight => "ALREADY_IN_FLIGHT",
            GatewayError::Network(_) => "NETWORK",
            GatewayError::Rejected { .. } => "REJECTED",
            GatewayError::MalformedResponse(_) => "MALFORMED_RESPONSE",
        }
    }
}

// ==========================================
// 从 AggregationError 转换
// 聚合失败在网关边界归类为响应格式错误
// ==========================================
impl From<AggregationError> for GatewayError {
    fn from(err: AggregationError) -> Self {
        GatewayError::MalformedResponse(err.to_string())
    }
}
