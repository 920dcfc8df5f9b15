use crate::api::error::ApiError;
use crate::domain::types::RowId;
use serde::{Deserialize, Serialize};

// ==========================================
// 公共工具：错误映射、行ID解析、序列化
// ==========================================

/// 错误响应（返回给前端）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息（按当前语言）
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

/// 将ApiError转换为JSON字符串（Tauri要求）
pub(super) fn map_api_error(err: ApiError) -> String {
    let details = match &err {
        ApiError::Validation(e) => Some(serde_json::json!({
            "kind": e.kind,
            "field": e.field,
        })),
        ApiError::Gateway(crate::gateway::GatewayError::Rejected { status, .. }) => {
            Some(serde_json::json!({ "status": status }))
        }
        ApiError::StaleResult { seq } => Some(serde_json::json!({ "seq": seq })),
        ApiError::RowNotFound(row_id) => Some(serde_json::json!({ "row_id": row_id })),
        _ => None,
    };

    let error_response = ErrorResponse {
        code: err.code(),
        message: err.user_message(),
        details,
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| err.to_string())
}

/// 解析行ID
pub(super) fn parse_row_id(raw: &str) -> Result<RowId, String> {
    RowId::parse(raw).ok_or_else(|| format!("行ID格式错误: {}", raw))
}

/// 序列化命令返回值
pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("序列化失败: {}", e))
}
