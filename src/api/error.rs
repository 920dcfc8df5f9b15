// ==========================================
// 生产排程优化前端 - API层错误类型
// ==========================================
// 职责: 提交边界的统一错误,转换为用户可见的单条消息
// ==========================================

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::form::FormError;
use crate::domain::types::RowId;
use crate::engine::error::ValidationError;
use crate::gateway::error::GatewayError;
use crate::i18n::{t, t_with_args};

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 提交前错误（修改表单即可恢复）
    // ==========================================
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("求解进行中,表单已锁定")]
    FormLocked,

    #[error("表单行不存在: {0}")]
    RowNotFound(RowId),

    // ==========================================
    // 提交期错误（重新提交即可恢复）
    // ==========================================
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("求解结果已过期: seq={seq}")]
    StaleResult { seq: u64 },

    // ==========================================
    // 视图/导出
    // ==========================================
    #[error("暂无求解结果")]
    NoResult,

    #[error("导出失败: {0}")]
    Export(String),

    // ==========================================
    // 配置
    // ==========================================
    #[error(transparent)]
    Config(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::RowNotFound(row_id) => ApiError::RowNotFound(row_id),
        }
    }
}

impl ApiError {
    /// 错误代码（返回给前端）
    pub fn code(&self) -> String {
        match self {
            ApiError::Validation(e) => format!("VALIDATION_{}", e.kind.as_str()),
            ApiError::FormLocked => "FORM_LOCKED".to_string(),
            ApiError::RowNotFound(_) => "ROW_NOT_FOUND".to_string(),
            ApiError::Gateway(e) => format!("GATEWAY_{}", e.code()),
            ApiError::StaleResult { .. } => "STALE_RESULT".to_string(),
            ApiError::NoResult => "NO_RESULT".to_string(),
            ApiError::Export(_) => "EXPORT_ERROR".to_string(),
            ApiError::Config(_) => "CONFIG_ERROR".to_string(),
            ApiError::Other(_) => "OTHER_ERROR".to_string(),
        }
    }

    /// 用户可见消息（按当前语言）
    ///
    /// 求解服务返回的诊断信息原样嵌入,不翻译。
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(e) => {
                let kind = t(&format!("error.kind.{}", e.kind.as_str()));
                t_with_args(
                    "error.validation",
                    &[
                        ("kind", kind.as_str()),
                        ("field", e.field.as_str()),
                        ("message", e.message.as_str()),
                    ],
                )
            }
            ApiError::FormLocked => t("error.form_locked"),
            ApiError::RowNotFound(row_id) => {
                t_with_args("error.row_not_found", &[("row_id", row_id.to_string().as_str())])
            }
            ApiError::Gateway(GatewayError::AlreadyInFlight) => t("error.already_in_flight"),
            ApiError::Gateway(GatewayError::Network(message)) => {
                t_with_args("error.network", &[("message", message.as_str())])
            }
            ApiError::Gateway(GatewayError::Rejected { message, .. }) => {
                t_with_args("error.rejected", &[("message", message.as_str())])
            }
            ApiError::Gateway(GatewayError::MalformedResponse(message)) => {
                t_with_args("error.malformed_response", &[("message", message.as_str())])
            }
            ApiError::StaleResult { .. } => t("error.stale_result"),
            ApiError::NoResult => t("error.no_result"),
            ApiError::Export(message) => t_with_args("error.export", &[("message", message.as_str())]),
            ApiError::Config(e) => t_with_args("error.config", &[("message", e.to_string().as_str())]),
            ApiError::Other(e) => t_with_args("error.internal", &[("message", e.to_string().as_str())]),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::set_locale;
    use crate::i18n::tests::LOCALE_TEST_LOCK;

    #[test]
    fn test_codes() {
        let err: ApiError = ValidationError::missing_reference("demands[0].spec", "规格 S9 不存在").into();
        assert_eq!(err.code(), "VALIDATION_MISSING_REFERENCE");

        let err: ApiError = GatewayError::AlreadyInFlight.into();
        assert_eq!(err.code(), "GATEWAY_ALREADY_IN_FLIGHT");

        let err: ApiError = FormError::RowNotFound(RowId::new()).into();
        assert_eq!(err.code(), "ROW_NOT_FOUND");
    }

    #[test]
    fn test_rejected_message_is_verbatim() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("en");

        let err: ApiError = GatewayError::Rejected {
            status: 500,
            message: "Infeasible: machine M1 over capacity".to_string(),
        }
        .into();
        let msg = err.user_message();
        assert!(msg.contains("Infeasible: machine M1 over capacity"));

        set_locale("zh-CN");
    }

    #[test]
    fn test_validation_message_localized() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("zh-CN");

        let err: ApiError = ValidationError::empty_collection("machines").into();
        let msg = err.user_message();
        assert!(msg.contains("必填项为空"));
        assert!(msg.contains("machines"));
    }
}
