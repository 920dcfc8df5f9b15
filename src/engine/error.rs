// ==========================================
// 生产排程优化前端 - 引擎层错误类型
// ==========================================
// 职责: 请求构建校验错误、结果聚合错误
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 校验错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    /// 需求引用了不存在的客户/规格
    MissingReference,
    /// 名称重复（严格模式）
    DuplicateName,
    /// 数值越界、非有限值或空名称
    OutOfRange,
    /// 必填集合为空
    EmptyCollection,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ValidationErrorKind::MissingReference => "MISSING_REFERENCE",
            ValidationErrorKind::DuplicateName => "DUPLICATE_NAME",
            ValidationErrorKind::OutOfRange => "OUT_OF_RANGE",
            ValidationErrorKind::EmptyCollection => "EMPTY_COLLECTION",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 请求构建校验错误
///
/// 提交前的本地错误,不会发往网络；修改表单即可恢复。
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("参数校验失败[{kind}] {field}: {message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// 出错字段路径（如 demands[2].spec）
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_reference(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::MissingReference, field, message)
    }

    pub fn duplicate_name(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::DuplicateName, field, message)
    }

    pub fn out_of_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::OutOfRange, field, message)
    }

    pub fn empty_collection(field: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::EmptyCollection, field, "不能为空")
    }
}

/// 结果聚合错误
///
/// 对通过结构校验的结果不应出现；在网关边界归类为 MalformedResponse。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    #[error("数值非法: {field}={value}")]
    InvalidNumber { field: String, value: f64 },

    #[error("名称为空: {0}")]
    BlankName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::missing_reference("demands[0].spec", "规格 S9 不存在");
        let msg = err.to_string();
        assert!(msg.contains("MISSING_REFERENCE"));
        assert!(msg.contains("demands[0].spec"));
        assert!(msg.contains("S9"));
    }
}
