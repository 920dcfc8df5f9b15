// ==========================================
// 生产排程优化前端 - 领域类型定义
// ==========================================
// 职责: 跨层共享的小型枚举与标识类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==========================================
// 表单行标识 (Row Id)
// ==========================================
// 红线: 行编辑按合成ID寻址,不按位置下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub Uuid);

impl RowId {
    /// 生成新的行标识
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 从字符串解析（前端传入）
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// 提交状态 (Submission State)
// ==========================================
// 状态机: Idle → Submitting → {Succeeded | Failed} → Idle
// 序列化格式: SCREAMING_SNAKE_CASE (与前端事件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionState {
    Idle,                       // 空闲,表单可编辑
    Submitting { seq: u64 },    // 求解中,表单锁定
    Succeeded { seq: u64 },     // 求解成功（瞬态）
    Failed { seq: u64 },        // 求解失败（瞬态）
}

impl SubmissionState {
    /// 是否持有独占提交槽
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            SubmissionState::Idle => "IDLE",
            SubmissionState::Submitting { .. } => "SUBMITTING",
            SubmissionState::Succeeded { .. } => "SUCCEEDED",
            SubmissionState::Failed { .. } => "FAILED",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionState::Idle => write!(f, "IDLE"),
            SubmissionState::Submitting { seq } => write!(f, "SUBMITTING#{}", seq),
            SubmissionState::Succeeded { seq } => write!(f, "SUCCEEDED#{}", seq),
            SubmissionState::Failed { seq } => write!(f, "FAILED#{}", seq),
        }
    }
}
