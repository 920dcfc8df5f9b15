// ==========================================
// 生产排程优化前端 - 前端事件观察者
// ==========================================
// 职责: 求解状态变化推送到前端（进度遮罩、表单锁定）
// 事件: submission-state
// ==========================================

#![cfg(feature = "tauri-app")]

use tauri::Manager;

use crate::domain::types::SubmissionState;
use crate::gateway::SubmissionObserver;

/// 求解状态事件名
pub const SUBMISSION_STATE_EVENT: &str = "submission-state";

pub struct TauriSubmissionObserver {
    app: tauri::AppHandle,
}

impl TauriSubmissionObserver {
    pub fn new(app: tauri::AppHandle) -> Self {
        Self { app }
    }
}

impl SubmissionObserver for TauriSubmissionObserver {
    fn on_state_changed(&self, state: SubmissionState) {
        // 推送失败不影响求解流程
        if let Err(e) = self.app.emit_all(SUBMISSION_STATE_EVENT, state) {
            tracing::warn!("推送求解状态失败: state={}, error={}", state, e);
        }
    }
}
