// ==========================================
// 生产排程优化前端 - 提交状态观察者
// ==========================================
// 职责: 网关状态变化通知展示层（进度遮罩、表单锁定）
// 说明: 网关定义 trait,应用层实现适配器（如 Tauri 事件）
// ==========================================

use std::sync::{Arc, Mutex};

use crate::domain::types::SubmissionState;

/// 提交状态观察者 Trait
///
/// # 实现说明
/// - 回调在网关释放内部锁之后调用,可安全地读取网关状态
/// - 回调不得阻塞
pub trait SubmissionObserver: Send + Sync {
    fn on_state_changed(&self, state: SubmissionState);
}

/// 空操作观察者
#[derive(Debug, Clone, Default)]
pub struct NoOpObserver;

impl SubmissionObserver for NoOpObserver {
    fn on_state_changed(&self, state: SubmissionState) {
        tracing::debug!("NoOpObserver: 跳过状态通知 - {}", state);
    }
}

/// 记录型观察者（保存全部状态变化,便于审计与测试）
#[derive(Debug, Default)]
pub struct RecordingObserver {
    states: Mutex<Vec<SubmissionState>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 已记录的状态序列
    pub fn states(&self) -> Vec<SubmissionState> {
        self.states
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl SubmissionObserver for RecordingObserver {
    fn on_state_changed(&self, state: SubmissionState) {
        if let Ok(mut states) = self.states.lock() {
            states.push(state);
        }
    }
}
