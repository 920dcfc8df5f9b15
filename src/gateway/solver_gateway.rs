// ==========================================
// 生产排程优化前端 - 求解网关
// ==========================================
// 职责: 持有唯一在途求解请求,提交 → 等待一次响应 → 报告成败
// 状态机: Idle → Submitting → {Succeeded | Failed} → Idle
// ==========================================
// 红线: 在途期间新提交立即拒绝（AlreadyInFlight）,不排队
// 红线: 不自动重试,失败后回到 Idle 由用户重新提交
// 红线: 提交槽在所有出口释放（成功/失败/传输层 panic/调用方放弃 future）
// ==========================================

use chrono::{DateTime, Utc};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::request::SolveRequest;
use crate::domain::response::SolveResponse;
use crate::domain::types::SubmissionState;
use crate::engine::result_aggregator::ResultAggregator;
use crate::gateway::error::GatewayError;
use crate::gateway::observer::{NoOpObserver, SubmissionObserver};
use crate::gateway::transport::{SolverTransport, TransportResponse};

/// 一次已结束的提交（带序号）
#[derive(Debug, Clone)]
pub struct Submission {
    /// 提交序号（单调递增）
    pub seq: u64,
    pub submitted_at: DateTime<Utc>,
    pub settled_at: DateTime<Utc>,
    pub result: Result<SolveResponse, GatewayError>,
}

impl Submission {
    /// 往返耗时（毫秒）
    pub fn elapsed_ms(&self) -> i64 {
        (self.settled_at - self.submitted_at).num_milliseconds()
    }
}

/// 独占提交槽
#[derive(Debug)]
struct Slot {
    state: SubmissionState,
    /// 最近发出的序号
    last_issued: u64,
    /// 序号 <= 该值的提交已被放弃
    abandoned_through: u64,
}

// ==========================================
// SolverGateway - 求解网关
// ==========================================
pub struct SolverGateway {
    transport: Arc<dyn SolverTransport>,
    observer: Arc<dyn SubmissionObserver>,
    aggregator: ResultAggregator,
    slot: Mutex<Slot>,
}

impl SolverGateway {
    /// 创建网关（不通知展示层）
    pub fn new(transport: Arc<dyn SolverTransport>) -> Self {
        Self {
            transport,
            observer: Arc::new(NoOpObserver),
            aggregator: ResultAggregator::new(),
            slot: Mutex::new(Slot {
                state: SubmissionState::Idle,
                last_issued: 0,
                abandoned_through: 0,
            }),
        }
    }

    /// 设置状态观察者
    pub fn with_observer(mut self, observer: Arc<dyn SubmissionObserver>) -> Self {
        self.observer = observer;
        self
    }

    // ==========================================
    // 状态查询
    // ==========================================

    pub fn state(&self) -> SubmissionState {
        self.lock_slot().state
    }

    pub fn last_issued_seq(&self) -> u64 {
        self.lock_slot().last_issued
    }

    /// 序号是否仍是最新且未被放弃的提交
    ///
    /// 展示层只处理 is_current 为 true 的结果。
    pub fn is_current(&self, seq: u64) -> bool {
        let slot = self.lock_slot();
        seq == slot.last_issued && seq > slot.abandoned_through
    }

    /// 放弃在途提交（如页面离开、重置）
    ///
    /// 在途请求仍会在内部结束并释放提交槽,但其结果不再是 current。
    /// 返回被放弃的序号。
    pub fn abandon(&self) -> Option<u64> {
        let mut slot = self.lock_slot();
        match slot.state {
            SubmissionState::Submitting { seq } => {
                slot.abandoned_through = seq;
                tracing::info!("放弃在途提交 #{}", seq);
                Some(seq)
            }
            _ => {
                slot.abandoned_through = slot.last_issued;
                None
            }
        }
    }

    // ==========================================
    // 提交
    // ==========================================

    /// 提交求解请求并等待响应
    pub async fn submit(&self, request: &SolveRequest) -> Result<SolveResponse, GatewayError> {
        self.submit_tagged(request).await?.result
    }

    /// 提交求解请求,返回带序号的结果
    ///
    /// # 返回
    /// - Err(AlreadyInFlight): 已有在途提交,本次未发出
    /// - Ok(Submission): 本次提交已结束,结果见 `result`
    pub async fn submit_tagged(&self, request: &SolveRequest) -> Result<Submission, GatewayError> {
        let guard = self.acquire()?;
        let seq = guard.seq;
        let submitted_at = Utc::now();

        tracing::info!(
            "提交求解请求 #{}: machines={}, demands={}",
            seq,
            request.machines.len(),
            request.demands.len()
        );

        let outcome = AssertUnwindSafe(self.transport.post(request))
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(Ok(raw)) => self.interpret(raw),
            Ok(Err(e)) => Err(GatewayError::Network(e.to_string())),
            Err(_) => Err(GatewayError::Network("传输层异常终止".to_string())),
        };

        let settled_at = Utc::now();
        match &result {
            Ok(response) => tracing::info!(
                "求解请求 #{} 成功: status={}, rows={}, elapsed_ms={}",
                seq,
                response.status,
                response.schedule.len(),
                (settled_at - submitted_at).num_milliseconds()
            ),
            Err(e) => tracing::warn!("求解请求 #{} 失败: {}", seq, e),
        }

        guard.settle(result.is_ok());

        Ok(Submission {
            seq,
            submitted_at,
            settled_at,
            result,
        })
    }

    // ==========================================
    // 内部实现
    // ==========================================

    /// 获取独占提交槽
    fn acquire(&self) -> Result<SlotGuard<'_>, GatewayError> {
        let seq = {
            let mut slot = self.lock_slot();
            if slot.state.is_in_flight() {
                tracing::warn!("拒绝提交: 已有在途请求 {}", slot.state);
                return Err(GatewayError::AlreadyInFlight);
            }
            slot.last_issued += 1;
            let seq = slot.last_issued;
            slot.state = SubmissionState::Submitting { seq };
            seq
        };

        self.observer
            .on_state_changed(SubmissionState::Submitting { seq });

        Ok(SlotGuard {
            gateway: self,
            seq,
            settled: false,
        })
    }

    /// 结束提交: 终态与回到 Idle 在同一临界区内完成
    fn finish(&self, seq: u64, ok: bool) {
        let terminal = if ok {
            SubmissionState::Succeeded { seq }
        } else {
            SubmissionState::Failed { seq }
        };

        {
            let mut slot = self.lock_slot();
            slot.state = SubmissionState::Idle;
        }

        self.observer.on_state_changed(terminal);
        self.observer.on_state_changed(SubmissionState::Idle);
    }

    /// 解释原始响应
    fn interpret(&self, raw: TransportResponse) -> Result<SolveResponse, GatewayError> {
        if !raw.is_success() {
            return Err(GatewayError::Rejected {
                status: raw.status,
                message: rejection_message(&raw),
            });
        }

        let response: SolveResponse = serde_json::from_str(&raw.body)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        self.aggregator.check(&response)?;

        Ok(response)
    }

    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        // 临界区内无 panic 路径,中毒时沿用内部状态
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// 提取非成功响应的诊断信息
///
/// 优先取 JSON 的 `detail` 字段（字符串原样返回）,否则返回原始响应体。
fn rejection_message(raw: &TransportResponse) -> String {
    let body = raw.body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }

    if body.is_empty() {
        format!("HTTP {}", raw.status)
    } else {
        body.to_string()
    }
}

// ==========================================
// SlotGuard - 提交槽守卫
// ==========================================
struct SlotGuard<'a> {
    gateway: &'a SolverGateway,
    seq: u64,
    settled: bool,
}

impl SlotGuard<'_> {
    fn settle(mut self, ok: bool) {
        self.settled = true;
        self.gateway.finish(self.seq, ok);
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("提交 #{} 未正常结束（已取消）,释放提交槽", self.seq);
            self.gateway.finish(self.seq, false);
        }
    }
}
