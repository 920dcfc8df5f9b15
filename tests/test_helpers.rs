// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 内存求解传输、样例参数与样例响应
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use production_schedule_console::domain::form::ParameterForm;
use production_schedule_console::domain::params::ScheduleParameters;
use production_schedule_console::domain::request::SolveRequest;
use production_schedule_console::engine::RequestBuilder;
use production_schedule_console::gateway::{SolverTransport, TransportError, TransportResponse};

// ==========================================
// 内存传输
// ==========================================

/// 固定响应传输（记录调用次数与最近一次请求）
pub struct ScriptedTransport {
    response: Result<TransportResponse, TransportError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<SolveRequest>>,
}

impl ScriptedTransport {
    pub fn ok(body: impl Into<String>) -> Arc<Self> {
        Self::with(Ok(TransportResponse::new(200, body)))
    }

    pub fn with(response: Result<TransportResponse, TransportError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SolveRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl SolverTransport for ScriptedTransport {
    async fn post(&self, request: &SolveRequest) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.response.clone()
    }
}

/// 闸门传输: 直到测试放行才返回响应（只能使用一次）
pub struct GatedTransport {
    gate: Mutex<Option<oneshot::Receiver<TransportResponse>>>,
}

impl GatedTransport {
    pub fn new() -> (Arc<Self>, oneshot::Sender<TransportResponse>) {
        let (tx, rx) = oneshot::channel();
        let transport = Arc::new(Self {
            gate: Mutex::new(Some(rx)),
        });
        (transport, tx)
    }
}

#[async_trait]
impl SolverTransport for GatedTransport {
    async fn post(&self, _request: &SolveRequest) -> Result<TransportResponse, TransportError> {
        let gate = self.gate.lock().unwrap().take();
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| TransportError::Other("gate dropped".to_string())),
            None => Err(TransportError::Other("gate already used".to_string())),
        }
    }
}

// ==========================================
// 样例数据
// ==========================================

/// 两台机组、单规格、单需求的场景参数
pub fn two_machine_params() -> ScheduleParameters {
    let mut form = ParameterForm::default();
    form.add_customer("A");
    form.add_machine("M1", 7.0);
    form.add_machine("M2", 6.5);
    form.add_specification("S1", None, None);
    form.add_demand("A", "S1", 50.0);
    form.snapshot()
}

pub fn demo_request() -> SolveRequest {
    RequestBuilder::new()
        .build(&ScheduleParameters::demo())
        .unwrap()
}

/// 两台机组场景的求解结果
pub const TWO_MACHINE_BODY: &str = r#"{
    "objective_value": 125.5,
    "computation_time": 0.42,
    "status": "Optimal",
    "schedule": [
        {"customer": "A", "machine": "M1", "hour": 0, "quantity": 20.0, "spec": "S1"},
        {"customer": "A", "machine": "M1", "hour": 1, "quantity": 30.0, "spec": "S1"}
    ],
    "changeovers": []
}"#;

/// 参考场景的求解结果（含换产、缓冲、紧急订单）
pub const DEMO_BODY: &str = r#"{
    "objective_value": 312.0,
    "computation_time": 1.25,
    "status": "Optimal",
    "schedule": [
        {"customer": "A", "machine": "M1", "hour": 0, "quantity": 7.0, "spec": "Spec1"},
        {"customer": "B", "machine": "M2", "hour": 0, "quantity": 6.5, "spec": "Spec2"},
        {"customer": "A", "machine": "M1", "hour": 1, "quantity": 7.0, "spec": "Spec1"},
        {"customer": "C", "machine": "M2", "hour": 1, "quantity": 6.5, "spec": "Spec2"},
        {"customer": "B", "machine": "M1", "hour": 5, "quantity": 7.0, "spec": "Spec2"}
    ],
    "changeovers": [
        {"machine": "M1", "hour": 2, "from_spec": "Spec1", "to_spec": "Spec2"}
    ],
    "buffer_times": [
        {"machine": "M1", "hour": 1, "spec": "Spec1", "time": 0.5}
    ],
    "emergency_orders": [
        {"machine": "M2", "hour": 0, "spec": "Spec2"}
    ]
}"#;
