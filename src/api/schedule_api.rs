// ==========================================
// 生产排程优化前端 - 排程 API
// ==========================================
// 职责: 表单 → 请求构建 → 求解网关 → 结果聚合 的流水线门面
// 红线: 求解在途期间表单只读
// 红线: 仅 current 序号的结果写入视图,过期结果丢弃
// ==========================================

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::error::{ApiError, ApiResult};
use crate::config::SolverConfigReader;
use crate::domain::form::{FormSection, ParameterForm};
use crate::domain::params::{Coefficients, ScheduleParameters};
use crate::domain::request::SolveRequest;
use crate::domain::response::SolveResponse;
use crate::domain::types::{RowId, SubmissionState};
use crate::domain::view::{AggregateView, ChangeoverWindow, DemandFulfillment};
use crate::engine::{RequestBuilder, ResultAggregator};
use crate::gateway::{HttpSolverTransport, SolverGateway, SubmissionObserver};

/// 明细导出表头
pub const DETAILS_CSV_HEADER: [&str; 7] = [
    "customer",
    "machine",
    "hour",
    "spec",
    "quantity",
    "buffer_time",
    "emergency",
];

/// 最近一次成功结果
#[derive(Debug, Clone)]
pub struct LatestResult {
    pub seq: u64,
    pub request: SolveRequest,
    pub response: SolveResponse,
    pub view: Arc<AggregateView>,
    pub received_at: DateTime<Utc>,
}

// ==========================================
// ScheduleApi - 排程 API
// ==========================================
pub struct ScheduleApi {
    form: Mutex<ParameterForm>,
    builder: RequestBuilder,
    gateway: SolverGateway,
    aggregator: ResultAggregator,
    latest: Mutex<Option<LatestResult>>,
}

impl ScheduleApi {
    /// 以已装配的网关创建 API（空表单）
    pub fn new(gateway: SolverGateway, builder: RequestBuilder) -> Self {
        Self::with_form(gateway, builder, ParameterForm::default())
    }

    pub fn with_form(gateway: SolverGateway, builder: RequestBuilder, form: ParameterForm) -> Self {
        Self {
            form: Mutex::new(form),
            builder,
            gateway,
            aggregator: ResultAggregator::new(),
            latest: Mutex::new(None),
        }
    }

    /// 按配置装配: HTTP 传输 → 网关 → 构建器
    pub async fn from_config(
        config: &dyn SolverConfigReader,
        observer: Arc<dyn SubmissionObserver>,
    ) -> ApiResult<Self> {
        let endpoint = config.get_solver_endpoint().await?;
        let timeout = config.get_request_timeout().await?;
        let strict = config.get_strict_unique_names().await?;
        let hours_per_day = config.get_default_hours_per_day().await?;

        let transport = HttpSolverTransport::new(&endpoint, timeout)
            .map_err(|e| ApiError::Other(anyhow::Error::new(e)))?;

        tracing::info!(
            "装配排程API: endpoint={}, timeout_secs={}, strict_unique_names={}",
            transport.endpoint(),
            timeout.as_secs(),
            strict
        );

        let gateway = SolverGateway::new(Arc::new(transport)).with_observer(observer);
        let builder = RequestBuilder::new().with_strict_unique_names(strict);

        let coefficients = Coefficients {
            hours_per_day,
            shift_end_hour: hours_per_day,
            ..Coefficients::default()
        };
        let form = ParameterForm::new(ScheduleParameters {
            coefficients,
            ..ScheduleParameters::default()
        });

        Ok(Self::with_form(gateway, builder, form))
    }

    // ==========================================
    // 提交
    // ==========================================

    /// 提交当前表单并返回聚合视图
    ///
    /// # 返回
    /// - Ok(view): 结果已写入最新视图
    /// - Err(Validation): 表单校验失败,未发出请求
    /// - Err(Gateway): 在途/网络/被拒/格式错误
    /// - Err(StaleResult): 等待期间已重置或放弃
    pub async fn submit(&self) -> ApiResult<Arc<AggregateView>> {
        let params = self.lock_form().snapshot();
        let request = self.builder.build(&params)?;

        let submission = self.gateway.submit_tagged(&request).await?;
        let seq = submission.seq;
        let elapsed_ms = submission.elapsed_ms();

        // is_current 判定与写入在同一把锁内,与 reset 互斥
        let mut latest = self.lock_latest();
        if !self.gateway.is_current(seq) {
            tracing::warn!("丢弃过期结果 #{}", seq);
            return Err(ApiError::StaleResult { seq });
        }

        let response = submission.result?;
        let view = Arc::new(self.aggregator.aggregate(&response));

        tracing::info!(
            "求解结果 #{} 已更新视图: rows={}, total_quantity={}, elapsed_ms={}",
            seq,
            view.summary.schedule_rows,
            view.summary.total_quantity,
            elapsed_ms
        );

        *latest = Some(LatestResult {
            seq,
            request,
            response,
            view: view.clone(),
            received_at: submission.settled_at,
        });

        Ok(view)
    }

    /// 预览请求（仅构建,不发网络）
    pub fn preview_request(&self) -> ApiResult<SolveRequest> {
        let params = self.lock_form().snapshot();
        Ok(self.builder.build(&params)?)
    }

    // ==========================================
    // 结果与状态
    // ==========================================

    pub fn latest_view(&self) -> Option<Arc<AggregateView>> {
        self.lock_latest().as_ref().map(|l| l.view.clone())
    }

    pub fn latest_result(&self) -> Option<LatestResult> {
        self.lock_latest().clone()
    }

    /// 清空结果,并放弃在途提交
    pub fn reset(&self) {
        let mut latest = self.lock_latest();
        *latest = None;
        let abandoned = self.gateway.abandon();
        tracing::info!("结果已重置: abandoned={:?}", abandoned);
    }

    /// 仅放弃在途提交（保留已有结果）
    pub fn abandon_submission(&self) -> Option<u64> {
        self.gateway.abandon()
    }

    pub fn gateway_state(&self) -> SubmissionState {
        self.gateway.state()
    }

    /// 表单是否可编辑（无在途提交）
    pub fn is_form_interactive(&self) -> bool {
        !self.gateway.state().is_in_flight()
    }

    // ==========================================
    // 表单编辑
    // ==========================================

    pub fn form_params(&self) -> ScheduleParameters {
        self.lock_form().snapshot()
    }

    pub fn load_demo_form(&self) -> ApiResult<ScheduleParameters> {
        self.edit_form(|form| {
            form.replace(ScheduleParameters::demo());
            Ok(form.snapshot())
        })
    }

    pub fn replace_form(&self, params: ScheduleParameters) -> ApiResult<()> {
        self.edit_form(|form| {
            form.replace(params);
            Ok(())
        })
    }

    pub fn set_coefficients(&self, coefficients: Coefficients) -> ApiResult<()> {
        self.edit_form(|form| {
            form.set_coefficients(coefficients);
            Ok(())
        })
    }

    pub fn add_customer(&self, name: &str) -> ApiResult<RowId> {
        self.edit_form(|form| Ok(form.add_customer(name)))
    }

    pub fn add_machine(&self, name: &str, capacity_per_hour: f64) -> ApiResult<RowId> {
        self.edit_form(|form| Ok(form.add_machine(name, capacity_per_hour)))
    }

    pub fn add_specification(
        &self,
        name: &str,
        priority: Option<u32>,
        loyal_demand: Option<f64>,
    ) -> ApiResult<RowId> {
        self.edit_form(|form| Ok(form.add_specification(name, priority, loyal_demand)))
    }

    pub fn add_demand(&self, customer: &str, spec: &str, quantity: f64) -> ApiResult<RowId> {
        self.edit_form(|form| Ok(form.add_demand(customer, spec, quantity)))
    }

    pub fn update_customer(&self, row_id: RowId, name: &str) -> ApiResult<()> {
        self.edit_form(|form| Ok(form.update_customer(row_id, name)?))
    }

    pub fn update_machine(&self, row_id: RowId, name: &str, capacity_per_hour: f64) -> ApiResult<()> {
        self.edit_form(|form| Ok(form.update_machine(row_id, name, capacity_per_hour)?))
    }

    pub fn update_specification(
        &self,
        row_id: RowId,
        name: &str,
        priority: Option<u32>,
        loyal_demand: Option<f64>,
    ) -> ApiResult<()> {
        self.edit_form(|form| Ok(form.update_specification(row_id, name, priority, loyal_demand)?))
    }

    pub fn update_demand(
        &self,
        row_id: RowId,
        customer: &str,
        spec: &str,
        quantity: f64,
    ) -> ApiResult<()> {
        self.edit_form(|form| Ok(form.update_demand(row_id, customer, spec, quantity)?))
    }

    pub fn remove_row(&self, row_id: RowId) -> ApiResult<FormSection> {
        self.edit_form(|form| Ok(form.remove_row(row_id)?))
    }

    // ==========================================
    // 导出与补充视图
    // ==========================================

    /// 明细表导出为 CSV
    pub fn export_details_csv(&self) -> ApiResult<String> {
        let view = self.latest_view().ok_or(ApiError::NoResult)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(DETAILS_CSV_HEADER)
            .map_err(|e| ApiError::Export(e.to_string()))?;

        for row in &view.details {
            writer
                .write_record([
                    row.customer.clone(),
                    row.machine.clone(),
                    row.hour.to_string(),
                    row.spec.clone(),
                    row.quantity.to_string(),
                    row.buffer_time.to_string(),
                    row.emergency.to_string(),
                ])
                .map_err(|e| ApiError::Export(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ApiError::Export(e.to_string()))?;
        let csv = String::from_utf8(bytes).map_err(|e| ApiError::Export(e.to_string()))?;

        tracing::info!("导出明细: rows={}", view.details.len());
        Ok(csv)
    }

    pub fn changeover_windows(&self) -> ApiResult<Vec<ChangeoverWindow>> {
        let latest = self.lock_latest();
        let latest = latest.as_ref().ok_or(ApiError::NoResult)?;
        Ok(self
            .aggregator
            .changeover_windows(&latest.response, &latest.request))
    }

    pub fn fulfillment(&self) -> ApiResult<Vec<DemandFulfillment>> {
        let latest = self.lock_latest();
        let latest = latest.as_ref().ok_or(ApiError::NoResult)?;
        Ok(self.aggregator.fulfillment(&latest.request, &latest.response))
    }

    // ==========================================
    // 内部实现
    // ==========================================

    fn edit_form<T>(&self, edit: impl FnOnce(&mut ParameterForm) -> ApiResult<T>) -> ApiResult<T> {
        if !self.is_form_interactive() {
            tracing::warn!("表单已锁定,拒绝编辑: {}", self.gateway.state());
            return Err(ApiError::FormLocked);
        }
        let mut form = self.lock_form();
        edit(&mut form)
    }

    fn lock_form(&self) -> MutexGuard<'_, ParameterForm> {
        self.form.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_latest(&self) -> MutexGuard<'_, Option<LatestResult>> {
        self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }
}
