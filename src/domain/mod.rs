// ==========================================
// 生产排程优化前端 - 领域模型层
// ==========================================
// 职责: 表单参数、请求/结果线格式、聚合视图
// 红线: 不含网络访问,不含聚合逻辑
// ==========================================

pub mod form;
pub mod params;
pub mod request;
pub mod response;
pub mod types;
pub mod view;

// 重导出核心类型
pub use form::{FormError, FormSection, ParameterForm};
pub use params::{
    Coefficients, CustomerRow, DemandRow, MachineRow, ScheduleParameters, SpecificationRow,
};
pub use request::{DemandRecord, SolveRequest};
pub use response::{
    BufferTimeEntry, ChangeoverEvent, EmergencyOrderEntry, ScheduleEntry, SolveResponse,
};
pub use types::{RowId, SubmissionState};
pub use view::{
    AggregateView, ChangeoverWindow, DemandFulfillment, DetailRow, MachineBufferTime,
    MachineChangeoverCount, MachineTotal, PeriodTotal, ResultSummary, SpecEmergencyCount,
};
