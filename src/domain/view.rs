// ==========================================
// 生产排程优化前端 - 聚合视图
// ==========================================
// 职责: 图表/表格消费的派生视图（不持久化）
// 红线: 字段形状即渲染层契约,视图代码不得改名/改形
// 生命周期: 每次新结果重新计算,重置即丢弃
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::response::ChangeoverEvent;

/// 结果摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub objective_value: f64,
    pub computation_time: f64,
    pub status: String,
    pub total_quantity: f64,
    pub schedule_rows: usize,
    pub changeover_count: usize,
}

/// 按时段汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotal {
    pub hour: u32,
    pub quantity: f64,
}

/// 按机组汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineTotal {
    pub machine: String,
    pub quantity: f64,
}

/// 机组缓冲时间汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineBufferTime {
    pub machine: String,
    pub time: f64,
}

/// 规格紧急订单计数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecEmergencyCount {
    pub spec: String,
    pub count: usize,
}

/// 机组换产计数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineChangeoverCount {
    pub machine: String,
    pub count: usize,
}

/// 明细行（排程条目 + 旁路标注）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub customer: String,
    pub machine: String,
    pub hour: u32,
    pub spec: String,
    pub quantity: f64,
    /// 匹配的缓冲时间,无匹配为 0
    pub buffer_time: f64,
    /// 是否命中紧急订单
    pub emergency: bool,
}

/// 聚合视图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateView {
    pub summary: ResultSummary,
    pub period_totals: Vec<PeriodTotal>,
    pub machine_totals: Vec<MachineTotal>,
    pub buffer_time_by_machine: Vec<MachineBufferTime>,
    pub emergency_count_by_spec: Vec<SpecEmergencyCount>,
    pub details: Vec<DetailRow>,
    pub changeovers: Vec<ChangeoverEvent>,
    pub changeover_count_by_machine: Vec<MachineChangeoverCount>,
}

// ==========================================
// 补充视图
// ==========================================

/// 换产后的清洗窗口
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeoverWindow {
    pub machine: String,
    pub hour: u32,
    pub from_spec: String,
    pub to_spec: String,
    pub cleaning_start_hour: u32,
    pub cleaning_end_hour: u32,
}

/// 需求满足情况
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandFulfillment {
    pub customer: String,
    pub spec: String,
    pub demanded: f64,
    pub scheduled: f64,
    pub shortfall: f64,
    pub fulfilled: bool,
}
