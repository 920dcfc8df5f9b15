// ==========================================
// 生产排程优化前端 - 求解请求（线格式）
// ==========================================
// 职责: 求解服务期望的规整请求结构
// 字段名与求解服务接口一一对应,不得随意改名
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::params::{
    Coefficients, CustomerRow, DemandRow, MachineRow, ScheduleParameters, SpecificationRow,
};
use crate::domain::types::RowId;

/// 需求记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRecord {
    pub customer: String,
    pub spec: String,
    pub quantity: f64,
}

/// 求解请求
///
/// 名称列表按首次出现顺序去重；映射按名称唯一,后写覆盖先写。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub customers: Vec<String>,
    pub machines: Vec<String>,
    pub specifications: Vec<String>,
    pub demands: Vec<DemandRecord>,
    pub machine_capacity_per_hour: BTreeMap<String, f64>,
    pub cleaning_time: f64,
    pub hours_per_day: u32,
    pub changeover_cost: f64,
    pub min_run_time: f64,
    pub shift_start_hour: u32,
    pub shift_end_hour: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification_priority: Option<BTreeMap<String, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyal_demand: Option<BTreeMap<String, f64>>,
}

impl SolveRequest {
    /// 机组产能（按名称）
    pub fn capacity_of(&self, machine: &str) -> Option<f64> {
        self.machine_capacity_per_hour.get(machine).copied()
    }

    /// 还原为表单参数
    ///
    /// 下游消费的字段全部保留；行标识重新生成。
    pub fn to_parameters(&self) -> ScheduleParameters {
        let customers = self
            .customers
            .iter()
            .map(|name| CustomerRow {
                row_id: RowId::new(),
                name: name.clone(),
            })
            .collect();

        let machines = self
            .machines
            .iter()
            .map(|name| MachineRow {
                row_id: RowId::new(),
                name: name.clone(),
                capacity_per_hour: self.capacity_of(name).unwrap_or(0.0),
            })
            .collect();

        let specifications = self
            .specifications
            .iter()
            .map(|name| SpecificationRow {
                row_id: RowId::new(),
                name: name.clone(),
                priority: self
                    .specification_priority
                    .as_ref()
                    .and_then(|m| m.get(name).copied()),
                loyal_demand: self.loyal_demand.as_ref().and_then(|m| m.get(name).copied()),
            })
            .collect();

        let demands = self
            .demands
            .iter()
            .map(|d| DemandRow {
                row_id: RowId::new(),
                customer: d.customer.clone(),
                spec: d.spec.clone(),
                quantity: d.quantity,
            })
            .collect();

        ScheduleParameters {
            customers,
            machines,
            specifications,
            demands,
            coefficients: Coefficients {
                cleaning_time: self.cleaning_time,
                changeover_cost: self.changeover_cost,
                min_run_time: self.min_run_time,
                hours_per_day: self.hours_per_day,
                shift_start_hour: self.shift_start_hour,
                shift_end_hour: self.shift_end_hour,
            },
        }
    }
}
