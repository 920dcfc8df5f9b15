// ==========================================
// 生产排程优化前端 - 排程参数（表单状态）
// ==========================================
// 职责: 用户编辑中的排程参数,非规整结构
// 归属: 提交前由表单独占
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::RowId;

// ==========================================
// 表单行
// ==========================================

/// 客户行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRow {
    pub row_id: RowId,
    pub name: String,
}

/// 机组行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineRow {
    pub row_id: RowId,
    pub name: String,
    /// 每小时产能
    pub capacity_per_hour: f64,
}

/// 规格行
///
/// `priority` / `loyal_demand` 来自另一套参数结构（按规格的优先级与长协需求）,
/// 统一到同一结构中作为可选字段；未填写时不下发给求解服务。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationRow {
    pub row_id: RowId,
    pub name: String,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub loyal_demand: Option<f64>,
}

/// 需求行（客户 × 规格 × 数量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRow {
    pub row_id: RowId,
    pub customer: String,
    pub spec: String,
    pub quantity: f64,
}

// ==========================================
// 成本/时间系数
// ==========================================

/// 成本与时间系数
///
/// # 默认值
/// - cleaning_time: 2.5（小时）
/// - changeover_cost: 100.0
/// - min_run_time: 2.0（小时）
/// - hours_per_day: 24
/// - shift_start_hour / shift_end_hour: 0 / 24
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub cleaning_time: f64,
    pub changeover_cost: f64,
    pub min_run_time: f64,
    pub hours_per_day: u32,
    pub shift_start_hour: u32,
    pub shift_end_hour: u32,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            cleaning_time: 2.5,
            changeover_cost: 100.0,
            min_run_time: 2.0,
            hours_per_day: 24,
            shift_start_hour: 0,
            shift_end_hour: 24,
        }
    }
}

// ==========================================
// ScheduleParameters - 排程参数
// ==========================================

/// 排程参数（表单持有的完整输入）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleParameters {
    pub customers: Vec<CustomerRow>,
    pub machines: Vec<MachineRow>,
    pub specifications: Vec<SpecificationRow>,
    pub demands: Vec<DemandRow>,
    #[serde(default)]
    pub coefficients: Coefficients,
}

impl ScheduleParameters {
    /// 参考场景: 3个客户、2台机组、2个规格
    pub fn demo() -> Self {
        let customers = ["A", "B", "C"]
            .iter()
            .map(|name| CustomerRow {
                row_id: RowId::new(),
                name: name.to_string(),
            })
            .collect();

        let machines = [("M1", 7.0), ("M2", 6.5)]
            .iter()
            .map(|(name, capacity)| MachineRow {
                row_id: RowId::new(),
                name: name.to_string(),
                capacity_per_hour: *capacity,
            })
            .collect();

        let specifications = ["Spec1", "Spec2"]
            .iter()
            .map(|name| SpecificationRow {
                row_id: RowId::new(),
                name: name.to_string(),
                priority: None,
                loyal_demand: None,
            })
            .collect();

        let demands = [("A", "Spec1", 50.0), ("B", "Spec2", 100.0), ("C", "Spec2", 100.0)]
            .iter()
            .map(|(customer, spec, quantity)| DemandRow {
                row_id: RowId::new(),
                customer: customer.to_string(),
                spec: spec.to_string(),
                quantity: *quantity,
            })
            .collect();

        Self {
            customers,
            machines,
            specifications,
            demands,
            coefficients: Coefficients {
                cleaning_time: 3.0,
                ..Coefficients::default()
            },
        }
    }

    /// 所有行的数量（用于日志）
    pub fn row_count(&self) -> usize {
        self.customers.len() + self.machines.len() + self.specifications.len() + self.demands.len()
    }
}
