// ==========================================
// 生产排程优化前端 - 参数表单
// ==========================================
// 职责: 表单行的增删改,按合成行ID寻址
// 红线: 删除行不重排其他行,不按位置下标寻址
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::params::{
    Coefficients, CustomerRow, DemandRow, MachineRow, ScheduleParameters, SpecificationRow,
};
use crate::domain::types::RowId;

/// 表单错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("表单行不存在: row_id={0}")]
    RowNotFound(RowId),
}

/// 表单分区
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSection {
    Customers,
    Machines,
    Specifications,
    Demands,
}

// ==========================================
// ParameterForm - 参数表单
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ParameterForm {
    params: ScheduleParameters,
}

impl ParameterForm {
    /// 以已有参数创建表单
    pub fn new(params: ScheduleParameters) -> Self {
        Self { params }
    }

    /// 当前参数（只读）
    pub fn params(&self) -> &ScheduleParameters {
        &self.params
    }

    /// 提交快照
    pub fn snapshot(&self) -> ScheduleParameters {
        self.params.clone()
    }

    /// 整体替换（加载参考场景等）
    pub fn replace(&mut self, params: ScheduleParameters) {
        self.params = params;
    }

    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        self.params.coefficients = coefficients;
    }

    // ==========================================
    // 新增行
    // ==========================================

    pub fn add_customer(&mut self, name: impl Into<String>) -> RowId {
        let row_id = RowId::new();
        self.params.customers.push(CustomerRow {
            row_id,
            name: name.into(),
        });
        row_id
    }

    pub fn add_machine(&mut self, name: impl Into<String>, capacity_per_hour: f64) -> RowId {
        let row_id = RowId::new();
        self.params.machines.push(MachineRow {
            row_id,
            name: name.into(),
            capacity_per_hour,
        });
        row_id
    }

    pub fn add_specification(
        &mut self,
        name: impl Into<String>,
        priority: Option<u32>,
        loyal_demand: Option<f64>,
    ) -> RowId {
        let row_id = RowId::new();
        self.params.specifications.push(SpecificationRow {
            row_id,
            name: name.into(),
            priority,
            loyal_demand,
        });
        row_id
    }

    pub fn add_demand(
        &mut self,
        customer: impl Into<String>,
        spec: impl Into<String>,
        quantity: f64,
    ) -> RowId {
        let row_id = RowId::new();
        self.params.demands.push(DemandRow {
            row_id,
            customer: customer.into(),
            spec: spec.into(),
            quantity,
        });
        row_id
    }

    // ==========================================
    // 修改行
    // ==========================================

    /// 修改客户名称
    ///
    /// 引用旧名称的需求行同步改名。
    pub fn update_customer(&mut self, row_id: RowId, name: impl Into<String>) -> Result<(), FormError> {
        let name = name.into();
        let row = self
            .params
            .customers
            .iter_mut()
            .find(|r| r.row_id == row_id)
            .ok_or(FormError::RowNotFound(row_id))?;
        let old = std::mem::replace(&mut row.name, name.clone());

        for demand in self.params.demands.iter_mut().filter(|d| d.customer == old) {
            demand.customer = name.clone();
        }
        Ok(())
    }

    pub fn update_machine(
        &mut self,
        row_id: RowId,
        name: impl Into<String>,
        capacity_per_hour: f64,
    ) -> Result<(), FormError> {
        let row = self
            .params
            .machines
            .iter_mut()
            .find(|r| r.row_id == row_id)
            .ok_or(FormError::RowNotFound(row_id))?;
        row.name = name.into();
        row.capacity_per_hour = capacity_per_hour;
        Ok(())
    }

    /// 修改规格
    ///
    /// 引用旧名称的需求行同步改名。
    pub fn update_specification(
        &mut self,
        row_id: RowId,
        name: impl Into<String>,
        priority: Option<u32>,
        loyal_demand: Option<f64>,
    ) -> Result<(), FormError> {
        let name = name.into();
        let row = self
            .params
            .specifications
            .iter_mut()
            .find(|r| r.row_id == row_id)
            .ok_or(FormError::RowNotFound(row_id))?;
        let old = std::mem::replace(&mut row.name, name.clone());
        row.priority = priority;
        row.loyal_demand = loyal_demand;

        for demand in self.params.demands.iter_mut().filter(|d| d.spec == old) {
            demand.spec = name.clone();
        }
        Ok(())
    }

    pub fn update_demand(
        &mut self,
        row_id: RowId,
        customer: impl Into<String>,
        spec: impl Into<String>,
        quantity: f64,
    ) -> Result<(), FormError> {
        let row = self
            .params
            .demands
            .iter_mut()
            .find(|r| r.row_id == row_id)
            .ok_or(FormError::RowNotFound(row_id))?;
        row.customer = customer.into();
        row.spec = spec.into();
        row.quantity = quantity;
        Ok(())
    }

    // ==========================================
    // 删除行
    // ==========================================

    /// 按行ID删除,返回所在分区
    pub fn remove_row(&mut self, row_id: RowId) -> Result<FormSection, FormError> {
        if remove_by_id(&mut self.params.customers, row_id, |r| r.row_id) {
            return Ok(FormSection::Customers);
        }
        if remove_by_id(&mut self.params.machines, row_id, |r| r.row_id) {
            return Ok(FormSection::Machines);
        }
        if remove_by_id(&mut self.params.specifications, row_id, |r| r.row_id) {
            return Ok(FormSection::Specifications);
        }
        if remove_by_id(&mut self.params.demands, row_id, |r| r.row_id) {
            return Ok(FormSection::Demands);
        }
        Err(FormError::RowNotFound(row_id))
    }
}

fn remove_by_id<T>(rows: &mut Vec<T>, row_id: RowId, id_of: impl Fn(&T) -> RowId) -> bool {
    match rows.iter().position(|r| id_of(r) == row_id) {
        Some(index) => {
            rows.remove(index);
            true
        }
        None => false,
    }
}
