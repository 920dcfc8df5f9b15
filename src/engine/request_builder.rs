// ==========================================
// 生产排程优化前端 - 请求构建器
// ==========================================
// 职责: 表单参数 → 求解请求（规整映射、扁平集合）
// 输入: ScheduleParameters（只读借用,不修改）
// 输出: SolveRequest 或 ValidationError
// ==========================================
// 红线: 纯函数,无网络/存储副作用
// ==========================================

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::params::{Coefficients, ScheduleParameters};
use crate::domain::request::{DemandRecord, SolveRequest};
use crate::engine::error::ValidationError;

/// 每日小时数上限
pub const MAX_HOURS_PER_DAY: u32 = 24;

// ==========================================
// RequestBuilder - 请求构建器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    /// 严格模式: 重名直接报错；默认后写覆盖先写
    strict_unique_names: bool,
}

impl RequestBuilder {
    /// 创建默认构建器（重名后写覆盖）
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置重名策略
    pub fn with_strict_unique_names(mut self, strict: bool) -> Self {
        self.strict_unique_names = strict;
        self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 构建求解请求
    ///
    /// # 校验顺序
    /// 1. 必填集合非空
    /// 2. 名称非空,重名按策略处理
    /// 3. 产能/系数有限且非负,班次窗口合法
    /// 4. 需求引用存在的客户与规格
    pub fn build(&self, params: &ScheduleParameters) -> Result<SolveRequest, ValidationError> {
        self.check_non_empty(params)?;

        let customers = self.dedup_names(
            "customers",
            params.customers.iter().map(|r| r.name.as_str()),
        )?;

        // 机组: 名称 → 产能（后写覆盖）
        let machine_rows = self.dedup_rows(
            "machines",
            params.machines.iter().map(|r| (r.name.as_str(), r)),
        )?;
        let mut machines = Vec::with_capacity(machine_rows.len());
        let mut machine_capacity_per_hour = BTreeMap::new();
        for (name, row) in machine_rows {
            let field = format!("machines[{}].capacity_per_hour", name);
            check_non_negative(&field, row.capacity_per_hour)?;
            machine_capacity_per_hour.insert(name.clone(), row.capacity_per_hour);
            machines.push(name);
        }

        // 规格: 可选优先级/长协需求随整行覆盖
        let spec_rows = self.dedup_rows(
            "specifications",
            params.specifications.iter().map(|r| (r.name.as_str(), r)),
        )?;
        let mut specifications = Vec::with_capacity(spec_rows.len());
        let mut priority = BTreeMap::new();
        let mut loyal_demand = BTreeMap::new();
        for (name, row) in spec_rows {
            if let Some(p) = row.priority {
                priority.insert(name.clone(), p);
            }
            if let Some(loyal) = row.loyal_demand {
                check_non_negative(&format!("specifications[{}].loyal_demand", name), loyal)?;
                loyal_demand.insert(name.clone(), loyal);
            }
            specifications.push(name);
        }

        check_coefficients(&params.coefficients)?;

        let demands = self.build_demands(params, &customers, &specifications)?;

        let c = &params.coefficients;
        let request = SolveRequest {
            customers,
            machines,
            specifications,
            demands,
            machine_capacity_per_hour,
            cleaning_time: c.cleaning_time,
            hours_per_day: c.hours_per_day,
            changeover_cost: c.changeover_cost,
            min_run_time: c.min_run_time,
            shift_start_hour: c.shift_start_hour,
            shift_end_hour: c.shift_end_hour,
            specification_priority: (!priority.is_empty()).then_some(priority),
            loyal_demand: (!loyal_demand.is_empty()).then_some(loyal_demand),
        };

        tracing::debug!(
            "求解请求构建完成: customers={}, machines={}, specifications={}, demands={}",
            request.customers.len(),
            request.machines.len(),
            request.specifications.len(),
            request.demands.len()
        );

        Ok(request)
    }

    // ==========================================
    // 集合校验
    // ==========================================

    fn check_non_empty(&self, params: &ScheduleParameters) -> Result<(), ValidationError> {
        if params.customers.is_empty() {
            return Err(ValidationError::empty_collection("customers"));
        }
        if params.machines.is_empty() {
            return Err(ValidationError::empty_collection("machines"));
        }
        if params.specifications.is_empty() {
            return Err(ValidationError::empty_collection("specifications"));
        }
        if params.demands.is_empty() {
            return Err(ValidationError::empty_collection("demands"));
        }
        Ok(())
    }

    /// 名称去重（首次出现顺序）
    fn dedup_names<'a>(
        &self,
        collection: &str,
        names: impl Iterator<Item = &'a str>,
    ) -> Result<Vec<String>, ValidationError> {
        Ok(self
            .dedup_rows(collection, names.map(|n| (n, ())))?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    /// 按名称去重: 位置取首次出现,取值取最后一次
    fn dedup_rows<'a, T>(
        &self,
        collection: &str,
        rows: impl Iterator<Item = (&'a str, T)>,
    ) -> Result<Vec<(String, T)>, ValidationError> {
        let mut out: Vec<(String, T)> = Vec::new();
        let mut index_of: HashMap<String, usize> = HashMap::new();

        for (i, (raw_name, row)) in rows.enumerate() {
            let name = raw_name.trim();
            if name.is_empty() {
                return Err(ValidationError::out_of_range(
                    format!("{}[{}].name", collection, i),
                    "名称不能为空",
                ));
            }

            match index_of.get(name) {
                Some(&pos) => {
                    if self.strict_unique_names {
                        return Err(ValidationError::duplicate_name(
                            format!("{}[{}].name", collection, i),
                            format!("名称 {} 重复", name),
                        ));
                    }
                    tracing::warn!("{} 中名称重复,后写覆盖: {}", collection, name);
                    out[pos].1 = row;
                }
                None => {
                    index_of.insert(name.to_string(), out.len());
                    out.push((name.to_string(), row));
                }
            }
        }

        Ok(out)
    }

    // ==========================================
    // 需求校验
    // ==========================================

    fn build_demands(
        &self,
        params: &ScheduleParameters,
        customers: &[String],
        specifications: &[String],
    ) -> Result<Vec<DemandRecord>, ValidationError> {
        let customer_set: HashSet<&str> = customers.iter().map(String::as_str).collect();
        let spec_set: HashSet<&str> = specifications.iter().map(String::as_str).collect();

        let mut demands: Vec<DemandRecord> = Vec::with_capacity(params.demands.len());
        let mut index_of: HashMap<(String, String), usize> = HashMap::new();

        for (i, row) in params.demands.iter().enumerate() {
            let customer = row.customer.trim();
            let spec = row.spec.trim();

            if !customer_set.contains(customer) {
                return Err(ValidationError::missing_reference(
                    format!("demands[{}].customer", i),
                    format!("客户 {} 不存在", customer),
                ));
            }
            if !spec_set.contains(spec) {
                return Err(ValidationError::missing_reference(
                    format!("demands[{}].spec", i),
                    format!("规格 {} 不存在", spec),
                ));
            }
            check_non_negative(&format!("demands[{}].quantity", i), row.quantity)?;

            let key = (customer.to_string(), spec.to_string());
            match index_of.get(&key) {
                Some(&pos) => {
                    if self.strict_unique_names {
                        return Err(ValidationError::duplicate_name(
                            format!("demands[{}]", i),
                            format!("需求 {}/{} 重复", customer, spec),
                        ));
                    }
                    tracing::warn!("需求重复,后写覆盖: customer={}, spec={}", customer, spec);
                    demands[pos].quantity = row.quantity;
                }
                None => {
                    index_of.insert(key, demands.len());
                    demands.push(DemandRecord {
                        customer: customer.to_string(),
                        spec: spec.to_string(),
                        quantity: row.quantity,
                    });
                }
            }
        }

        Ok(demands)
    }
}

// ==========================================
// 数值校验
// ==========================================

fn check_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::out_of_range(
            field,
            format!("必须为有限非负数,实际为 {}", value),
        ));
    }
    Ok(())
}

fn check_coefficients(c: &Coefficients) -> Result<(), ValidationError> {
    check_non_negative("coefficients.cleaning_time", c.cleaning_time)?;
    check_non_negative("coefficients.changeover_cost", c.changeover_cost)?;
    check_non_negative("coefficients.min_run_time", c.min_run_time)?;

    if c.hours_per_day == 0 || c.hours_per_day > MAX_HOURS_PER_DAY {
        return Err(ValidationError::out_of_range(
            "coefficients.hours_per_day",
            format!("必须在 1..={} 之间,实际为 {}", MAX_HOURS_PER_DAY, c.hours_per_day),
        ));
    }
    if c.shift_end_hour > c.hours_per_day {
        return Err(ValidationError::out_of_range(
            "coefficients.shift_end_hour",
            format!("不能超过每日小时数 {},实际为 {}", c.hours_per_day, c.shift_end_hour),
        ));
    }
    if c.shift_start_hour >= c.shift_end_hour {
        return Err(ValidationError::out_of_range(
            "coefficients.shift_start_hour",
            format!(
                "班次开始({})必须早于班次结束({})",
                c.shift_start_hour, c.shift_end_hour
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::ParameterForm;
    use crate::engine::error::ValidationErrorKind;

    fn base_form() -> ParameterForm {
        let mut form = ParameterForm::default();
        form.add_customer("A");
        form.add_machine("M1", 7.0);
        form.add_machine("M2", 6.5);
        form.add_specification("S1", None, None);
        form.add_demand("A", "S1", 50.0);
        form
    }

    #[test]
    fn test_build_basic_request() {
        let request = RequestBuilder::new().build(base_form().params()).unwrap();

        assert_eq!(request.customers, vec!["A"]);
        assert_eq!(request.machines, vec!["M1", "M2"]);
        assert_eq!(request.capacity_of("M1"), Some(7.0));
        assert_eq!(request.capacity_of("M2"), Some(6.5));
        assert_eq!(request.demands.len(), 1);
        assert_eq!(request.hours_per_day, 24);
        assert!(request.specification_priority.is_none());
    }

    #[test]
    fn test_duplicate_machine_last_wins() {
        let mut form = base_form();
        form.add_machine("M1", 9.0);
        form.add_machine(" M2 ", 1.0);

        let request = RequestBuilder::new().build(form.params()).unwrap();

        // 每个不同名称恰好一项,取最后一次的产能
        assert_eq!(request.machine_capacity_per_hour.len(), 2);
        assert_eq!(request.machines, vec!["M1", "M2"]);
        assert_eq!(request.capacity_of("M1"), Some(9.0));
        assert_eq!(request.capacity_of("M2"), Some(1.0));
    }

    #[test]
    fn test_duplicate_name_strict_mode() {
        let mut form = base_form();
        form.add_machine("M1", 9.0);

        let err = RequestBuilder::new()
            .with_strict_unique_names(true)
            .build(form.params())
            .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::DuplicateName);
        assert_eq!(err.field, "machines[2].name");
    }

    #[test]
    fn test_duplicate_demand_last_wins() {
        let mut form = base_form();
        form.add_demand("A", "S1", 80.0);

        let request = RequestBuilder::new().build(form.params()).unwrap();
        assert_eq!(request.demands.len(), 1);
        assert_eq!(request.demands[0].quantity, 80.0);
    }

    #[test]
    fn test_missing_spec_reference() {
        let mut form = base_form();
        form.add_demand("A", "S9", 10.0);
        let before = form.snapshot();

        let err = RequestBuilder::new().build(form.params()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingReference);
        assert_eq!(err.field, "demands[1].spec");
        // 输入保持不变
        assert_eq!(form.params(), &before);
    }

    #[test]
    fn test_missing_customer_reference() {
        let mut form = base_form();
        form.add_demand("Z", "S1", 10.0);

        let err = RequestBuilder::new().build(form.params()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingReference);
        assert_eq!(err.field, "demands[1].customer");
    }

    #[test]
    fn test_empty_collections() {
        let err = RequestBuilder::new()
            .build(&ScheduleParameters::default())
            .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::EmptyCollection);
        assert_eq!(err.field, "customers");

        let mut form = ParameterForm::default();
        form.add_customer("A");
        form.add_machine("M1", 1.0);
        form.add_specification("S1", None, None);
        let err = RequestBuilder::new().build(form.params()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::EmptyCollection);
        assert_eq!(err.field, "demands");
    }

    #[test]
    fn test_out_of_range_values() {
        let mut form = base_form();
        form.add_machine("M3", f64::NAN);
        let err = RequestBuilder::new().build(form.params()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::OutOfRange);

        let mut form = base_form();
        form.add_demand("A", "S1", -1.0);
        let err = RequestBuilder::new().build(form.params()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::OutOfRange);

        let mut form = base_form();
        form.add_machine("   ", 1.0);
        let err = RequestBuilder::new().build(form.params()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::OutOfRange);
        assert_eq!(err.field, "machines[2].name");
    }

    #[test]
    fn test_shift_window() {
        let mut form = base_form();
        form.set_coefficients(Coefficients {
            shift_start_hour: 8,
            shift_end_hour: 8,
            ..Coefficients::default()
        });
        let err = RequestBuilder::new().build(form.params()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::OutOfRange);
        assert_eq!(err.field, "coefficients.shift_start_hour");

        form.set_coefficients(Coefficients {
            hours_per_day: 16,
            shift_start_hour: 0,
            shift_end_hour: 20,
            ..Coefficients::default()
        });
        let err = RequestBuilder::new().build(form.params()).unwrap_err();
        assert_eq!(err.field, "coefficients.shift_end_hour");

        form.set_coefficients(Coefficients {
            hours_per_day: 25,
            ..Coefficients::default()
        });
        let err = RequestBuilder::new().build(form.params()).unwrap_err();
        assert_eq!(err.field, "coefficients.hours_per_day");
    }

    #[test]
    fn test_optional_spec_fields() {
        let mut form = base_form();
        form.add_specification("S2", Some(1), Some(40.0));

        let request = RequestBuilder::new().build(form.params()).unwrap();
        let priority = request.specification_priority.unwrap();
        assert_eq!(priority.get("S2"), Some(&1));
        assert!(!priority.contains_key("S1"));
        assert_eq!(request.loyal_demand.unwrap().get("S2"), Some(&40.0));
    }

    #[test]
    fn test_round_trip_consumed_fields() {
        let params = ScheduleParameters::demo();
        let request = RequestBuilder::new().build(&params).unwrap();
        let rebuilt = RequestBuilder::new().build(&request.to_parameters()).unwrap();
        assert_eq!(request, rebuilt);
    }
}
