// ==========================================
// 生产排程优化前端 - 结果聚合器
// ==========================================
// 职责: 扁平求解结果 → 图表/表格所需的交叉引用视图
// 输入: SolveResponse（只读借用）
// 输出: AggregateView
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
// 红线: 同一结果多次聚合必须结构相等（无随机、无增量状态）
// ==========================================

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::request::SolveRequest;
use crate::domain::response::{ChangeoverEvent, SolveResponse};
use crate::domain::view::{
    AggregateView, ChangeoverWindow, DemandFulfillment, DetailRow, MachineBufferTime,
    MachineChangeoverCount, MachineTotal, PeriodTotal, ResultSummary, SpecEmergencyCount,
};
use crate::engine::error::AggregationError;

/// 需求满足判定容差（求解服务数量保留两位小数）
pub const FULFILLMENT_TOLERANCE: f64 = 0.01;

/// 旁路集合的复合键 (machine, hour, spec)
type JoinKey<'a> = (&'a str, u32, &'a str);

// ==========================================
// ResultAggregator - 结果聚合器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAggregator;

impl ResultAggregator {
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 结构检查
    // ==========================================

    /// 检查结果是否可聚合
    ///
    /// 数量/时间必须有限且非负,名称不能为空。
    pub fn check(&self, response: &SolveResponse) -> Result<(), AggregationError> {
        for (i, entry) in response.schedule.iter().enumerate() {
            if entry.machine.trim().is_empty() {
                return Err(AggregationError::BlankName(format!("schedule[{}].machine", i)));
            }
            if entry.spec.trim().is_empty() {
                return Err(AggregationError::BlankName(format!("schedule[{}].spec", i)));
            }
            check_number(&format!("schedule[{}].quantity", i), entry.quantity)?;
        }
        for (i, entry) in response.buffer_times.iter().enumerate() {
            check_number(&format!("buffer_times[{}].time", i), entry.time)?;
        }
        if !response.objective_value.is_finite() {
            return Err(AggregationError::InvalidNumber {
                field: "objective_value".to_string(),
                value: response.objective_value,
            });
        }
        Ok(())
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成聚合视图
    pub fn aggregate(&self, response: &SolveResponse) -> AggregateView {
        let details = self.join_details(response);

        let view = AggregateView {
            summary: ResultSummary {
                objective_value: response.objective_value,
                computation_time: response.computation_time,
                status: response.status.clone(),
                total_quantity: response.total_quantity(),
                schedule_rows: response.schedule.len(),
                changeover_count: response.changeovers.len(),
            },
            period_totals: self.period_totals(response),
            machine_totals: self.machine_totals(response),
            buffer_time_by_machine: self.buffer_time_by_machine(response),
            emergency_count_by_spec: self.emergency_count_by_spec(response),
            details,
            changeovers: self.sorted_changeovers(response),
            changeover_count_by_machine: self.changeover_count_by_machine(response),
        };

        tracing::debug!(
            "结果聚合完成: rows={}, periods={}, machines={}",
            view.details.len(),
            view.period_totals.len(),
            view.machine_totals.len()
        );

        view
    }

    // ==========================================
    // 数量汇总
    // ==========================================

    /// 按时段汇总,时段升序
    fn period_totals(&self, response: &SolveResponse) -> Vec<PeriodTotal> {
        let mut by_hour: BTreeMap<u32, f64> = BTreeMap::new();
        for entry in &response.schedule {
            *by_hour.entry(entry.hour).or_insert(0.0) += entry.quantity;
        }
        by_hour
            .into_iter()
            .map(|(hour, quantity)| PeriodTotal { hour, quantity })
            .collect()
    }

    /// 按机组汇总,保持机组在原始排程中首次出现的顺序
    fn machine_totals(&self, response: &SolveResponse) -> Vec<MachineTotal> {
        group_in_order(
            response.schedule.iter().map(|e| (e.machine.as_str(), e.quantity)),
            0.0,
            |acc, q| *acc += q,
        )
        .into_iter()
        .map(|(machine, quantity)| MachineTotal { machine, quantity })
        .collect()
    }

    /// 按机组汇总缓冲时间（无缓冲条目的机组不出现,不补零）
    fn buffer_time_by_machine(&self, response: &SolveResponse) -> Vec<MachineBufferTime> {
        group_in_order(
            response.buffer_times.iter().map(|b| (b.machine.as_str(), b.time)),
            0.0,
            |acc, t| *acc += t,
        )
        .into_iter()
        .map(|(machine, time)| MachineBufferTime { machine, time })
        .collect()
    }

    /// 按规格统计紧急订单数
    fn emergency_count_by_spec(&self, response: &SolveResponse) -> Vec<SpecEmergencyCount> {
        group_in_order(
            response.emergency_orders.iter().map(|e| (e.spec.as_str(), ())),
            0usize,
            |acc, _| *acc += 1,
        )
        .into_iter()
        .map(|(spec, count)| SpecEmergencyCount { spec, count })
        .collect()
    }

    // ==========================================
    // 明细关联
    // ==========================================

    /// 明细行: 每个排程条目关联缓冲时间（首个匹配,无匹配为0）与紧急标记
    fn join_details(&self, response: &SolveResponse) -> Vec<DetailRow> {
        let mut buffer_index: HashMap<JoinKey<'_>, f64> = HashMap::new();
        for b in &response.buffer_times {
            buffer_index
                .entry((b.machine.as_str(), b.hour, b.spec.as_str()))
                .or_insert(b.time);
        }

        let emergency_index: HashSet<JoinKey<'_>> = response
            .emergency_orders
            .iter()
            .map(|e| (e.machine.as_str(), e.hour, e.spec.as_str()))
            .collect();

        response
            .schedule
            .iter()
            .map(|entry| {
                let key = (entry.machine.as_str(), entry.hour, entry.spec.as_str());
                DetailRow {
                    customer: entry.customer.clone(),
                    machine: entry.machine.clone(),
                    hour: entry.hour,
                    spec: entry.spec.clone(),
                    quantity: entry.quantity,
                    buffer_time: buffer_index.get(&key).copied().unwrap_or(0.0),
                    emergency: emergency_index.contains(&key),
                }
            })
            .collect()
    }

    // ==========================================
    // 换产视图
    // ==========================================

    /// 换产事件按 (机组, 时段) 排序
    fn sorted_changeovers(&self, response: &SolveResponse) -> Vec<ChangeoverEvent> {
        let mut changeovers = response.changeovers.clone();
        changeovers.sort_by(|a, b| a.machine.cmp(&b.machine).then(a.hour.cmp(&b.hour)));
        changeovers
    }

    fn changeover_count_by_machine(&self, response: &SolveResponse) -> Vec<MachineChangeoverCount> {
        group_in_order(
            response.changeovers.iter().map(|c| (c.machine.as_str(), ())),
            0usize,
            |acc, _| *acc += 1,
        )
        .into_iter()
        .map(|(machine, count)| MachineChangeoverCount { machine, count })
        .collect()
    }

    /// 换产后的清洗窗口
    ///
    /// 清洗占用换产时段之后的 ceil(cleaning_time) 个小时,截断到当日最后一小时。
    pub fn changeover_windows(
        &self,
        response: &SolveResponse,
        request: &SolveRequest,
    ) -> Vec<ChangeoverWindow> {
        // 超大清洗时间饱和为 u32::MAX,随后截断
        let cleaning_hours = (request.cleaning_time.max(0.0).ceil() as u32).max(1);
        let last_hour = request.hours_per_day.saturating_sub(1);

        self.sorted_changeovers(response)
            .into_iter()
            .map(|c| {
                let start = c.hour.saturating_add(1).min(last_hour);
                let end = c.hour.saturating_add(cleaning_hours).min(last_hour);
                ChangeoverWindow {
                    cleaning_start_hour: start,
                    cleaning_end_hour: end,
                    machine: c.machine,
                    hour: c.hour,
                    from_spec: c.from_spec,
                    to_spec: c.to_spec,
                }
            })
            .collect()
    }

    // ==========================================
    // 需求满足
    // ==========================================

    /// 按 (客户, 规格) 比较需求量与排程量
    pub fn fulfillment(
        &self,
        request: &SolveRequest,
        response: &SolveResponse,
    ) -> Vec<DemandFulfillment> {
        let mut scheduled: HashMap<(&str, &str), f64> = HashMap::new();
        for entry in &response.schedule {
            *scheduled
                .entry((entry.customer.as_str(), entry.spec.as_str()))
                .or_insert(0.0) += entry.quantity;
        }

        request
            .demands
            .iter()
            .map(|d| {
                let got = scheduled
                    .get(&(d.customer.as_str(), d.spec.as_str()))
                    .copied()
                    .unwrap_or(0.0);
                let shortfall = d.quantity - got;
                DemandFulfillment {
                    customer: d.customer.clone(),
                    spec: d.spec.clone(),
                    demanded: d.quantity,
                    scheduled: got,
                    shortfall,
                    fulfilled: shortfall <= FULFILLMENT_TOLERANCE,
                }
            })
            .collect()
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 按键分组,输出顺序为键首次出现的顺序
fn group_in_order<'a, V, A: Clone>(
    items: impl Iterator<Item = (&'a str, V)>,
    init: A,
    fold: impl Fn(&mut A, V),
) -> Vec<(String, A)> {
    let mut out: Vec<(String, A)> = Vec::new();
    let mut index_of: HashMap<&'a str, usize> = HashMap::new();

    for (key, value) in items {
        let pos = *index_of.entry(key).or_insert_with(|| {
            out.push((key.to_string(), init.clone()));
            out.len() - 1
        });
        fold(&mut out[pos].1, value);
    }

    out
}

fn check_number(field: &str, value: f64) -> Result<(), AggregationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AggregationError::InvalidNumber {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::response::{BufferTimeEntry, EmergencyOrderEntry, ScheduleEntry};

    fn entry(customer: &str, machine: &str, hour: u32, quantity: f64, spec: &str) -> ScheduleEntry {
        ScheduleEntry {
            customer: customer.to_string(),
            machine: machine.to_string(),
            hour,
            quantity,
            spec: spec.to_string(),
        }
    }

    fn response(schedule: Vec<ScheduleEntry>) -> SolveResponse {
        SolveResponse {
            objective_value: 10.0,
            computation_time: 0.5,
            status: "Optimal".to_string(),
            schedule,
            changeovers: vec![],
            buffer_times: vec![],
            emergency_orders: vec![],
        }
    }

    #[test]
    fn test_machine_totals_keep_first_appearance_order() {
        let r = response(vec![
            entry("A", "M2", 0, 5.0, "S1"),
            entry("A", "M1", 0, 3.0, "S1"),
            entry("A", "M2", 1, 4.0, "S1"),
        ]);
        let view = ResultAggregator::new().aggregate(&r);

        let machines: Vec<&str> = view.machine_totals.iter().map(|m| m.machine.as_str()).collect();
        assert_eq!(machines, vec!["M2", "M1"]);
        assert_eq!(view.machine_totals[0].quantity, 9.0);
    }

    #[test]
    fn test_period_totals_ascending() {
        let r = response(vec![
            entry("A", "M1", 3, 1.0, "S1"),
            entry("A", "M2", 1, 2.0, "S1"),
            entry("B", "M1", 1, 3.0, "S2"),
        ]);
        let view = ResultAggregator::new().aggregate(&r);
        assert_eq!(
            view.period_totals,
            vec![
                PeriodTotal { hour: 1, quantity: 5.0 },
                PeriodTotal { hour: 3, quantity: 1.0 },
            ]
        );
    }

    #[test]
    fn test_buffer_and_emergency_groups() {
        let mut r = response(vec![entry("A", "M1", 0, 1.0, "S1")]);
        r.buffer_times = vec![
            BufferTimeEntry { machine: "M2".to_string(), hour: 0, spec: "S1".to_string(), time: 0.5 },
            BufferTimeEntry { machine: "M2".to_string(), hour: 1, spec: "S1".to_string(), time: 1.0 },
        ];
        r.emergency_orders = vec![
            EmergencyOrderEntry { machine: "M1".to_string(), hour: 0, spec: "S1".to_string() },
            EmergencyOrderEntry { machine: "M2".to_string(), hour: 3, spec: "S1".to_string() },
        ];
        let view = ResultAggregator::new().aggregate(&r);

        // 无缓冲条目的 M1 不补零
        assert_eq!(
            view.buffer_time_by_machine,
            vec![MachineBufferTime { machine: "M2".to_string(), time: 1.5 }]
        );
        assert_eq!(
            view.emergency_count_by_spec,
            vec![SpecEmergencyCount { spec: "S1".to_string(), count: 2 }]
        );
    }

    #[test]
    fn test_first_buffer_match_wins() {
        let mut r = response(vec![entry("A", "M1", 2, 10.0, "S1")]);
        r.buffer_times = vec![
            BufferTimeEntry { machine: "M1".to_string(), hour: 2, spec: "S1".to_string(), time: 1.5 },
            BufferTimeEntry { machine: "M1".to_string(), hour: 2, spec: "S1".to_string(), time: 9.0 },
        ];
        let view = ResultAggregator::new().aggregate(&r);
        assert_eq!(view.details[0].buffer_time, 1.5);
    }

    #[test]
    fn test_changeovers_sorted_and_counted() {
        let mut r = response(vec![]);
        r.changeovers = vec![
            ChangeoverEvent { machine: "M2".to_string(), hour: 5, from_spec: "S1".to_string(), to_spec: "S2".to_string() },
            ChangeoverEvent { machine: "M1".to_string(), hour: 9, from_spec: "S2".to_string(), to_spec: "S1".to_string() },
            ChangeoverEvent { machine: "M2".to_string(), hour: 2, from_spec: "S2".to_string(), to_spec: "S1".to_string() },
        ];
        let view = ResultAggregator::new().aggregate(&r);

        let order: Vec<(&str, u32)> = view.changeovers.iter().map(|c| (c.machine.as_str(), c.hour)).collect();
        assert_eq!(order, vec![("M1", 9), ("M2", 2), ("M2", 5)]);
        assert_eq!(view.changeover_count_by_machine[0], MachineChangeoverCount { machine: "M2".to_string(), count: 2 });
        assert_eq!(view.summary.changeover_count, 3);
        // 原始结果不被修改
        assert_eq!(r.changeovers[0].machine, "M2");
    }

    #[test]
    fn test_check_rejects_bad_numbers() {
        let aggregator = ResultAggregator::new();
        assert!(aggregator.check(&response(vec![entry("A", "M1", 0, 1.0, "S1")])).is_ok());

        let bad = response(vec![entry("A", "M1", 0, -1.0, "S1")]);
        assert!(matches!(aggregator.check(&bad), Err(AggregationError::InvalidNumber { .. })));

        let blank = response(vec![entry("A", "", 0, 1.0, "S1")]);
        assert!(matches!(aggregator.check(&blank), Err(AggregationError::BlankName(_))));
    }

    fn changeover(machine: &str, hour: u32) -> ChangeoverEvent {
        ChangeoverEvent {
            machine: machine.to_string(),
            hour,
            from_spec: "Spec1".to_string(),
            to_spec: "Spec2".to_string(),
        }
    }

    fn window_bounds(hour: u32, cleaning_time: f64) -> (u32, u32) {
        let mut request = crate::engine::RequestBuilder::new()
            .build(&crate::domain::params::ScheduleParameters::demo())
            .unwrap();
        request.cleaning_time = cleaning_time;

        let mut r = response(vec![]);
        r.changeovers = vec![changeover("M1", hour)];
        let windows = ResultAggregator::new().changeover_windows(&r, &request);
        (windows[0].cleaning_start_hour, windows[0].cleaning_end_hour)
    }

    #[test]
    fn test_changeover_window_clipped_to_last_hour() {
        // hours_per_day = 24
        assert_eq!(window_bounds(2, 3.0), (3, 5));
        assert_eq!(window_bounds(22, 3.0), (23, 23));
        assert_eq!(window_bounds(23, 3.0), (23, 23));
        assert_eq!(window_bounds(4, 0.0), (5, 5));
    }

    #[test]
    fn test_changeover_window_with_huge_values() {
        assert_eq!(window_bounds(5, 1e12), (6, 23));
        assert_eq!(window_bounds(u32::MAX, 3.0), (23, 23));
        assert_eq!(window_bounds(u32::MAX, 1e12), (23, 23));
    }
}
