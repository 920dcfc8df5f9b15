// ==========================================
// 生产排程优化前端 - 求解结果（线格式）
// ==========================================
// 职责: 求解服务返回的扁平结果记录
// 红线: 聚合层只读,不得修改原始记录
// ==========================================

use serde::{Deserialize, Serialize};

/// 排程条目（最小事实单元）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub customer: String,
    pub machine: String,
    #[serde(alias = "period")]
    pub hour: u32,
    pub quantity: f64,
    #[serde(alias = "specification")]
    pub spec: String,
}

/// 换产事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeoverEvent {
    pub machine: String,
    #[serde(alias = "period")]
    pub hour: u32,
    pub from_spec: String,
    pub to_spec: String,
}

/// 缓冲时间条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferTimeEntry {
    pub machine: String,
    #[serde(alias = "period")]
    pub hour: u32,
    #[serde(alias = "specification")]
    pub spec: String,
    pub time: f64,
}

/// 紧急订单条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyOrderEntry {
    pub machine: String,
    #[serde(alias = "period")]
    pub hour: u32,
    #[serde(alias = "specification")]
    pub spec: String,
}

/// 求解结果
///
/// `schedule` 与 `changeovers` 必须出现（可为空数组）;
/// `buffer_times` / `emergency_orders` 为旁路集合,缺省视为空。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub objective_value: f64,
    pub computation_time: f64,
    pub status: String,
    pub schedule: Vec<ScheduleEntry>,
    pub changeovers: Vec<ChangeoverEvent>,
    #[serde(default)]
    pub buffer_times: Vec<BufferTimeEntry>,
    #[serde(default)]
    pub emergency_orders: Vec<EmergencyOrderEntry>,
}

impl SolveResponse {
    /// 排程总量
    pub fn total_quantity(&self) -> f64 {
        self.schedule.iter().map(|e| e.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_response() {
        let body = json!({
            "objective_value": 1234.5,
            "computation_time": 0.8,
            "status": "Optimal",
            "schedule": [
                {"customer": "A", "machine": "M1", "hour": 0, "quantity": 20.0, "spec": "S1"}
            ],
            "changeovers": []
        });
        let response: SolveResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.schedule.len(), 1);
        assert!(response.buffer_times.is_empty());
        assert!(response.emergency_orders.is_empty());
    }

    #[test]
    fn test_parse_period_alias() {
        let body = json!({
            "objective_value": 0.0,
            "computation_time": 0.0,
            "status": "Optimal",
            "schedule": [],
            "buffer_times": [
                {"machine": "M1", "period": 2, "specification": "S1", "time": 1.5}
            ],
            "emergency_orders": [
                {"machine": "M2", "period": 0, "specification": "S1"}
            ],
            "changeovers": []
        });
        let response: SolveResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.buffer_times[0].hour, 2);
        assert_eq!(response.buffer_times[0].spec, "S1");
        assert_eq!(response.emergency_orders[0].machine, "M2");
        assert!(response.changeovers.is_empty());
    }

    #[test]
    fn test_missing_schedule_is_rejected() {
        let body = json!({"objective_value": 0.0, "computation_time": 0.0, "status": "Optimal"});
        assert!(serde_json::from_value::<SolveResponse>(body).is_err());
    }

    #[test]
    fn test_missing_changeovers_is_rejected() {
        let body = json!({
            "objective_value": 0.0,
            "computation_time": 0.0,
            "status": "Optimal",
            "schedule": []
        });
        assert!(serde_json::from_value::<SolveResponse>(body).is_err());
    }
}
