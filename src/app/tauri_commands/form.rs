use crate::app::state::AppState;
use crate::domain::params::Coefficients;

use super::common::{map_api_error, parse_row_id, to_json};

// ==========================================
// 参数表单相关命令
// ==========================================

/// 查询当前表单
#[tauri::command(rename_all = "snake_case")]
pub async fn get_form(state: tauri::State<'_, AppState>) -> Result<String, String> {
    to_json(&state.schedule_api.form_params())
}

/// 加载参考场景
#[tauri::command(rename_all = "snake_case")]
pub async fn load_demo_form(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let params = state.schedule_api.load_demo_form().map_err(map_api_error)?;
    to_json(&params)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn add_customer_row(
    state: tauri::State<'_, AppState>,
    name: String,
) -> Result<String, String> {
    let row_id = state.schedule_api.add_customer(&name).map_err(map_api_error)?;
    to_json(&row_id)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn add_machine_row(
    state: tauri::State<'_, AppState>,
    name: String,
    capacity_per_hour: f64,
) -> Result<String, String> {
    let row_id = state
        .schedule_api
        .add_machine(&name, capacity_per_hour)
        .map_err(map_api_error)?;
    to_json(&row_id)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn add_specification_row(
    state: tauri::State<'_, AppState>,
    name: String,
    priority: Option<u32>,
    loyal_demand: Option<f64>,
) -> Result<String, String> {
    let row_id = state
        .schedule_api
        .add_specification(&name, priority, loyal_demand)
        .map_err(map_api_error)?;
    to_json(&row_id)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn add_demand_row(
    state: tauri::State<'_, AppState>,
    customer: String,
    spec: String,
    quantity: f64,
) -> Result<String, String> {
    let row_id = state
        .schedule_api
        .add_demand(&customer, &spec, quantity)
        .map_err(map_api_error)?;
    to_json(&row_id)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_customer_row(
    state: tauri::State<'_, AppState>,
    row_id: String,
    name: String,
) -> Result<String, String> {
    let row_id = parse_row_id(&row_id)?;
    state
        .schedule_api
        .update_customer(row_id, &name)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_machine_row(
    state: tauri::State<'_, AppState>,
    row_id: String,
    name: String,
    capacity_per_hour: f64,
) -> Result<String, String> {
    let row_id = parse_row_id(&row_id)?;
    state
        .schedule_api
        .update_machine(row_id, &name, capacity_per_hour)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_specification_row(
    state: tauri::State<'_, AppState>,
    row_id: String,
    name: String,
    priority: Option<u32>,
    loyal_demand: Option<f64>,
) -> Result<String, String> {
    let row_id = parse_row_id(&row_id)?;
    state
        .schedule_api
        .update_specification(row_id, &name, priority, loyal_demand)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn update_demand_row(
    state: tauri::State<'_, AppState>,
    row_id: String,
    customer: String,
    spec: String,
    quantity: f64,
) -> Result<String, String> {
    let row_id = parse_row_id(&row_id)?;
    state
        .schedule_api
        .update_demand(row_id, &customer, &spec, quantity)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 更新系数（JSON 格式的 Coefficients）
#[tauri::command(rename_all = "snake_case")]
pub async fn update_coefficients(
    state: tauri::State<'_, AppState>,
    coefficients: String,
) -> Result<String, String> {
    let coefficients: Coefficients = serde_json::from_str(&coefficients)
        .map_err(|e| format!("系数格式错误: {}", e))?;
    state
        .schedule_api
        .set_coefficients(coefficients)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 按行ID删除（返回所在分区）
#[tauri::command(rename_all = "snake_case")]
pub async fn remove_form_row(
    state: tauri::State<'_, AppState>,
    row_id: String,
) -> Result<String, String> {
    let row_id = parse_row_id(&row_id)?;
    let section = state.schedule_api.remove_row(row_id).map_err(map_api_error)?;
    to_json(&section)
}
