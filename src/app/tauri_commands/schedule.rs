use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// 求解与结果相关命令
// ==========================================

/// 预览求解请求（不发网络）
#[tauri::command(rename_all = "snake_case")]
pub async fn preview_request(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let request = state.schedule_api.preview_request().map_err(map_api_error)?;
    to_json(&request)
}

/// 提交求解,返回聚合视图
#[tauri::command(rename_all = "snake_case")]
pub async fn submit_schedule(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let schedule_api = state.schedule_api.clone();
    let view = schedule_api.submit().await.map_err(map_api_error)?;
    to_json(view.as_ref())
}

/// 最新聚合视图（无结果时返回 null）
#[tauri::command(rename_all = "snake_case")]
pub async fn get_latest_view(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let view = state.schedule_api.latest_view();
    to_json(&view.as_deref())
}

/// 清空结果并放弃在途提交
#[tauri::command(rename_all = "snake_case")]
pub async fn reset_results(state: tauri::State<'_, AppState>) -> Result<String, String> {
    state.schedule_api.reset();
    Ok("{}".to_string())
}

/// 放弃在途提交（保留已有结果）
#[tauri::command(rename_all = "snake_case")]
pub async fn abandon_submission(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let abandoned = state.schedule_api.abandon_submission();
    to_json(&serde_json::json!({ "abandoned_seq": abandoned }))
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_gateway_state(state: tauri::State<'_, AppState>) -> Result<String, String> {
    to_json(&state.schedule_api.gateway_state())
}

/// 导出明细 CSV（返回 CSV 文本）
#[tauri::command(rename_all = "snake_case")]
pub async fn export_details_csv(state: tauri::State<'_, AppState>) -> Result<String, String> {
    state.schedule_api.export_details_csv().map_err(map_api_error)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_changeover_windows(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let windows = state.schedule_api.changeover_windows().map_err(map_api_error)?;
    to_json(&windows)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_demand_fulfillment(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let fulfillment = state.schedule_api.fulfillment().map_err(map_api_error)?;
    to_json(&fulfillment)
}
