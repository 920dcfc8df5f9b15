use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// 配置管理相关命令
// ==========================================

/// 查询所有配置
#[tauri::command(rename_all = "snake_case")]
pub async fn list_configs(state: tauri::State<'_, AppState>) -> Result<String, String> {
    to_json(&state.config_api.list_configs())
}

/// 查询单个配置
#[tauri::command(rename_all = "snake_case")]
pub async fn get_config(state: tauri::State<'_, AppState>, key: String) -> Result<String, String> {
    to_json(&state.config_api.get_config(&key))
}

/// 更新配置
#[tauri::command(rename_all = "snake_case")]
pub async fn update_config(
    state: tauri::State<'_, AppState>,
    key: String,
    value: String,
) -> Result<String, String> {
    state
        .config_api
        .update_config(&key, &value)
        .map_err(map_api_error)?;
    Ok("{}".to_string())
}

/// 切换界面语言
#[tauri::command(rename_all = "snake_case")]
pub async fn set_locale(
    state: tauri::State<'_, AppState>,
    locale: String,
) -> Result<String, String> {
    let current = state.config_api.set_locale(&locale).map_err(map_api_error)?;
    to_json(&serde_json::json!({ "locale": current }))
}
