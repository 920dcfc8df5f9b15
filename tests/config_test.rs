// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 配置文件读写与装配
// ==========================================

use std::sync::Arc;
use std::time::Duration;

use production_schedule_console::app::AppState;
use production_schedule_console::config::{config_keys, ConfigManager, SolverConfigReader};
use production_schedule_console::gateway::NoOpObserver;

#[tokio::test]
async fn test_config_persisted_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = ConfigManager::new(&path).unwrap();
    config
        .update_config(config_keys::REQUEST_TIMEOUT_SECS, "45")
        .unwrap();
    config
        .update_config(config_keys::STRICT_UNIQUE_NAMES, "true")
        .unwrap();
    assert!(path.exists());

    // 重新加载
    let reloaded = ConfigManager::new(&path).unwrap();
    assert_eq!(
        reloaded.get_request_timeout().await.unwrap(),
        Duration::from_secs(45)
    );
    assert!(reloaded.get_strict_unique_names().await.unwrap());
}

#[tokio::test]
async fn test_invalid_file_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{not json").unwrap();

    assert!(ConfigManager::new(&path).is_err());
}

#[tokio::test]
async fn test_app_state_uses_configured_hours_per_day() {
    let config = ConfigManager::in_memory();
    config
        .update_config(config_keys::DEFAULT_HOURS_PER_DAY, "16")
        .unwrap();

    let state = AppState::with_config_manager(Arc::new(config), Arc::new(NoOpObserver))
        .await
        .unwrap();

    let coefficients = state.schedule_api.form_params().coefficients;
    assert_eq!(coefficients.hours_per_day, 16);
    assert_eq!(coefficients.shift_end_hour, 16);
    assert!(state.config_path.is_none());
}
