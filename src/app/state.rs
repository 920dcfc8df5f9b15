// ==========================================
// 生产排程优化前端 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 装配: 配置 → HTTP 传输 → 求解网关 → 排程API
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{ConfigApi, ScheduleApi};
use crate::config::{ConfigManager, SolverConfigReader};
use crate::gateway::SubmissionObserver;
use crate::i18n;

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 在Tauri应用中作为全局状态管理
pub struct AppState {
    /// 配置文件路径（None 表示仅内存配置）
    pub config_path: Option<PathBuf>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 配置管理API
    pub config_api: Arc<ConfigApi>,

    /// 排程API（表单、提交、结果视图）
    pub schedule_api: Arc<ScheduleApi>,
}

impl AppState {
    /// 从配置文件创建 AppState
    ///
    /// # 参数
    /// - config_path: 配置文件路径（不存在时以默认值启动）
    /// - observer: 求解状态观察者（Tauri 下为前端事件推送）
    pub async fn new(
        config_path: PathBuf,
        observer: Arc<dyn SubmissionObserver>,
    ) -> Result<Self, String> {
        tracing::info!("初始化AppState，配置路径: {}", config_path.display());

        let config_manager = ConfigManager::new(&config_path)
            .map_err(|e| format!("无法加载配置: {}", e))?;
        Self::with_config_manager(Arc::new(config_manager), observer).await
    }

    /// 以已有配置管理器创建 AppState
    pub async fn with_config_manager(
        config_manager: Arc<ConfigManager>,
        observer: Arc<dyn SubmissionObserver>,
    ) -> Result<Self, String> {
        let locale = config_manager
            .get_locale()
            .await
            .map_err(|e| format!("无法读取语言配置: {}", e))?;
        i18n::set_locale(&locale);

        let schedule_api = ScheduleApi::from_config(config_manager.as_ref(), observer)
            .await
            .map_err(|e| format!("无法创建ScheduleApi: {}", e))?;

        tracing::info!("AppState初始化完成: locale={}", locale);

        Ok(Self {
            config_path: config_manager.path().map(|p| p.to_path_buf()),
            config_api: Arc::new(ConfigApi::new(config_manager.clone())),
            config_manager,
            schedule_api: Arc::new(schedule_api),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SubmissionState;
    use crate::gateway::NoOpObserver;

    #[tokio::test]
    async fn test_app_state_from_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let state = AppState::new(path.clone(), Arc::new(NoOpObserver))
            .await
            .unwrap();

        assert_eq!(state.config_path, Some(path));
        assert_eq!(state.schedule_api.gateway_state(), SubmissionState::Idle);
        assert!(state.schedule_api.form_params().customers.is_empty());
        assert_eq!(state.schedule_api.form_params().coefficients.hours_per_day, 24);
    }
}
