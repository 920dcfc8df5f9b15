// ==========================================
// 生产排程优化前端 - 配置管理 API
// ==========================================
// 职责: 配置查询、更新、快照管理、界面语言切换
// 说明: 求解服务地址/超时/重名策略在下次启动装配时生效
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::config::{config_keys, ConfigManager};
use crate::i18n;

/// 配置项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub key: String,
    pub value: String,
}

// ==========================================
// ConfigApi - 配置管理 API
// ==========================================

/// 配置管理API
///
/// 职责：
/// 1. 配置查询（全部、单个）
/// 2. 配置更新（写入即持久化）
/// 3. 配置快照
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// 查询所有已设置的配置
    pub fn list_configs(&self) -> Vec<ConfigItem> {
        self.config_manager
            .list_configs()
            .into_iter()
            .map(|(key, value)| ConfigItem { key, value })
            .collect()
    }

    /// 查询单个配置
    ///
    /// # 返回
    /// - Some(ConfigItem): 配置项
    /// - None: 配置未设置（使用默认值）
    pub fn get_config(&self, key: &str) -> Option<ConfigItem> {
        self.config_manager
            .get_global_config_value(key)
            .map(|value| ConfigItem {
                key: key.to_string(),
                value,
            })
    }

    /// 更新配置
    ///
    /// 更新 locale 时立即切换界面语言。
    pub fn update_config(&self, key: &str, value: &str) -> ApiResult<()> {
        self.config_manager.update_config(key, value)?;
        if key.trim() == config_keys::LOCALE {
            i18n::set_locale(value.trim());
        }
        Ok(())
    }

    /// 切换界面语言并持久化
    pub fn set_locale(&self, locale: &str) -> ApiResult<String> {
        self.update_config(config_keys::LOCALE, locale)?;
        Ok(i18n::current_locale())
    }

    pub fn get_config_snapshot(&self) -> ApiResult<String> {
        Ok(self.config_manager.get_config_snapshot()?)
    }

    /// 从快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的键数量
    pub fn restore_from_snapshot(&self, snapshot_json: &str) -> ApiResult<usize> {
        let count = self
            .config_manager
            .restore_config_from_snapshot(snapshot_json)?;
        if let Some(locale) = self.config_manager.get_global_config_value(config_keys::LOCALE) {
            i18n::set_locale(&locale);
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::tests::LOCALE_TEST_LOCK;

    #[test]
    fn test_set_locale_persists_and_applies() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let api = ConfigApi::new(Arc::new(ConfigManager::in_memory()));

        assert_eq!(api.set_locale("en").unwrap(), "en");
        assert_eq!(
            api.get_config(config_keys::LOCALE),
            Some(ConfigItem {
                key: "locale".to_string(),
                value: "en".to_string(),
            })
        );

        assert!(api.set_locale("fr").is_err());
        assert_eq!(i18n::current_locale(), "en");

        api.set_locale("zh-CN").unwrap();
    }

    #[test]
    fn test_list_configs() {
        let api = ConfigApi::new(Arc::new(ConfigManager::in_memory()));
        assert!(api.list_configs().is_empty());

        api.update_config(config_keys::REQUEST_TIMEOUT_SECS, "60").unwrap();
        assert_eq!(api.list_configs().len(), 1);
    }
}
