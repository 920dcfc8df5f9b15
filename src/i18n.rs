// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use production_schedule_console::i18n::t;
/// let msg = t("error.no_result");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use production_schedule_console::i18n::t_with_args;
/// let msg = t_with_args("error.network", &[("message", "connection refused")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
    // 为避免测试互相干扰，这里对 i18n 相关测试串行化。
    pub(crate) static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("en");
        assert_eq!(current_locale(), "en");

        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("zh-CN");
        assert_eq!(t("error.no_result"), "暂无求解结果");

        set_locale("en");
        assert_eq!(t("error.no_result"), "No optimization result yet");

        set_locale("zh-CN");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("en");
        let msg = t_with_args("error.rejected", &[("message", "Infeasible")]);
        assert!(msg.contains("Infeasible"));
        assert!(msg.contains("optimization service"));

        set_locale("zh-CN");
        let msg = t_with_args("error.rejected", &[("message", "Infeasible")]);
        assert!(msg.contains("Infeasible"));
        assert!(msg.contains("求解服务"));
    }

    #[test]
    fn test_error_keys_present_in_all_locales() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let keys = [
            "error.validation",
            "error.kind.MISSING_REFERENCE",
            "error.kind.DUPLICATE_NAME",
            "error.kind.OUT_OF_RANGE",
            "error.kind.EMPTY_COLLECTION",
            "error.already_in_flight",
            "error.network",
            "error.rejected",
            "error.malformed_response",
            "error.stale_result",
            "error.form_locked",
            "error.row_not_found",
            "error.no_result",
            "error.export",
            "error.config",
            "error.internal",
        ];
        for locale in ["zh-CN", "en"] {
            set_locale(locale);
            for key in keys {
                let msg = t(key);
                assert!(!msg.is_empty());
                assert!(!msg.contains(key), "{} 缺少翻译: {}", locale, key);
            }
        }
        set_locale("zh-CN");
    }
}
