// ==========================================
// 生产排程优化前端 - Tauri 主入口
// ==========================================
// 技术栈: Tauri + Rust + reqwest
// 系统定位: 外部求解服务的桌面前端
// ==========================================

// 禁止控制台窗口 (Windows)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(feature = "tauri-app")]
fn main() {
    use std::sync::Arc;

    use production_schedule_console::app::tauri_commands::*;
    use production_schedule_console::app::{AppState, TauriSubmissionObserver};
    use production_schedule_console::config::get_default_config_path;
    use tauri::Manager;

    // 初始化日志系统
    production_schedule_console::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", production_schedule_console::APP_NAME);
    tracing::info!("系统版本: {}", production_schedule_console::VERSION);
    tracing::info!("==================================================");

    // 获取配置路径
    let config_path = get_default_config_path();
    tracing::info!("使用配置: {}", config_path.display());

    tracing::info!("启动Tauri应用...");

    // 启动Tauri应用
    tauri::Builder::default()
        .setup(move |app| {
            // 求解状态变化推送到前端,需在 AppHandle 可用后装配
            let observer = Arc::new(TauriSubmissionObserver::new(app.handle()));
            let app_state =
                tauri::async_runtime::block_on(AppState::new(config_path.clone(), observer))?;
            app.manage(app_state);
            tracing::info!("AppState初始化成功");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // ==========================================
            // 参数表单相关命令 (12个)
            // ==========================================
            get_form,
            load_demo_form,
            add_customer_row,
            add_machine_row,
            add_specification_row,
            add_demand_row,
            update_customer_row,
            update_machine_row,
            update_specification_row,
            update_demand_row,
            update_coefficients,
            remove_form_row,

            // ==========================================
            // 求解与结果相关命令 (9个)
            // ==========================================
            preview_request,
            submit_schedule,
            get_latest_view,
            reset_results,
            abandon_submission,
            get_gateway_state,
            export_details_csv,
            get_changeover_windows,
            get_demand_fulfillment,

            // ==========================================
            // 配置管理相关命令 (4个)
            // ==========================================
            list_configs,
            get_config,
            update_config,
            set_locale,
        ])
        .run(tauri::generate_context!())
        .expect("启动Tauri应用失败");

    tracing::info!("Tauri应用已退出");
}

#[cfg(not(feature = "tauri-app"))]
fn main() {
    println!("==================================================");
    println!("{}", production_schedule_console::APP_NAME);
    println!("系统版本: {}", production_schedule_console::VERSION);
    println!("==================================================");
    println!();
    println!("此可执行文件需要启用 tauri-app 特性");
    println!("使用: cargo run --features tauri-app");
    println!();
    println!("或者使用库模式:");
    println!("use production_schedule_console::api::ScheduleApi;");
}
