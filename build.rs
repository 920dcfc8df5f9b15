// ==========================================
// 构建脚本
// ==========================================
// 仅在启用 tauri-app 特性时生成 Tauri 上下文
// ==========================================

fn main() {
    if std::env::var_os("CARGO_FEATURE_TAURI_APP").is_some() {
        tauri_build::build();
    }
}
