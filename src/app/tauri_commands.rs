// ==========================================
// 生产排程优化前端 - Tauri 命令（按域拆分）
// ==========================================
// 职责: Tauri 命令定义,连接前端与后端 API
// ==========================================

#![cfg(feature = "tauri-app")]

mod common;
mod config;
mod form;
mod schedule;

pub use config::*;
pub use form::*;
pub use schedule::*;
