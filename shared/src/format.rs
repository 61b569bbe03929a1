//! 界面显示格式

use chrono::NaiveDateTime;

pub const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// `dd/MM/yyyy HH:mm`
pub fn display_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// 文件大小以 KB 显示，保留两位小数
pub fn display_file_size(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// 描述为空时显示占位文本
pub fn display_description(description: Option<&str>) -> &str {
    match description {
        Some(text) if !text.trim().is_empty() => text,
        _ => "Sem descrição",
    }
}
