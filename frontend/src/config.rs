//! 应用配置
//!
//! 编译期通过环境变量注入（`GED_API_URL=https://... trunk build`），未设置时使用默认值。

use ged_shared::config::DEFAULT_API_BASE_URL;
use ged_shared::{ApiConfig, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// 文档列表每页条数
    pub page_size: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api = ApiConfig::new(option_env!("GED_API_URL").unwrap_or(DEFAULT_API_BASE_URL));
        let page_size = option_env!("GED_PAGE_SIZE")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self { api, page_size }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
