//! API 地址配置

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// 后端地址配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// 去掉末尾的 `/`；空字符串回退到默认地址
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 拼接完整的端点 URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ApiConfig::new("https://ged.example.com/");
        assert_eq!(config.base_url(), "https://ged.example.com");
        assert_eq!(
            config.url("/api/documents"),
            "https://ged.example.com/api/documents"
        );
        assert_eq!(
            config.url("api/documents"),
            "https://ged.example.com/api/documents"
        );
    }

    #[test]
    fn test_blank_falls_back_to_default() {
        assert_eq!(ApiConfig::new("  ").base_url(), DEFAULT_API_BASE_URL);
    }
}
