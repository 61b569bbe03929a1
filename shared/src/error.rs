use serde::Deserialize;
use thiserror::Error;

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端错误
///
/// `Display` 输出的就是给用户看的本地化消息，视图层直接渲染即可。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// 客户端前置校验失败，没有发出任何请求
    #[error("{0}")]
    Validation(String),
    /// 401/403，或登录/注册被后端拒绝
    #[error("{0}")]
    Auth(String),
    /// 404: 按 id 查找的资源不存在
    #[error("{0}")]
    NotFound(String),
    /// 其它后端错误或网络失败（`status` 为 `None` 表示请求未得到响应）
    #[error("{message}")]
    Api { status: Option<u16>, message: String },
    /// 2xx 响应体无法解析
    #[error("{0}")]
    Serialization(String),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// 后端错误响应体，只关心 `message`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ClientError {
    // --- Convenience constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status: Some(status),
            message: message.into(),
        }
    }

    /// 请求没有得到任何响应
    pub fn network(message: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// 按 HTTP 状态码归类错误响应
    ///
    /// 消息优先取响应体中的 `message` 字段，否则使用 `fallback`。
    pub fn from_status(status: u16, body: &[u8], fallback: &str) -> Self {
        let message = body_message(body).unwrap_or_else(|| fallback.to_string());
        match status {
            400 | 422 => Self::Validation(message),
            401 | 403 => Self::Auth(message),
            404 => Self::NotFound(message),
            _ => Self::api(status, message),
        }
    }

    /// 认证端点的任何失败响应都视为 `Auth`
    pub fn auth_from_body(body: &[u8], fallback: &str) -> Self {
        Self::Auth(body_message(body).unwrap_or_else(|| fallback.to_string()))
    }

    // --- Accessors ---

    /// 机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Auth(_) => "AUTH_ERROR",
            ClientError::NotFound(_) => "RESOURCE_NOT_FOUND",
            ClientError::Api { status: None, .. } => "NETWORK_ERROR",
            ClientError::Api { .. } => "API_ERROR",
            ClientError::Serialization(_) => "JSON_PARSE_ERROR",
        }
    }

    /// 对应的 HTTP 状态码（客户端本地产生的错误没有状态码）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Auth(_) => Some(401),
            ClientError::NotFound(_) => Some(404),
            ClientError::Api { status, .. } => *status,
            ClientError::Validation(_) | ClientError::Serialization(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ClientError::Validation(m)
            | ClientError::Auth(m)
            | ClientError::NotFound(m)
            | ClientError::Serialization(m) => m,
            ClientError::Api { message, .. } => message,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::serialization(e.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for ClientError {
    fn from(e: serde_urlencoded::ser::Error) -> Self {
        ClientError::serialization(e.to_string())
    }
}

fn body_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_prefers_body_message() {
        let err = ClientError::from_status(404, br#"{"message":"Document not found"}"#, "x");
        assert_eq!(err, ClientError::not_found("Document not found"));
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.error_code(), "RESOURCE_NOT_FOUND");
    }

    #[test]
    fn test_from_status_uses_fallback() {
        let err = ClientError::from_status(500, b"<html>oops</html>", "Erro ao salvar documento.");
        assert_eq!(err.to_string(), "Erro ao salvar documento.");
        assert_eq!(err.status_code(), Some(500));

        let err = ClientError::from_status(400, br#"{"message":"  "}"#, "fallback");
        assert_eq!(err, ClientError::validation("fallback"));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ClientError::from_status(403, b"", "f"),
            ClientError::Auth(_)
        ));
        assert!(ClientError::from_status(422, b"", "f").is_validation());
        assert_eq!(ClientError::network("off").error_code(), "NETWORK_ERROR");
    }
}
