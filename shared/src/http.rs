use crate::error::{ClientError, ClientResult};
use crate::{FileUpload, HEADER_CONTENT_DISPOSITION, HEADER_CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 请求体
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// 已序列化的 JSON 文本
    Json(String),
    /// `multipart/form-data`，只含一个文件字段
    Multipart { field: String, file: FileUpload },
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        if let RequestBody::Json(_) = body {
            self.headers
                .insert(HEADER_CONTENT_TYPE.to_string(), "application/json".to_string());
        }
        self.body = body;
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 响应头的键统一为小写
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers
            .insert(key.to_ascii_lowercase(), value.to_string());
        self
    }

    /// 状态码是否为 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_slice(&self.body).map_err(ClientError::from)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(HEADER_CONTENT_TYPE)
    }

    /// 从 `Content-Disposition` 中取出 `filename`
    pub fn attachment_file_name(&self) -> Option<String> {
        let disposition = self.header(HEADER_CONTENT_DISPOSITION)?;
        disposition
            .split(';')
            .map(str::trim)
            .find_map(|part| part.strip_prefix("filename="))
            .map(|name| name.trim_matches('"').to_string())
            .filter(|name| !name.is_empty())
    }
}

/// HTTP 客户端特性 (Trait)
///
/// 浏览器中的 fetch 返回的 Future 不是 Send 的，因此使用 `?Send`。
/// 返回 `Err` 仅表示请求没有拿到响应；非 2xx 响应照常以 `Ok` 返回。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
#[derive(Default)]
struct MockState {
    // (Method, URL) -> Response
    responses: RefCell<HashMap<(HttpMethod, String), HttpResponse>>,
    // 模拟网络失败的 (Method, URL)
    failures: RefCell<Vec<(HttpMethod, String)>>,
    // 按顺序记录发出的请求
    requests: RefCell<Vec<HttpRequest>>,
}

/// 克隆出的实例共享同一份记录，方便在被测对象持有客户端后继续断言
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Rc<MockState>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_response(
        &self,
        method: HttpMethod,
        url: &str,
        status: u16,
        body: serde_json::Value,
    ) {
        self.mock_raw(method, url, HttpResponse::new(status, body.to_string()));
    }

    pub fn mock_raw(&self, method: HttpMethod, url: &str, response: HttpResponse) {
        self.state
            .responses
            .borrow_mut()
            .insert((method, url.to_string()), response);
    }

    pub fn mock_failure(&self, method: HttpMethod, url: &str) {
        self.state
            .failures
            .borrow_mut()
            .push((method, url.to_string()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.borrow().len()
    }

    /// 以 "METHOD URL" 形式返回请求记录
    pub fn request_lines(&self) -> Vec<String> {
        self.state
            .requests
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url))
            .collect()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let key = (req.method, req.url.clone());
        self.state.requests.borrow_mut().push(req);

        if self.state.failures.borrow().contains(&key) {
            return Err(ClientError::network("connection refused"));
        }

        let responses = self.state.responses.borrow();
        Ok(responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| HttpResponse::new(404, "Not Found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_file_name() {
        let resp = HttpResponse::new(200, vec![1, 2, 3])
            .with_header("Content-Disposition", "attachment; filename=\"file\"");
        assert_eq!(resp.attachment_file_name().as_deref(), Some("file"));

        let resp = HttpResponse::new(200, vec![]).with_header("content-disposition", "inline");
        assert_eq!(resp.attachment_file_name(), None);
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let req = HttpRequest::new("http://x/api", HttpMethod::Post)
            .with_body(RequestBody::Json("{}".into()));
        assert_eq!(req.header(HEADER_CONTENT_TYPE), Some("application/json"));

        let req = HttpRequest::new("http://x/api", HttpMethod::Post).with_body(
            RequestBody::Multipart {
                field: "file".into(),
                file: FileUpload::new("a.pdf", "application/pdf", vec![1]),
            },
        );
        assert_eq!(req.header(HEADER_CONTENT_TYPE), None);
    }

    #[test]
    fn test_ok_range() {
        assert!(HttpResponse::new(204, "").ok());
        assert!(!HttpResponse::new(302, "").ok());
    }
}
