//! 请求执行器
//!
//! 按 `ApiRequest` 的定义拼出 URL、附加认证头、发送请求并解码响应。
//! 会话存储与文档客户端共用同一个执行器。

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{HttpClient, HttpRequest};
use crate::protocol::{ApiRequest, DecodeResponse};
use crate::storage::KeyValueStore;
use crate::{HEADER_AUTHORIZATION, STORAGE_TOKEN_KEY};
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct ApiClient<C, S> {
    http: C,
    store: S,
    config: ApiConfig,
}

impl<C: HttpClient, S: KeyValueStore> ApiClient<C, S> {
    pub fn new(http: C, store: S, config: ApiConfig) -> Self {
        Self {
            http,
            store,
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 当前持久化的 Token（空字符串视为不存在）
    pub fn token(&self) -> Option<String> {
        self.store
            .get(STORAGE_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    fn build<R: ApiRequest>(&self, request: &R) -> ClientResult<HttpRequest> {
        let mut url = self.config.url(&request.path());
        if let Some(query) = request.query()? {
            url.push('?');
            url.push_str(&query);
        }

        let mut http_request = HttpRequest::new(&url, R::METHOD).with_body(request.body()?);
        if R::AUTHENTICATED {
            if let Some(token) = self.token() {
                http_request =
                    http_request.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
        }
        Ok(http_request)
    }

    /// 发送请求
    ///
    /// 不做重试：失败只向调用方报告一次。
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> ClientResult<R::Response> {
        let http_request = self.build(request)?;
        let url = http_request.url.clone();
        debug!(method = R::METHOD.as_str(), url = %url, "sending request");

        let response = self.http.send(http_request).await.map_err(|e| {
            warn!(method = R::METHOD.as_str(), url = %url, error = %e, "request got no response");
            ClientError::network(R::FALLBACK_MESSAGE)
        })?;

        if !response.ok() {
            let error = request.map_error(response.status, &response.body);
            warn!(
                method = R::METHOD.as_str(),
                url = %url,
                status = response.status,
                code = error.error_code(),
                "request rejected"
            );
            return Err(error);
        }

        debug!(method = R::METHOD.as_str(), url = %url, status = response.status, "request completed");
        R::Response::decode(response).map_err(|e| {
            warn!(url = %url, error = %e, "failed to decode response body");
            e
        })
    }
}
