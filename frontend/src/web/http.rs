//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现共享核心的 `HttpClient`。

use ged_shared::error::{ClientError, ClientResult};
use ged_shared::http::{HttpClient, HttpRequest, HttpResponse, RequestBody};
use ged_shared::{HEADER_CONTENT_DISPOSITION, HEADER_CONTENT_TYPE};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, Response};

use super::file::bytes_to_blob;

/// 需要读取的响应头（跨域时后端须在 `Access-Control-Expose-Headers` 中暴露）
const RESPONSE_HEADERS: [&str; 2] = [HEADER_CONTENT_TYPE, HEADER_CONTENT_DISPOSITION];

fn js_error(context: &str, e: JsValue) -> ClientError {
    ClientError::network(format!("{}: {:?}", context, e))
}

/// 基于 fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

impl FetchClient {
    fn build(req: &HttpRequest) -> ClientResult<Request> {
        let headers = Headers::new().map_err(|e| js_error("创建 Headers 失败", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_error("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
            // Content-Type 由浏览器连同 boundary 一起生成
            RequestBody::Multipart { field, file } => {
                let form = FormData::new().map_err(|e| js_error("创建 FormData 失败", e))?;
                let blob = bytes_to_blob(&file.bytes, &file.content_type)?;
                form.append_with_blob_and_filename(field, &blob, &file.file_name)
                    .map_err(|e| js_error("添加文件字段失败", e))?;
                opts.set_body(&form.into());
            }
        }

        Request::new_with_str_and_init(&req.url, &opts).map_err(|e| js_error("构建请求失败", e))
    }

    async fn read(response: Response) -> ClientResult<HttpResponse> {
        let mut headers = Vec::new();
        for name in RESPONSE_HEADERS {
            if let Ok(Some(value)) = response.headers().get(name) {
                headers.push((name, value));
            }
        }

        let promise = response
            .array_buffer()
            .map_err(|e| js_error("读取响应失败", e))?;
        let buffer = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("读取响应失败", e))?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        let mut http_response = HttpResponse::new(response.status(), body);
        for (name, value) in headers {
            http_response = http_response.with_header(name, &value);
        }
        Ok(http_response)
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let request = Self::build(&req)?;

        let window =
            web_sys::window().ok_or_else(|| ClientError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("网络错误", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_error("Response 类型转换失败", e))?;

        Self::read(response).await
    }
}
