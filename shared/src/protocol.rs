use crate::documents::ListQuery;
use crate::error::{ClientError, ClientResult};
use crate::http::{HttpMethod, HttpResponse, RequestBody};
use crate::messages;
use crate::{
    AuthResponse, Document, DocumentId, DocumentRequest, DocumentStatus, FileDownload,
    FileUpload, FileVersion, PaginatedResponse, VersionId,
};
use serde::Serialize;

/// 定义端点的请求-响应关系及元数据
pub trait ApiRequest {
    /// 该请求的响应类型
    type Response: DecodeResponse;
    /// HTTP 方法
    const METHOD: HttpMethod;
    /// 是否附带 Bearer Token
    const AUTHENTICATED: bool = true;
    /// 后端没有给出消息时显示的文本
    const FALLBACK_MESSAGE: &'static str;

    /// URL 路径（不含查询串）
    fn path(&self) -> String;

    fn query(&self) -> ClientResult<Option<String>> {
        Ok(None)
    }

    fn body(&self) -> ClientResult<RequestBody> {
        Ok(RequestBody::Empty)
    }

    /// 将非 2xx 响应转换为错误
    fn map_error(&self, status: u16, body: &[u8]) -> ClientError {
        ClientError::from_status(status, body, Self::FALLBACK_MESSAGE)
    }
}

/// 从 2xx 响应中解码结果
pub trait DecodeResponse: Sized {
    fn decode(response: HttpResponse) -> ClientResult<Self>;
}

macro_rules! json_response {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DecodeResponse for $ty {
                fn decode(response: HttpResponse) -> ClientResult<Self> {
                    response.json()
                }
            }
        )*
    };
}

json_response!(
    AuthResponse,
    Document,
    FileVersion,
    Vec<FileVersion>,
    PaginatedResponse<Document>,
);

/// 204 No Content
impl DecodeResponse for () {
    fn decode(_response: HttpResponse) -> ClientResult<Self> {
        Ok(())
    }
}

impl DecodeResponse for FileDownload {
    fn decode(response: HttpResponse) -> ClientResult<Self> {
        let content_type = response.content_type().map(str::to_string);
        let file_name = response.attachment_file_name();
        Ok(FileDownload {
            bytes: response.body,
            content_type,
            file_name,
        })
    }
}

fn json_body<T: Serialize>(value: &T) -> ClientResult<RequestBody> {
    Ok(RequestBody::Json(serde_json::to_string(value)?))
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
    const FALLBACK_MESSAGE: &'static str = messages::LOGIN_FAILED;

    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }

    fn body(&self) -> ClientResult<RequestBody> {
        json_body(self)
    }

    fn map_error(&self, _status: u16, body: &[u8]) -> ClientError {
        ClientError::auth_from_body(body, Self::FALLBACK_MESSAGE)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
    const FALLBACK_MESSAGE: &'static str = messages::REGISTER_FAILED;

    fn path(&self) -> String {
        "/api/auth/register".to_string()
    }

    fn body(&self) -> ClientResult<RequestBody> {
        json_body(self)
    }

    fn map_error(&self, _status: u16, body: &[u8]) -> ClientError {
        ClientError::auth_from_body(body, Self::FALLBACK_MESSAGE)
    }
}

// =========================================================
// 文档 (Documents)
// =========================================================

/// 查询串参数，字段名与后端保持一致
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListParams<'a> {
    page: u32,
    size: u32,
    sort_by: &'a str,
    direction: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
}

impl ApiRequest for ListQuery {
    type Response = PaginatedResponse<Document>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const FALLBACK_MESSAGE: &'static str = messages::LIST_FAILED;

    fn path(&self) -> String {
        "/api/documents".to_string()
    }

    fn query(&self) -> ClientResult<Option<String>> {
        let params = ListParams {
            page: self.page,
            size: self.size,
            sort_by: &self.sort_by,
            direction: self.direction.as_str(),
            title: self.title_filter(),
            status: self.status.as_ref().map(DocumentStatus::as_str),
        };
        Ok(Some(serde_urlencoded::to_string(params)?))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetDocumentRequest {
    pub id: DocumentId,
}

impl ApiRequest for GetDocumentRequest {
    type Response = Document;
    const METHOD: HttpMethod = HttpMethod::Get;
    const FALLBACK_MESSAGE: &'static str = messages::LOAD_DOCUMENT_FAILED;

    fn path(&self) -> String {
        format!("/api/documents/{}", self.id)
    }
}

/// 创建文档直接复用 `DocumentRequest`
impl ApiRequest for DocumentRequest {
    type Response = Document;
    const METHOD: HttpMethod = HttpMethod::Post;
    const FALLBACK_MESSAGE: &'static str = messages::SAVE_DOCUMENT_FAILED;

    fn path(&self) -> String {
        "/api/documents".to_string()
    }

    fn body(&self) -> ClientResult<RequestBody> {
        json_body(self)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateDocumentRequest {
    pub id: DocumentId,
    pub payload: DocumentRequest,
}

impl ApiRequest for UpdateDocumentRequest {
    type Response = Document;
    const METHOD: HttpMethod = HttpMethod::Put;
    const FALLBACK_MESSAGE: &'static str = messages::SAVE_DOCUMENT_FAILED;

    fn path(&self) -> String {
        format!("/api/documents/{}", self.id)
    }

    fn body(&self) -> ClientResult<RequestBody> {
        json_body(&self.payload)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChangeStatusRequest {
    pub id: DocumentId,
    pub status: DocumentStatus,
}

impl ApiRequest for ChangeStatusRequest {
    type Response = Document;
    const METHOD: HttpMethod = HttpMethod::Put;
    const FALLBACK_MESSAGE: &'static str = messages::CHANGE_STATUS_FAILED;

    fn path(&self) -> String {
        format!("/api/documents/{}/status", self.id)
    }

    fn query(&self) -> ClientResult<Option<String>> {
        Ok(Some(serde_urlencoded::to_string([(
            "status",
            self.status.as_str(),
        )])?))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteDocumentRequest {
    pub id: DocumentId,
}

impl ApiRequest for DeleteDocumentRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const FALLBACK_MESSAGE: &'static str = messages::DELETE_DOCUMENT_FAILED;

    fn path(&self) -> String {
        format!("/api/documents/{}", self.id)
    }
}

// =========================================================
// 文件版本 (Versions)
// =========================================================

pub const UPLOAD_FIELD_NAME: &str = "file";

#[derive(Debug, Clone)]
pub struct UploadVersionRequest {
    pub document_id: DocumentId,
    pub file: FileUpload,
}

impl ApiRequest for UploadVersionRequest {
    type Response = FileVersion;
    const METHOD: HttpMethod = HttpMethod::Post;
    const FALLBACK_MESSAGE: &'static str = messages::UPLOAD_FAILED;

    fn path(&self) -> String {
        format!("/api/documents/{}/versions/upload", self.document_id)
    }

    fn body(&self) -> ClientResult<RequestBody> {
        Ok(RequestBody::Multipart {
            field: UPLOAD_FIELD_NAME.to_string(),
            file: self.file.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListVersionsRequest {
    pub document_id: DocumentId,
}

impl ApiRequest for ListVersionsRequest {
    type Response = Vec<FileVersion>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const FALLBACK_MESSAGE: &'static str = messages::LOAD_VERSIONS_FAILED;

    fn path(&self) -> String {
        format!("/api/documents/{}/versions", self.document_id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LatestVersionRequest {
    pub document_id: DocumentId,
}

impl ApiRequest for LatestVersionRequest {
    type Response = FileVersion;
    const METHOD: HttpMethod = HttpMethod::Get;
    const FALLBACK_MESSAGE: &'static str = messages::LOAD_VERSIONS_FAILED;

    fn path(&self) -> String {
        format!("/api/documents/{}/versions/latest", self.document_id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DownloadVersionRequest {
    pub version_id: VersionId,
}

impl ApiRequest for DownloadVersionRequest {
    type Response = FileDownload;
    const METHOD: HttpMethod = HttpMethod::Get;
    const FALLBACK_MESSAGE: &'static str = messages::DOWNLOAD_FAILED;

    fn path(&self) -> String {
        format!("/api/documents/versions/{}/download", self.version_id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteVersionRequest {
    pub version_id: VersionId,
}

impl ApiRequest for DeleteVersionRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const FALLBACK_MESSAGE: &'static str = messages::DELETE_VERSION_FAILED;

    fn path(&self) -> String {
        format!("/api/documents/versions/{}", self.version_id)
    }
}
