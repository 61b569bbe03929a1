//! GED 客户端共享核心
//!
//! 与目标平台无关的部分都在这里，前端 (wasm32) 只提供浏览器侧的实现：
//! - `http` / `storage`: 传输层与本地存储的抽象 (Trait)
//! - `api`: 按 `protocol` 中的端点定义发起请求
//! - `session` / `documents`: 会话存储与文档客户端
//! - `route`: 路由表与守卫
//! - `state`: 各视图的状态机

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod api;
pub mod config;
pub mod documents;
pub mod error;
pub mod format;
pub mod http;
pub mod messages;
pub mod protocol;
pub mod route;
pub mod session;
pub mod state;
pub mod storage;
pub mod tags;
pub mod validation;

pub use api::ApiClient;
pub use config::ApiConfig;
pub use documents::{DocumentClient, ListQuery, SortDirection};
pub use error::{ClientError, ClientResult};
pub use session::SessionStore;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 本地存储中保存 Bearer Token 的键
pub const STORAGE_TOKEN_KEY: &str = "auth_token";
/// 本地存储中保存用户名的键
pub const STORAGE_USERNAME_KEY: &str = "username";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_CONTENT_DISPOSITION: &str = "Content-Disposition";

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

pub type DocumentId = i64;
pub type VersionId = i64;

// =========================================================
// 会话 (Session)
// =========================================================

/// 客户端会话记录
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub token: String,
    pub username: String,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

/// 登录/注册成功后的响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl AuthResponse {
    pub fn into_session(self) -> Session {
        Session {
            token: self.token,
            username: self.username,
        }
    }
}

// =========================================================
// 文档 (Document)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 3] = [
        DocumentStatus::Draft,
        DocumentStatus::Published,
        DocumentStatus::Archived,
    ];

    /// 线上传输使用的值
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "DRAFT",
            DocumentStatus::Published => "PUBLISHED",
            DocumentStatus::Archived => "ARCHIVED",
        }
    }

    /// 界面显示的名称
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "Rascunho",
            DocumentStatus::Published => "Publicado",
            DocumentStatus::Archived => "Arquivado",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "badge badge-draft",
            DocumentStatus::Published => "badge badge-published",
            DocumentStatus::Archived => "badge badge-archived",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = error::ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(DocumentStatus::Draft),
            "PUBLISHED" => Ok(DocumentStatus::Published),
            "ARCHIVED" => Ok(DocumentStatus::Archived),
            _ => Err(error::ClientError::validation(format!(
                "{}: {}",
                messages::INVALID_STATUS,
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_username: String,
    pub status: DocumentStatus,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// 创建/更新文档的请求体
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl DocumentRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }
}

// =========================================================
// 文件版本 (FileVersion)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVersion {
    pub id: VersionId,
    pub document_id: DocumentId,
    pub file_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_type: String,
    pub file_size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uploaded_by_username: String,
    pub uploaded_at: NaiveDateTime,
}

/// 待上传的文件
#[derive(Clone, PartialEq, Eq, Default)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// 文件内容可能很大，Debug 只输出元信息
impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// 下载得到的原始文件
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileDownload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// 从 `Content-Disposition` 中解析出的建议文件名
    pub file_name: Option<String>,
}

// =========================================================
// 分页 (Pagination)
// =========================================================

/// 服务端分页结果的只读投影
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number: u32,
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            size: DEFAULT_PAGE_SIZE,
            number: 0,
        }
    }
}

// =========================================================
// Serde 辅助
// =========================================================

/// 将 `null` 视为类型的默认值（Java 端的空集合/空字符串经常序列化为 null）
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_tolerates_null_fields() {
        let doc: Document = serde_json::from_value(json!({
            "id": 7,
            "title": "Contrato",
            "description": null,
            "tags": null,
            "ownerUsername": "ana",
            "status": "PUBLISHED",
            "createdAt": "2024-05-01T10:15:30.123456",
            "updatedAt": null
        }))
        .unwrap();

        assert_eq!(doc.id, 7);
        assert!(doc.description.is_none());
        assert!(doc.tags.is_empty());
        assert_eq!(doc.status, DocumentStatus::Published);
        assert!(doc.updated_at.is_none());
    }

    #[test]
    fn test_paginated_response_ignores_pageable() {
        let page: PaginatedResponse<FileVersion> = serde_json::from_value(json!({
            "content": [],
            "pageable": { "pageNumber": 0 },
            "totalElements": 0,
            "totalPages": 0,
            "size": 10,
            "number": 0
        }))
        .unwrap();

        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.size, 10);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "published".parse::<DocumentStatus>().unwrap(),
            DocumentStatus::Published
        );
        let err = "DELETED".parse::<DocumentStatus>().unwrap_err();
        assert!(matches!(err, error::ClientError::Validation(_)));
    }

    #[test]
    fn test_document_request_skips_absent_fields() {
        let body = serde_json::to_value(DocumentRequest::new("Ata")).unwrap();
        assert_eq!(body, json!({ "title": "Ata" }));

        let body = serde_json::to_value(
            DocumentRequest::new("Ata")
                .with_description("")
                .with_tags(vec!["rh".into()]),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({ "title": "Ata", "description": "", "tags": ["rh"] })
        );
    }

    #[test]
    fn test_session_authenticated_only_with_token() {
        assert!(!Session::default().is_authenticated());
        let session = AuthResponse {
            token: "jwt".into(),
            username: "ana".into(),
            email: None,
            role: Some(UserRole::User),
        }
        .into_session();
        assert!(session.is_authenticated());
    }
}
