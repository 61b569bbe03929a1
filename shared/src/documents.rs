//! 文档客户端
//!
//! 每个 REST 能力对应一个方法；没有缓存，也不合并并发的相同请求。

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::protocol::{
    ChangeStatusRequest, DeleteDocumentRequest, DeleteVersionRequest, DownloadVersionRequest,
    GetDocumentRequest, LatestVersionRequest, ListVersionsRequest, UpdateDocumentRequest,
    UploadVersionRequest,
};
use crate::storage::KeyValueStore;
use crate::{
    DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD, Document, DocumentId, DocumentRequest, DocumentStatus,
    FileDownload, FileUpload, FileVersion, PaginatedResponse, VersionId, messages, validation,
};
use tracing::{info, warn};

// =========================================================
// 列表查询 (List Query)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// 分页列表查询参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub direction: SortDirection,
    /// 标题子串过滤
    pub title: Option<String>,
    pub status: Option<DocumentStatus>,
}

impl ListQuery {
    /// 空标题不参与过滤
    pub fn title_filter(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            direction: SortDirection::Desc,
            title: None,
            status: None,
        }
    }
}

// =========================================================
// 客户端 (Client)
// =========================================================

#[derive(Clone, Debug)]
pub struct DocumentClient<C, S> {
    api: ApiClient<C, S>,
}

impl<C: HttpClient, S: KeyValueStore> DocumentClient<C, S> {
    pub fn new(api: ApiClient<C, S>) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &ListQuery) -> ClientResult<PaginatedResponse<Document>> {
        if query.size == 0 {
            return Err(ClientError::validation(messages::INVALID_PAGE_SIZE));
        }
        self.api.execute(query).await
    }

    pub async fn get(&self, id: DocumentId) -> ClientResult<Document> {
        self.api.execute(&GetDocumentRequest { id }).await
    }

    /// 标题为空时直接返回 `Validation`，不发请求
    pub async fn create(&self, request: &DocumentRequest) -> ClientResult<Document> {
        validation::validate_title(&request.title)?;
        let document = self.api.execute(request).await?;
        info!(id = document.id, "document created");
        Ok(document)
    }

    pub async fn update(&self, id: DocumentId, request: &DocumentRequest) -> ClientResult<Document> {
        validation::validate_title(&request.title)?;
        let request = UpdateDocumentRequest {
            id,
            payload: request.clone(),
        };
        let document = self.api.execute(&request).await?;
        info!(id, "document updated");
        Ok(document)
    }

    pub async fn change_status(
        &self,
        id: DocumentId,
        status: DocumentStatus,
    ) -> ClientResult<Document> {
        let document = self
            .api
            .execute(&ChangeStatusRequest { id, status })
            .await?;
        info!(id, status = status.as_str(), "document status changed");
        Ok(document)
    }

    /// 接受界面上的状态文本，非法值在客户端即被拒绝
    pub async fn change_status_str(&self, id: DocumentId, status: &str) -> ClientResult<Document> {
        let status = status.parse::<DocumentStatus>()?;
        self.change_status(id, status).await
    }

    pub async fn delete(&self, id: DocumentId) -> ClientResult<()> {
        self.api.execute(&DeleteDocumentRequest { id }).await?;
        info!(id, "document deleted");
        Ok(())
    }

    pub async fn upload_file(
        &self,
        document_id: DocumentId,
        file: FileUpload,
    ) -> ClientResult<FileVersion> {
        validation::validate_upload(&file)?;
        let version = self
            .api
            .execute(&UploadVersionRequest { document_id, file })
            .await?;
        info!(document_id, version_id = version.id, "file version uploaded");
        Ok(version)
    }

    /// 上传成功后重新拉取版本列表
    ///
    /// 外层结果只反映上传本身；版本列表拉取失败不会把已完成的上传
    /// 变成失败，由调用方单独处理内层结果。
    pub async fn upload_and_refresh(
        &self,
        document_id: DocumentId,
        file: FileUpload,
    ) -> ClientResult<(FileVersion, ClientResult<Vec<FileVersion>>)> {
        let version = self.upload_file(document_id, file).await?;
        let versions = self.versions(document_id).await;
        if let Err(e) = &versions {
            warn!(document_id, error = %e, "version list refresh failed after upload");
        }
        Ok((version, versions))
    }

    pub async fn versions(&self, document_id: DocumentId) -> ClientResult<Vec<FileVersion>> {
        self.api.execute(&ListVersionsRequest { document_id }).await
    }

    pub async fn latest_version(&self, document_id: DocumentId) -> ClientResult<FileVersion> {
        self.api.execute(&LatestVersionRequest { document_id }).await
    }

    pub async fn download_file(&self, version_id: VersionId) -> ClientResult<FileDownload> {
        self.api
            .execute(&DownloadVersionRequest { version_id })
            .await
    }

    pub async fn delete_version(&self, version_id: VersionId) -> ClientResult<()> {
        self.api.execute(&DeleteVersionRequest { version_id }).await?;
        info!(version_id, "file version deleted");
        Ok(())
    }
}
