use super::ActionState;
use crate::error::{ClientError, ClientResult};
use crate::{Document, FileUpload, FileVersion, VersionId, messages};

/// 上传成功提示的显示时长
pub const SUCCESS_BANNER_MS: u64 = 3000;

/// 上传区域状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadState {
    pub selected: Option<FileUpload>,
    pub action: ActionState,
    pub success: Option<&'static str>,
}

impl UploadState {
    pub fn select(&mut self, file: Option<FileUpload>) {
        self.selected = file;
    }

    /// 没有选中文件或正在上传时按钮禁用
    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && !self.action.is_loading()
    }

    /// 开始上传，返回要发送的文件
    pub fn begin(&mut self) -> Option<FileUpload> {
        if !self.can_upload() {
            return None;
        }
        self.action.begin();
        self.success = None;
        self.selected.clone()
    }

    pub fn fail(&mut self, error: &ClientError) {
        self.action.fail(error);
    }

    pub fn clear_success(&mut self) {
        self.success = None;
    }

    pub fn is_uploading(&self) -> bool {
        self.action.is_loading()
    }
}

/// 文档详情页状态
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentDetailState {
    pub document: Option<Document>,
    pub load: ActionState,
    pub versions: Vec<FileVersion>,
    pub versions_load: ActionState,
    pub upload: UploadState,
    /// 下载/删除等动作的错误
    pub action_error: Option<String>,
}

impl DocumentDetailState {
    pub fn begin_load(&mut self) {
        self.load = ActionState::Loading;
        self.versions_load = ActionState::Loading;
    }

    pub fn document_loaded(&mut self, document: Document) {
        self.document = Some(document);
        self.load.succeed();
    }

    pub fn versions_loaded(&mut self, versions: Vec<FileVersion>) {
        self.versions = versions;
        self.versions_load.succeed();
    }

    /// 上传成功：清空已选文件并用重新拉取的结果刷新版本列表
    ///
    /// 列表拉取失败只影响版本区域，上传仍算成功。
    pub fn upload_succeeded(&mut self, refreshed: ClientResult<Vec<FileVersion>>) {
        self.upload.selected = None;
        self.upload.action.succeed();
        self.upload.success = Some(messages::UPLOAD_SUCCESS);
        match refreshed {
            Ok(versions) => self.versions_loaded(versions),
            Err(e) => self.versions_load.fail(&e),
        }
    }

    pub fn action_failed(&mut self, error: &ClientError) {
        self.action_error = Some(error.to_string());
    }

    pub fn clear_action_error(&mut self) {
        self.action_error = None;
    }

    /// 本地移除已删除的版本（随后仍会重新拉取）
    pub fn remove_version(&mut self, version_id: VersionId) {
        self.versions.retain(|v| v.id != version_id);
    }

    pub fn has_versions(&self) -> bool {
        !self.versions.is_empty()
    }

    pub fn version(&self, version_id: VersionId) -> Option<&FileVersion> {
        self.versions.iter().find(|v| v.id == version_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn version(id: i64) -> FileVersion {
        serde_json::from_value(json!({
            "id": id,
            "documentId": 1,
            "fileName": format!("v{}.pdf", id),
            "contentType": "application/pdf",
            "fileSize": 1024,
            "uploadedByUsername": "ana",
            "uploadedAt": "2024-05-03T09:30:00"
        }))
        .unwrap()
    }

    fn pdf() -> FileUpload {
        FileUpload::new("v3.pdf", "application/pdf", vec![1, 2, 3])
    }

    #[test]
    fn test_upload_button_needs_a_file() {
        let mut upload = UploadState::default();
        assert!(!upload.can_upload());
        assert_eq!(upload.begin(), None);

        upload.select(Some(pdf()));
        assert!(upload.can_upload());
        assert_eq!(upload.begin(), Some(pdf()));
        // 上传中禁用
        assert!(!upload.can_upload());
        assert_eq!(upload.begin(), None);
    }

    #[test]
    fn test_upload_success_refreshes_and_clears_selection() {
        let mut state = DocumentDetailState::default();
        state.versions_loaded(vec![version(1)]);
        state.upload.select(Some(pdf()));
        state.upload.begin();

        state.upload_succeeded(Ok(vec![version(1), version(2)]));
        assert_eq!(state.versions.len(), 2);
        assert_eq!(state.upload.selected, None);
        assert_eq!(state.upload.success, Some("Arquivo enviado com sucesso!"));
        assert!(!state.upload.is_uploading());
    }

    #[test]
    fn test_upload_success_survives_failed_version_refresh() {
        let mut state = DocumentDetailState::default();
        state.versions_loaded(vec![version(1)]);
        state.upload.select(Some(pdf()));
        state.upload.begin();

        state.upload_succeeded(Err(ClientError::network(messages::LOAD_VERSIONS_FAILED)));

        // 上传本身成功，文件不再选中，避免重复上传
        assert!(state.upload.action.is_success());
        assert_eq!(state.upload.action.error_message(), None);
        assert_eq!(state.upload.success, Some(messages::UPLOAD_SUCCESS));
        assert_eq!(state.upload.selected, None);
        assert!(!state.upload.can_upload());
        // 错误只出现在版本区域，旧列表保留
        assert_eq!(
            state.versions_load.error_message(),
            Some(messages::LOAD_VERSIONS_FAILED)
        );
        assert_eq!(state.versions, vec![version(1)]);
    }

    #[test]
    fn test_success_banner_clears_after_three_seconds() {
        assert_eq!(SUCCESS_BANNER_MS, 3000);

        let mut state = DocumentDetailState::default();
        state.upload.select(Some(pdf()));
        state.upload.begin();
        state.upload_succeeded(Ok(vec![version(2)]));
        assert!(state.upload.success.is_some());

        // 定时器触发时执行的转换
        state.upload.clear_success();
        assert_eq!(state.upload.success, None);
        assert!(state.upload.action.is_success());
        assert_eq!(state.versions, vec![version(2)]);
    }

    #[test]
    fn test_upload_failure_keeps_selection() {
        let mut upload = UploadState::default();
        upload.select(Some(pdf()));
        upload.begin();
        upload.fail(&ClientError::validation("Invalid file type"));

        assert_eq!(upload.action.error_message(), Some("Invalid file type"));
        assert!(upload.can_upload());
    }

    #[test]
    fn test_remove_version() {
        let mut state = DocumentDetailState::default();
        state.versions_loaded(vec![version(1), version(2)]);
        state.remove_version(1);
        assert!(state.version(1).is_none());
        assert!(state.has_versions());
    }
}
