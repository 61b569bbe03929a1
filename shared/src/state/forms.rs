//! 表单状态
//!
//! 负责数据的持有、从已有文档回填以及到请求对象的转换。

use super::ActionState;
use crate::error::ClientResult;
use crate::tags::{join_tags, parse_tags};
use crate::{Document, DocumentId, DocumentRequest, DocumentStatus, messages, validation};

/// 保存成功后跳转到列表页前的等待时间
pub const NAVIGATE_DELAY_MS: u64 = 1500;

// =========================================================
// 登录 / 注册面板
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthPanelState {
    pub show_register: bool,
    pub login: ActionState,
    pub register: ActionState,
}

impl AuthPanelState {
    /// 切换注册面板，同时清掉两边的错误提示
    pub fn toggle_register(&mut self) {
        self.show_register = !self.show_register;
        if self.login.error_message().is_some() {
            self.login.reset();
        }
        if self.register.error_message().is_some() {
            self.register.reset();
        }
    }

    /// 两个表单共用一个提交中状态
    pub fn is_submitting(&self) -> bool {
        self.login.is_loading() || self.register.is_loading()
    }
}

// =========================================================
// 文档编辑表单
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentFormState {
    /// `None` 表示新建
    pub document_id: Option<DocumentId>,
    pub title: String,
    pub description: String,
    /// 逗号分隔的标签文本
    pub tags: String,
    pub status: DocumentStatus,
    pub load: ActionState,
    pub save: ActionState,
}

impl DocumentFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(id: DocumentId) -> Self {
        Self {
            document_id: Some(id),
            ..Self::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.document_id.is_none()
    }

    /// 用已加载的文档回填表单
    pub fn fill_from(&mut self, document: &Document) {
        self.title = document.title.clone();
        self.description = document.description.clone().unwrap_or_default();
        self.tags = join_tags(&document.tags);
        self.status = document.status;
        self.load.succeed();
    }

    /// 校验标题并生成请求体
    pub fn to_request(&self) -> ClientResult<DocumentRequest> {
        validation::validate_title(&self.title)?;
        Ok(DocumentRequest::new(self.title.clone())
            .with_description(self.description.clone())
            .with_tags(parse_tags(&self.tags)))
    }

    /// 保存成功后需要额外提交的状态变更（仅编辑已有文档且状态不是草稿时）
    pub fn pending_status_change(&self) -> Option<DocumentStatus> {
        match self.document_id {
            Some(_) if self.status != DocumentStatus::Draft => Some(self.status),
            _ => None,
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.is_new() {
            "Novo Documento"
        } else {
            "Editar Documento"
        }
    }

    pub fn success_message(&self) -> &'static str {
        if self.is_new() {
            messages::DOCUMENT_CREATED
        } else {
            messages::DOCUMENT_UPDATED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use serde_json::json;

    #[test]
    fn test_toggle_clears_both_errors() {
        let mut panel = AuthPanelState::default();
        panel.login.fail(&ClientError::auth("Credenciais inválidas"));
        panel.register.fail(&ClientError::validation(messages::INVALID_EMAIL));

        panel.toggle_register();
        assert!(panel.show_register);
        assert_eq!(panel.login.error_message(), None);
        assert_eq!(panel.register.error_message(), None);

        panel.toggle_register();
        assert!(!panel.show_register);
    }

    #[test]
    fn test_fill_from_joins_tags() {
        let document: Document = serde_json::from_value(json!({
            "id": 4,
            "title": "Contrato",
            "description": null,
            "tags": ["financeiro", "2024"],
            "status": "PUBLISHED",
            "createdAt": "2024-05-01T10:15:30"
        }))
        .unwrap();

        let mut form = DocumentFormState::editing(4);
        form.fill_from(&document);

        assert_eq!(form.tags, "financeiro, 2024");
        assert_eq!(form.description, "");
        assert_eq!(form.status, DocumentStatus::Published);
        assert_eq!(form.heading(), "Editar Documento");
    }

    #[test]
    fn test_to_request_splits_tags() {
        let form = DocumentFormState {
            title: "Ata".into(),
            description: "Reunião".into(),
            tags: " rh , , 2024".into(),
            ..DocumentFormState::new()
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.tags, Some(vec!["rh".to_string(), "2024".to_string()]));
        assert_eq!(request.description.as_deref(), Some("Reunião"));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let form = DocumentFormState {
            title: "  ".into(),
            ..DocumentFormState::new()
        };
        assert_eq!(
            form.to_request(),
            Err(ClientError::validation("Título é obrigatório"))
        );
    }

    #[test]
    fn test_status_change_only_for_existing_non_draft() {
        let mut form = DocumentFormState::new();
        form.status = DocumentStatus::Archived;
        assert_eq!(form.pending_status_change(), None);

        let mut form = DocumentFormState::editing(2);
        assert_eq!(form.pending_status_change(), None);
        form.status = DocumentStatus::Published;
        assert_eq!(form.pending_status_change(), Some(DocumentStatus::Published));
        assert_eq!(form.success_message(), messages::DOCUMENT_UPDATED);
    }
}
