use super::ActionState;
use crate::documents::ListQuery;
use crate::error::ClientError;
use crate::{DEFAULT_PAGE_SIZE, Document, DocumentStatus, PaginatedResponse};

/// 文档列表页状态
///
/// 任何过滤条件变化都会把页码重置为 0；翻页在边界处是空操作。
/// 返回 `bool` 的方法表示是否需要重新查询。
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentListState {
    pub documents: Vec<Document>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub title_filter: String,
    pub status_filter: Option<DocumentStatus>,
    pub load: ActionState,
}

impl DocumentListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            documents: Vec::new(),
            current_page: 0,
            page_size,
            total_pages: 0,
            total_elements: 0,
            title_filter: String::new(),
            status_filter: None,
            load: ActionState::Idle,
        }
    }

    /// 当前状态对应的查询
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.current_page,
            size: self.page_size,
            title: Some(self.title_filter.clone()).filter(|t| !t.is_empty()),
            status: self.status_filter,
            ..ListQuery::default()
        }
    }

    pub fn set_title_filter(&mut self, title: impl Into<String>) {
        self.title_filter = title.into();
        self.current_page = 0;
    }

    pub fn set_status_filter(&mut self, status: Option<DocumentStatus>) {
        self.status_filter = status;
        self.current_page = 0;
    }

    /// 下拉框的值：空字符串表示“全部”，无法识别的值同样视为不过滤
    pub fn set_status_filter_value(&mut self, value: &str) {
        let status = if value.is_empty() {
            None
        } else {
            value.parse().ok()
        };
        self.set_status_filter(status);
    }

    pub fn reset_filters(&mut self) {
        self.title_filter.clear();
        self.status_filter = None;
        self.current_page = 0;
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 0
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous_page() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn begin_load(&mut self) {
        self.load = ActionState::Loading;
    }

    pub fn apply_page(&mut self, page: PaginatedResponse<Document>) {
        self.documents = page.content;
        self.total_pages = page.total_pages;
        self.total_elements = page.total_elements;
        self.load.succeed();
    }

    /// 加载失败时保留上一次的结果
    pub fn fail_load(&mut self, error: &ClientError) {
        self.load.fail(error);
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_loading()
    }

    pub fn show_pagination(&self) -> bool {
        !self.is_loading() && self.total_pages > 1
    }

    /// 是否显示“Nenhum documento encontrado.”
    pub fn is_empty_result(&self) -> bool {
        !self.is_loading() && self.documents.is_empty()
    }

    pub fn page_label(&self) -> String {
        format!("Página {} de {}", self.current_page + 1, self.total_pages)
    }
}

impl Default for DocumentListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(total_pages: u32, titles: &[&str]) -> PaginatedResponse<Document> {
        let content: Vec<serde_json::Value> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                json!({
                    "id": i + 1,
                    "title": title,
                    "status": "DRAFT",
                    "createdAt": "2024-05-01T10:15:30"
                })
            })
            .collect();
        serde_json::from_value(json!({
            "content": content,
            "totalElements": titles.len(),
            "totalPages": total_pages,
            "size": 10,
            "number": 0
        }))
        .unwrap()
    }

    #[test]
    fn test_single_page_hides_pagination() {
        let mut state = DocumentListState::default();
        state.begin_load();
        assert!(!state.is_empty_result());

        state.apply_page(page(1, &["A"]));
        assert_eq!(state.documents.len(), 1);
        assert!(!state.show_pagination());
        assert!(!state.is_empty_result());
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = DocumentListState::default();
        state.apply_page(page(5, &["A", "B"]));
        assert!(state.next_page());
        assert!(state.next_page());
        assert_eq!(state.current_page, 2);

        state.set_title_filter("ata");
        assert_eq!(state.current_page, 0);
        assert_eq!(state.query().title.as_deref(), Some("ata"));

        state.next_page();
        state.set_status_filter_value("PUBLISHED");
        assert_eq!(state.current_page, 0);
        assert_eq!(state.query().status, Some(DocumentStatus::Published));

        state.next_page();
        state.reset_filters();
        let query = state.query();
        assert_eq!(query, ListQuery::default());
    }

    #[test]
    fn test_page_bounds_are_noops() {
        let mut state = DocumentListState::default();
        state.apply_page(page(2, &["A"]));

        assert!(!state.previous_page());
        assert_eq!(state.current_page, 0);

        assert!(state.next_page());
        assert_eq!(state.page_label(), "Página 2 de 2");
        assert!(!state.next_page());
        assert_eq!(state.current_page, 1);

        assert!(state.previous_page());
        assert_eq!(state.current_page, 0);
    }

    #[test]
    fn test_no_pages_means_no_navigation() {
        let mut state = DocumentListState::default();
        state.apply_page(page(0, &[]));
        assert!(!state.next_page());
        assert!(state.is_empty_result());
        assert!(!state.show_pagination());
    }

    #[test]
    fn test_failure_keeps_previous_rows() {
        let mut state = DocumentListState::default();
        state.apply_page(page(1, &["A"]));
        state.begin_load();
        state.fail_load(&ClientError::network("Erro ao carregar documentos."));
        assert_eq!(state.documents.len(), 1);
        assert_eq!(state.load.error_message(), Some("Erro ao carregar documentos."));
    }

    #[test]
    fn test_status_filter_blank_means_all() {
        let mut state = DocumentListState::default();
        state.set_status_filter_value("ARCHIVED");
        state.set_status_filter_value("");
        assert_eq!(state.status_filter, None);
    }
}
