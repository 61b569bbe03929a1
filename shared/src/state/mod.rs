//! 视图状态机
//!
//! 每个视图的每个动作都是一个 `idle -> loading -> {success, error}` 状态机。
//! 这里只保存纯数据，前端用 `RwSignal` 包裹后驱动界面。

mod detail;
mod forms;
mod list;

pub use detail::{DocumentDetailState, SUCCESS_BANNER_MS, UploadState};
pub use forms::{AuthPanelState, DocumentFormState, NAVIGATE_DELAY_MS};
pub use list::DocumentListState;

use crate::error::ClientError;

/// 单个动作的状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl ActionState {
    /// 进入加载状态；已在加载中时返回 `false`，调用方应放弃本次动作
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = ActionState::Loading;
        true
    }

    pub fn succeed(&mut self) {
        *self = ActionState::Success;
    }

    pub fn fail(&mut self, error: &ClientError) {
        *self = ActionState::Error(error.to_string());
    }

    pub fn reset(&mut self) {
        *self = ActionState::Idle;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ActionState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionState::Success)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ActionState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_lifecycle() {
        let mut state = ActionState::default();
        assert!(state.begin());
        assert!(state.is_loading());
        // 加载中再次触发被拒绝
        assert!(!state.begin());

        state.fail(&ClientError::validation("Título é obrigatório"));
        assert_eq!(state.error_message(), Some("Título é obrigatório"));

        assert!(state.begin());
        assert_eq!(state.error_message(), None);
        state.succeed();
        assert!(state.is_success());

        state.reset();
        assert_eq!(state, ActionState::Idle);
    }
}
