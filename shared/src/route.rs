//! 路由表与守卫
//!
//! 纯业务逻辑，不依赖 DOM。前端的路由服务在每次导航
//! （包括 popstate 与会话变化）前调用这里的 `resolve` / `guard`。

use crate::DocumentId;
use std::fmt;

/// 应用路由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    Login,
    #[default]
    Dashboard,
    Documents,
    DocumentNew,
    DocumentDetail(DocumentId),
    DocumentEdit(DocumentId),
}

impl AppRoute {
    /// 解析 URL path；`/` 与未知路径返回 `None`
    ///
    /// 查询串、片段与末尾的 `/` 会被忽略。
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Some(Self::Login),
            ["dashboard"] => Some(Self::Dashboard),
            ["documents"] => Some(Self::Documents),
            ["documents", "new"] => Some(Self::DocumentNew),
            ["documents", id] => id.parse().ok().map(Self::DocumentDetail),
            ["documents", id, "edit"] => id.parse().ok().map(Self::DocumentEdit),
            _ => None,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Documents => "/documents".to_string(),
            Self::DocumentNew => "/documents/new".to_string(),
            Self::DocumentDetail(id) => format!("/documents/{}", id),
            Self::DocumentEdit(id) => format!("/documents/{}/edit", id),
        }
    }

    /// 除登录页外全部需要认证
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }

    /// 已认证用户访问时应离开的路由
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 登录/注册成功后的去处
    pub fn auth_success_redirect() -> Self {
        Self::Documents
    }

    /// `/` 与未知路径
    pub fn fallback() -> Self {
        Self::Dashboard
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

// =========================================================
// 守卫 (Guard)
// =========================================================

/// 守卫的裁决
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 进入目标路由
    Allow(AppRoute),
    /// 拒绝并改为进入另一路由（使用 replaceState）
    Redirect(AppRoute),
}

impl GuardDecision {
    /// 最终应渲染的路由
    pub fn route(&self) -> AppRoute {
        match self {
            GuardDecision::Allow(route) | GuardDecision::Redirect(route) => *route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardDecision::Redirect(_))
    }
}

/// 受保护页面的准入谓词
pub fn can_activate(is_authenticated: bool) -> bool {
    is_authenticated
}

pub fn guard(route: AppRoute, is_authenticated: bool) -> GuardDecision {
    if route.requires_auth() && !can_activate(is_authenticated) {
        return GuardDecision::Redirect(AppRoute::auth_failure_redirect());
    }
    if route.should_redirect_when_authenticated() && is_authenticated {
        return GuardDecision::Redirect(AppRoute::auth_success_redirect());
    }
    GuardDecision::Allow(route)
}

/// 解析路径并执行守卫
pub fn resolve(path: &str, is_authenticated: bool) -> GuardDecision {
    match AppRoute::parse(path) {
        Some(route) => guard(route, is_authenticated),
        None => GuardDecision::Redirect(guard(AppRoute::fallback(), is_authenticated).route()),
    }
}

/// 会话变化后，当前路由是否需要离开
pub fn on_session_change(current: AppRoute, is_authenticated: bool) -> Option<AppRoute> {
    match guard(current, is_authenticated) {
        GuardDecision::Allow(_) => None,
        GuardDecision::Redirect(route) => Some(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_table() {
        assert_eq!(AppRoute::parse("/login"), Some(AppRoute::Login));
        assert_eq!(AppRoute::parse("/dashboard"), Some(AppRoute::Dashboard));
        assert_eq!(AppRoute::parse("/documents/"), Some(AppRoute::Documents));
        assert_eq!(AppRoute::parse("/documents/new"), Some(AppRoute::DocumentNew));
        assert_eq!(AppRoute::parse("/documents/42"), Some(AppRoute::DocumentDetail(42)));
        assert_eq!(
            AppRoute::parse("/documents/42/edit?tab=1"),
            Some(AppRoute::DocumentEdit(42))
        );
        assert_eq!(AppRoute::parse("/"), None);
        assert_eq!(AppRoute::parse("/documents/abc"), None);
        assert_eq!(AppRoute::parse("/settings"), None);
    }

    #[test]
    fn test_paths_parse_back() {
        for route in [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Documents,
            AppRoute::DocumentNew,
            AppRoute::DocumentDetail(7),
            AppRoute::DocumentEdit(7),
        ] {
            assert_eq!(AppRoute::parse(&route.to_path()), Some(route));
        }
    }

    #[test]
    fn test_guard_denies_anonymous_access() {
        assert_eq!(
            guard(AppRoute::Documents, false),
            GuardDecision::Redirect(AppRoute::Login)
        );
        assert_eq!(
            guard(AppRoute::DocumentEdit(3), false),
            GuardDecision::Redirect(AppRoute::Login)
        );
        assert_eq!(guard(AppRoute::Login, false), GuardDecision::Allow(AppRoute::Login));
        assert_eq!(
            guard(AppRoute::DocumentDetail(3), true),
            GuardDecision::Allow(AppRoute::DocumentDetail(3))
        );
    }

    #[test]
    fn test_authenticated_user_leaves_login() {
        assert_eq!(
            guard(AppRoute::Login, true),
            GuardDecision::Redirect(AppRoute::Documents)
        );
    }

    #[test]
    fn test_resolve_root_and_unknown() {
        assert_eq!(resolve("/", true), GuardDecision::Redirect(AppRoute::Dashboard));
        assert_eq!(resolve("/nope", true), GuardDecision::Redirect(AppRoute::Dashboard));
        assert_eq!(resolve("/", false), GuardDecision::Redirect(AppRoute::Login));
        assert!(!resolve("/documents", true).is_redirect());
    }

    #[test]
    fn test_session_change() {
        assert_eq!(
            on_session_change(AppRoute::DocumentDetail(1), false),
            Some(AppRoute::Login)
        );
        assert_eq!(on_session_change(AppRoute::Login, true), Some(AppRoute::Documents));
        assert_eq!(on_session_change(AppRoute::Login, false), None);
        assert_eq!(on_session_change(AppRoute::Documents, true), None);
    }
}
