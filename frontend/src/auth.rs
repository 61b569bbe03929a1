//! 认证模块
//!
//! 会话本身由 `SessionStore` 持久化在 localStorage 中；这里只维护一份
//! 响应式的镜像，路由服务通过注入的认证信号感知登录状态。

use crate::config::AppConfig;
use crate::web::{BrowserStorage, FetchClient};
use ged_shared::error::ClientResult;
use ged_shared::{ApiClient, DocumentClient, Session, SessionStore};
use leptos::prelude::*;

pub type AppSessionStore = SessionStore<FetchClient, BrowserStorage>;
pub type AppDocumentClient = DocumentClient<FetchClient, BrowserStorage>;

/// 共享的 API 服务，通过 Context 注入
#[derive(Clone)]
pub struct AppServices {
    pub session: AppSessionStore,
    pub documents: AppDocumentClient,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let api = ApiClient::new(FetchClient, BrowserStorage, config.api.clone());
        Self {
            session: SessionStore::new(api.clone()),
            documents: DocumentClient::new(api),
        }
    }
}

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Option<Session>>,
}

impl AuthContext {
    /// 从已持久化的会话初始化
    pub fn new(services: &AppServices) -> Self {
        Self {
            session: RwSignal::new(services.session.session()),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.as_ref().is_some_and(Session::is_authenticated)))
    }

    pub fn username_signal(&self) -> Signal<String> {
        let session = self.session;
        Signal::derive(move || {
            session.with(|s| s.as_ref().map(|s| s.username.clone()).unwrap_or_default())
        })
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

pub fn use_services() -> AppServices {
    use_context::<AppServices>().expect("AppServices should be provided")
}

/// 登录；成功后由路由服务负责离开登录页
pub async fn login(
    ctx: AuthContext,
    services: &AppServices,
    username: &str,
    password: &str,
) -> ClientResult<Session> {
    let session = services.session.login(username, password).await?;
    ctx.session.set(Some(session.clone()));
    Ok(session)
}

pub async fn register(
    ctx: AuthContext,
    services: &AppServices,
    username: &str,
    email: &str,
    password: &str,
) -> ClientResult<Session> {
    let session = services.session.register(username, email, password).await?;
    ctx.session.set(Some(session.clone()));
    Ok(session)
}

/// 注销并清除状态
///
/// 不需要手动导航，路由服务会监听认证状态变化并自动重定向。
pub fn logout(ctx: AuthContext, services: &AppServices) {
    services.session.logout();
    ctx.session.set(None);
}
