//! GED 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `ged_shared`: 会话存储、文档客户端、路由表与守卫、视图状态机
//! - `web`: 浏览器 API 封装（fetch、localStorage、History、文件）
//! - `auth`: 认证状态与 API 服务的注入
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod dashboard;
    pub mod document_detail;
    pub mod document_edit;
    pub mod document_list;
    pub mod login;
    pub mod nav_bar;
}
pub mod config;
pub mod logging;
pub(crate) mod web;

use crate::auth::{AppServices, AuthContext};
use crate::components::dashboard::DashboardPage;
use crate::components::document_detail::DocumentDetailPage;
use crate::components::document_edit::DocumentEditPage;
use crate::components::document_list::DocumentListPage;
use crate::components::login::LoginPage;
use crate::components::nav_bar::NavBar;
use crate::config::AppConfig;
use crate::web::router::{Router, RouterOutlet};

use ged_shared::route::AppRoute;
use leptos::prelude::*;
use tracing::info;

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Documents => view! { <DocumentListPage /> }.into_any(),
        AppRoute::DocumentNew => view! { <DocumentEditPage /> }.into_any(),
        AppRoute::DocumentDetail(id) => view! { <DocumentDetailPage id=id /> }.into_any(),
        AppRoute::DocumentEdit(id) => view! { <DocumentEditPage id=id /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置与 API 服务
    let config = AppConfig::from_env();
    info!(api = config.api.base_url(), page_size = config.page_size, "starting GED frontend");
    let services = AppServices::new(&config);

    // 2. 认证上下文（从 localStorage 恢复会话）
    let auth_ctx = AuthContext::new(&services);
    let is_authenticated = auth_ctx.is_authenticated_signal();

    provide_context(config);
    provide_context(services);
    provide_context(auth_ctx);

    view! {
        // 3. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <NavBar />
            <main class="container mx-auto p-4 md:p-8">
                <RouterOutlet matcher=route_matcher />
            </main>
        </Router>
    }
}

/// 浏览器入口：panic 钩子、日志，然后挂载应用
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(App);
}
