//! 路由服务模块 - 核心引擎
//!
//! 封装 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 路由表与守卫规则来自 `ged_shared::route`，这里只负责
//! "监听 -> 验证 -> 处理 -> 加载" 的导航流程。

use ged_shared::route::{self, AppRoute, GuardDecision};
use leptos::prelude::*;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证状态以注入的信号提供，与认证模块解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        // 首次加载同样经过守卫
        let decision = route::resolve(&current_path(), is_authenticated.get_untracked());
        if decision.is_redirect() {
            replace_history_state(&decision.route().to_path());
        }
        let (current_route, set_route) = signal(decision.route());

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 按路径导航
    pub fn navigate(&self, path: &str) {
        let decision = route::resolve(path, self.is_authenticated.get_untracked());
        self.apply(decision);
    }

    /// 按路由导航
    pub fn navigate_to(&self, target: AppRoute) {
        let decision = route::guard(target, self.is_authenticated.get_untracked());
        self.apply(decision);
    }

    /// 更新 History 与当前路由
    ///
    /// 目标与当前路由相同时不再压入新的历史记录。
    fn apply(&self, decision: GuardDecision) {
        let target = decision.route();
        if let GuardDecision::Redirect(to) = decision {
            info!(to = %to, "navigation redirected by guard");
        }
        if target == self.current_route.get_untracked() {
            return;
        }

        let path = target.to_path();
        push_history_state(&path);
        debug!(path = %path, "route changed");
        self.set_route.set(target);
    }

    /// 浏览器后退/前进同样经过守卫
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let decision = route::resolve(&current_path(), is_authenticated.get_untracked());
            if decision.is_redirect() {
                replace_history_state(&decision.route().to_path());
            }
            set_route.set(decision.route());
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 监听器在整个应用生命周期内有效
        closure.forget();
    }

    /// 登录后离开登录页，登出后离开受保护页面
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let current = router.current_route.get_untracked();

            if let Some(redirect) = route::on_session_change(current, is_auth) {
                info!(is_authenticated = is_auth, to = %redirect, "session changed, redirecting");
                router.apply(GuardDecision::Redirect(redirect));
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口：根据当前路由渲染对应的页面
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接：拦截点击并交给路由服务
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
