use crate::auth::{self, use_auth, use_services};
use crate::web::router::Link;
use ged_shared::route::AppRoute;
use leptos::prelude::*;

/// 顶部导航栏，登录后显示文档入口与注销按钮
#[component]
pub fn NavBar() -> impl IntoView {
    let auth_ctx = use_auth();
    let services = StoredValue::new(use_services());
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let username = auth_ctx.username_signal();

    let on_logout = move |_| {
        auth::logout(auth_ctx, &services.get_value());
    };

    view! {
        <nav class="navbar bg-neutral text-neutral-content px-4 md:px-8">
            <div class="flex-1">
                <Link to=AppRoute::Dashboard class="text-xl font-bold">
                    "📄 GED"
                </Link>
            </div>
            <Show when=move || is_authenticated.get()>
                <div class="flex-none flex items-center gap-4">
                    <Link to=AppRoute::Documents class="link link-hover">
                        "Documentos"
                    </Link>
                    <span class="opacity-50">"|"</span>
                    <button class="btn btn-sm btn-secondary" on:click=on_logout>
                        "Logout (" {move || username.get()} ")"
                    </button>
                </div>
            </Show>
        </nav>
    }
}
