use crate::auth::{self, use_auth, use_services};
use crate::web::router::use_router;
use ged_shared::route::AppRoute;
use ged_shared::state::AuthPanelState;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

#[component]
fn ErrorAlert(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div role="alert" class="alert alert-error text-sm py-2">
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let services = StoredValue::new(use_services());
    let router = use_router();

    let panel = RwSignal::new(AuthPanelState::default());

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (reg_username, set_reg_username) = signal(String::new());
    let (reg_email, set_reg_email) = signal(String::new());
    let (reg_password, set_reg_password) = signal(String::new());

    let is_submitting = move || panel.with(AuthPanelState::is_submitting);
    let login_error =
        Signal::derive(move || panel.with(|p| p.login.error_message().map(str::to_string)));
    let register_error =
        Signal::derive(move || panel.with(|p| p.register.error_message().map(str::to_string)));

    let on_login = move |ev: SubmitEvent| {
        ev.prevent_default();
        if is_submitting() || !panel.try_update(|p| p.login.begin()).unwrap_or(false) {
            return;
        }

        let username = username.get_untracked();
        let password = password.get_untracked();
        let services = services.get_value();
        spawn_local(async move {
            match auth::login(auth_ctx, &services, &username, &password).await {
                Ok(_) => {
                    panel.update(|p| p.login.succeed());
                    router.navigate_to(AppRoute::auth_success_redirect());
                }
                Err(e) => {
                    warn!(error = %e, code = e.error_code(), "login failed");
                    panel.update(|p| p.login.fail(&e));
                }
            }
        });
    };

    let on_register = move |ev: SubmitEvent| {
        ev.prevent_default();
        if is_submitting() || !panel.try_update(|p| p.register.begin()).unwrap_or(false) {
            return;
        }

        let username = reg_username.get_untracked();
        let email = reg_email.get_untracked();
        let password = reg_password.get_untracked();
        let services = services.get_value();
        spawn_local(async move {
            match auth::register(auth_ctx, &services, &username, &email, &password).await {
                Ok(_) => {
                    panel.update(|p| p.register.succeed());
                    router.navigate_to(AppRoute::auth_success_redirect());
                }
                Err(e) => {
                    warn!(error = %e, code = e.error_code(), "registration failed");
                    panel.update(|p| p.register.fail(&e));
                }
            }
        });
    };

    let toggle_register = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        panel.update(AuthPanelState::toggle_register);
    };

    view! {
        <div class="flex flex-col items-center gap-8 py-8">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <form class="card-body" on:submit=on_login>
                    <h2 class="card-title text-2xl">"Login"</h2>
                    <ErrorAlert message=login_error />

                    <div class="form-control">
                        <label class="label" for="username">
                            <span class="label-text">"Usuário"</span>
                        </label>
                        <input
                            id="username"
                            type="text"
                            class="input input-bordered"
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            prop:value=username
                            required
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">"Senha"</span>
                        </label>
                        <input
                            id="password"
                            type="password"
                            class="input input-bordered"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            required
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" disabled=is_submitting>
                            {move || {
                                if panel.with(|p| p.login.is_loading()) { "Conectando..." } else { "Entrar" }
                            }}
                        </button>
                    </div>
                    <p class="text-center text-base-content/70">
                        "Não tem conta? "
                        <a href="#" class="link link-primary" on:click=toggle_register>
                            "Registre-se aqui"
                        </a>
                    </p>
                </form>
            </div>

            <Show when=move || panel.with(|p| p.show_register)>
                <div class="card w-full max-w-md shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_register>
                        <h2 class="card-title text-2xl">"Registrar"</h2>
                        <ErrorAlert message=register_error />

                        <div class="form-control">
                            <label class="label" for="reg-username">
                                <span class="label-text">"Usuário"</span>
                            </label>
                            <input
                                id="reg-username"
                                type="text"
                                class="input input-bordered"
                                on:input=move |ev| set_reg_username.set(event_target_value(&ev))
                                prop:value=reg_username
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="reg-email"
                                type="email"
                                class="input input-bordered"
                                on:input=move |ev| set_reg_email.set(event_target_value(&ev))
                                prop:value=reg_email
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-password">
                                <span class="label-text">"Senha"</span>
                            </label>
                            <input
                                id="reg-password"
                                type="password"
                                class="input input-bordered"
                                on:input=move |ev| set_reg_password.set(event_target_value(&ev))
                                prop:value=reg_password
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || {
                                    if panel.with(|p| p.register.is_loading()) {
                                        "Registrando..."
                                    } else {
                                        "Registrar"
                                    }
                                }}
                            </button>
                        </div>
                        <p class="text-center text-base-content/70">
                            "Já tem conta? "
                            <a href="#" class="link link-primary" on:click=toggle_register>
                                "Voltar ao login"
                            </a>
                        </p>
                    </form>
                </div>
            </Show>
        </div>
    }
}
