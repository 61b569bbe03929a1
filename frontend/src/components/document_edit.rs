use crate::auth::use_services;
use crate::web::router::{Link, use_router};
use ged_shared::route::AppRoute;
use ged_shared::state::{DocumentFormState, NAVIGATE_DELAY_MS};
use ged_shared::{DocumentId, DocumentStatus};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use tracing::warn;

/// 新建（`id` 为 `None`）或编辑文档
#[component]
pub fn DocumentEditPage(#[prop(optional)] id: Option<DocumentId>) -> impl IntoView {
    let services = StoredValue::new(use_services());
    let router = use_router();

    let form = RwSignal::new(match id {
        Some(id) => DocumentFormState::editing(id),
        None => DocumentFormState::new(),
    });

    if let Some(id) = id {
        form.update(|f| {
            f.load.begin();
        });
        let documents = services.get_value().documents;
        spawn_local(async move {
            match documents.get(id).await {
                Ok(document) => form.update(|f| f.fill_from(&document)),
                Err(e) => {
                    warn!(document_id = id, error = %e, "failed to load document for editing");
                    form.update(|f| f.load.fail(&e));
                }
            }
        });
    }

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let request = match form.with_untracked(DocumentFormState::to_request) {
            Ok(request) => request,
            Err(e) => {
                form.update(|f| f.save.fail(&e));
                return;
            }
        };
        if !form.try_update(|f| f.save.begin()).unwrap_or(false) {
            return;
        }
        let (document_id, status_change) =
            form.with_untracked(|f| (f.document_id, f.pending_status_change()));

        let documents = services.get_value().documents;
        spawn_local(async move {
            let saved = match document_id {
                Some(id) => documents.update(id, &request).await,
                None => documents.create(&request).await,
            };

            let document = match saved {
                Ok(document) => document,
                Err(e) => {
                    warn!(error = %e, "failed to save document");
                    form.update(|f| f.save.fail(&e));
                    return;
                }
            };
            form.update(|f| f.save.succeed());

            // 状态变更失败不影响跳转
            if let Some(status) = status_change {
                if let Err(e) = documents.change_status(document.id, status).await {
                    warn!(document_id = document.id, error = %e, "failed to change status");
                }
            }

            set_timeout(
                move || router.navigate_to(AppRoute::Documents),
                Duration::from_millis(NAVIGATE_DELAY_MS),
            );
        });
    };

    let is_new = form.with_untracked(DocumentFormState::is_new);
    let heading = form.with_untracked(DocumentFormState::heading);
    let success_message = form.with_untracked(DocumentFormState::success_message);
    let is_saving = move || form.with(|f| f.save.is_loading());

    view! {
        <Show
            when=move || !form.with(|f| f.load.is_loading())
            fallback=|| view! { <div class="flex justify-center py-8"><span class="loading loading-spinner loading-lg text-primary"></span></div> }
        >
            <div class="card bg-base-100 shadow-xl max-w-xl mx-auto">
                <form class="card-body" on:submit=on_submit>
                    <h1 class="card-title text-2xl">{heading}</h1>

                    <Show when=move || form.with(|f| f.load.error_message().or(f.save.error_message()).is_some())>
                        <div role="alert" class="alert alert-error">
                            <span>
                                {move || {
                                    form.with(|f| {
                                        f.save
                                            .error_message()
                                            .or(f.load.error_message())
                                            .unwrap_or_default()
                                            .to_string()
                                    })
                                }}
                            </span>
                        </div>
                    </Show>

                    <Show when=move || form.with(|f| f.save.is_success())>
                        <div role="alert" class="alert alert-success">
                            <span>{success_message}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label" for="title">
                            <span class="label-text">"Título *"</span>
                        </label>
                        <input
                            id="title"
                            type="text"
                            class="input input-bordered"
                            prop:value=move || form.with(|f| f.title.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.title = value);
                            }
                            required
                        />
                    </div>

                    <div class="form-control">
                        <label class="label" for="description">
                            <span class="label-text">"Descrição"</span>
                        </label>
                        <textarea
                            id="description"
                            class="textarea textarea-bordered"
                            prop:value=move || form.with(|f| f.description.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.description = value);
                            }
                        ></textarea>
                    </div>

                    <div class="form-control">
                        <label class="label" for="tags">
                            <span class="label-text">"Tags (separadas por vírgula)"</span>
                        </label>
                        <input
                            id="tags"
                            type="text"
                            class="input input-bordered"
                            placeholder="tag1, tag2, tag3"
                            prop:value=move || form.with(|f| f.tags.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.tags = value);
                            }
                        />
                    </div>

                    <Show when=move || !is_new>
                        <div class="form-control">
                            <label class="label" for="status">
                                <span class="label-text">"Status"</span>
                            </label>
                            <select
                                id="status"
                                class="select select-bordered"
                                prop:value=move || form.with(|f| f.status.as_str())
                                on:change=move |ev| {
                                    if let Ok(status) = event_target_value(&ev).parse::<DocumentStatus>() {
                                        form.update(|f| f.status = status);
                                    }
                                }
                            >
                                {DocumentStatus::ALL
                                    .iter()
                                    .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                    </Show>

                    <div class="card-actions mt-4">
                        <button type="submit" class="btn btn-primary" disabled=is_saving>
                            {move || if is_saving() { "Salvando..." } else { "Salvar" }}
                        </button>
                        <Link to=AppRoute::Documents class="btn btn-secondary">
                            "Cancelar"
                        </Link>
                    </div>
                </form>
            </div>
        </Show>
    }
}
