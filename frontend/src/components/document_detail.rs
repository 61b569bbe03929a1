use crate::auth::use_services;
use crate::web::router::{Link, use_router};
use crate::web::{confirm, read_file, save_download};
use ged_shared::format::{display_datetime, display_description, display_file_size};
use ged_shared::route::AppRoute;
use ged_shared::state::{DocumentDetailState, SUCCESS_BANNER_MS};
use ged_shared::validation::ACCEPTED_FILE_EXTENSIONS;
use ged_shared::{DocumentId, FileVersion, VersionId, messages};
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use tracing::warn;
use web_sys::HtmlInputElement;

#[component]
pub fn DocumentDetailPage(id: DocumentId) -> impl IntoView {
    let services = StoredValue::new(use_services());
    let router = use_router();

    let state = RwSignal::new(DocumentDetailState::default());
    let file_input = NodeRef::<Input>::new();

    let load_versions = move || {
        let documents = services.get_value().documents;
        spawn_local(async move {
            match documents.versions(id).await {
                Ok(versions) => state.update(|s| s.versions_loaded(versions)),
                Err(e) => {
                    warn!(document_id = id, error = %e, "failed to load versions");
                    state.update(|s| s.versions_load.fail(&e));
                }
            }
        });
    };

    // 文档与版本列表并行加载
    state.update(DocumentDetailState::begin_load);
    {
        let documents = services.get_value().documents;
        spawn_local(async move {
            match documents.get(id).await {
                Ok(document) => state.update(|s| s.document_loaded(document)),
                Err(e) => {
                    warn!(document_id = id, error = %e, "failed to load document");
                    state.update(|s| s.load.fail(&e));
                }
            }
        });
    }
    load_versions();

    let on_file_change = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            state.update(|s| s.upload.select(None));
            return;
        };
        spawn_local(async move {
            match read_file(file).await {
                Ok(upload) => state.update(|s| s.upload.select(Some(upload))),
                Err(e) => {
                    warn!(error = %e, "failed to read selected file");
                    state.update(|s| s.upload.fail(&e));
                }
            }
        });
    };

    let on_upload = move |_| {
        let Some(file) = state.try_update(|s| s.upload.begin()).flatten() else {
            return;
        };

        let documents = services.get_value().documents;
        spawn_local(async move {
            match documents.upload_and_refresh(id, file).await {
                Ok((_, refreshed)) => {
                    state.update(|s| s.upload_succeeded(refreshed));
                    if let Some(input) = file_input.get_untracked() {
                        input.set_value("");
                    }
                    set_timeout(
                        move || state.update(|s| s.upload.clear_success()),
                        Duration::from_millis(SUCCESS_BANNER_MS),
                    );
                }
                Err(e) => {
                    warn!(document_id = id, error = %e, "upload failed");
                    state.update(|s| s.upload.fail(&e));
                }
            }
        });
    };

    let on_download = move |version: FileVersion| {
        state.update(DocumentDetailState::clear_action_error);
        let documents = services.get_value().documents;
        spawn_local(async move {
            let result = match documents.download_file(version.id).await {
                Ok(download) => save_download(&download, &version.file_name),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                warn!(version_id = version.id, error = %e, "download failed");
                state.update(|s| s.action_failed(&e));
            }
        });
    };

    let on_delete_version = move |version_id: VersionId| {
        if !confirm(messages::CONFIRM_DELETE_VERSION) {
            return;
        }
        state.update(DocumentDetailState::clear_action_error);
        let documents = services.get_value().documents;
        spawn_local(async move {
            match documents.delete_version(version_id).await {
                Ok(()) => {
                    state.update(|s| s.remove_version(version_id));
                    load_versions();
                }
                Err(e) => {
                    warn!(version_id, error = %e, "failed to delete version");
                    state.update(|s| s.action_failed(&e));
                }
            }
        });
    };

    let on_delete_document = move |_| {
        if !confirm(messages::CONFIRM_DELETE_DOCUMENT) {
            return;
        }
        state.update(DocumentDetailState::clear_action_error);
        let documents = services.get_value().documents;
        spawn_local(async move {
            match documents.delete(id).await {
                Ok(()) => router.navigate_to(AppRoute::Documents),
                Err(e) => {
                    warn!(document_id = id, error = %e, "failed to delete document");
                    state.update(|s| s.action_failed(&e));
                }
            }
        });
    };

    let is_loading = move || state.with(|s| s.load.is_loading());
    let load_error = move || state.with(|s| s.load.error_message().map(str::to_string));

    view! {
        <Show
            when=move || !is_loading()
            fallback=|| view! { <div class="flex justify-center py-8"><span class="loading loading-spinner loading-lg text-primary"></span></div> }
        >
            <Show when=move || load_error().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || load_error().unwrap_or_default()}</span>
                </div>
            </Show>

            {move || {
                state
                    .with(|s| s.document.clone())
                    .map(|document| {
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <div class="flex justify-between items-center mb-4">
                                        <h1 class="text-2xl font-bold">{document.title.clone()}</h1>
                                        <div class="flex gap-2">
                                            <Link to=AppRoute::DocumentEdit(document.id) class="btn btn-primary">
                                                "Editar"
                                            </Link>
                                            <button class="btn btn-error" on:click=on_delete_document>
                                                "Deletar"
                                            </button>
                                        </div>
                                    </div>

                                    <div class="space-y-2 mb-6">
                                        <p>
                                            <strong>"Descrição: "</strong>
                                            {display_description(document.description.as_deref()).to_string()}
                                        </p>
                                        <p>
                                            <strong>"Status: "</strong>
                                            <span class=document.status.badge_class()>{document.status.label()}</span>
                                        </p>
                                        <p>
                                            <strong>"Tags: "</strong>
                                            {document
                                                .tags
                                                .iter()
                                                .map(|tag| view! { <span class="badge badge-outline mr-2">{tag.clone()}</span> })
                                                .collect_view()}
                                        </p>
                                        <p>
                                            <strong>"Proprietário: "</strong>
                                            {document.owner_username.clone()}
                                        </p>
                                        <p>
                                            <strong>"Criado em: "</strong>
                                            {display_datetime(&document.created_at)}
                                        </p>
                                    </div>
                                </div>
                            </div>
                        }
                    })
            }}

            <Show when=move || state.with(|s| s.action_error.is_some())>
                <div role="alert" class="alert alert-error mt-4">
                    <span>{move || state.with(|s| s.action_error.clone().unwrap_or_default())}</span>
                </div>
            </Show>

            <Show when=move || state.with(|s| s.document.is_some())>
                <div class="card bg-base-100 shadow-xl mt-6">
                    <div class="card-body">
                        <h2 class="card-title">"Upload de Arquivo"</h2>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Novo Arquivo (PDF, PNG ou JPEG)"</span>
                            </label>
                            <input
                                type="file"
                                class="file-input file-input-bordered"
                                accept=ACCEPTED_FILE_EXTENSIONS
                                node_ref=file_input
                                on:change=on_file_change
                            />
                        </div>
                        <div class="mt-2">
                            <button
                                class="btn btn-primary"
                                on:click=on_upload
                                disabled=move || !state.with(|s| s.upload.can_upload())
                            >
                                {move || if state.with(|s| s.upload.is_uploading()) { "Enviando..." } else { "Upload" }}
                            </button>
                        </div>

                        <Show when=move || state.with(|s| s.upload.success.is_some())>
                            <div role="alert" class="alert alert-success mt-4">
                                <span>{move || state.with(|s| s.upload.success.unwrap_or_default())}</span>
                            </div>
                        </Show>
                        <Show when=move || state.with(|s| s.upload.action.error_message().is_some())>
                            <div role="alert" class="alert alert-error mt-4">
                                <span>
                                    {move || state.with(|s| s.upload.action.error_message().unwrap_or_default().to_string())}
                                </span>
                            </div>
                        </Show>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl mt-6">
                    <div class="card-body">
                        <h2 class="card-title">"Versões do Arquivo"</h2>
                        <VersionTable
                            state=state
                            on_download=Callback::new(on_download)
                            on_delete=Callback::new(on_delete_version)
                        />
                    </div>
                </div>
            </Show>
        </Show>
    }
}

#[component]
fn VersionTable(
    state: RwSignal<DocumentDetailState>,
    on_download: Callback<FileVersion>,
    on_delete: Callback<VersionId>,
) -> impl IntoView {
    view! {
        <Show
            when=move || !state.with(|s| s.versions_load.is_loading())
            fallback=|| view! { <span class="loading loading-spinner text-primary"></span> }
        >
            <Show
                when=move || state.with(DocumentDetailState::has_versions)
                fallback=|| {
                    view! {
                        <div role="alert" class="alert alert-warning">
                            <span>"Nenhuma versão de arquivo encontrada."</span>
                        </div>
                    }
                }
            >
                <div class="overflow-x-auto">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Nome do Arquivo"</th>
                                <th>"Tipo"</th>
                                <th>"Tamanho"</th>
                                <th>"Enviado por"</th>
                                <th>"Data"</th>
                                <th>"Ações"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || state.with(|s| s.versions.clone())
                                key=|version| version.id
                                children=move |version| {
                                    let version_id = version.id;
                                    let for_download = version.clone();
                                    view! {
                                        <tr>
                                            <td>{version.file_name.clone()}</td>
                                            <td>{version.content_type.clone()}</td>
                                            <td>{display_file_size(version.file_size)}</td>
                                            <td>{version.uploaded_by_username.clone()}</td>
                                            <td>{display_datetime(&version.uploaded_at)}</td>
                                            <td class="flex gap-2">
                                                <button
                                                    class="btn btn-sm btn-secondary"
                                                    on:click=move |_| on_download.run(for_download.clone())
                                                >
                                                    "Download"
                                                </button>
                                                <button
                                                    class="btn btn-sm btn-error"
                                                    on:click=move |_| on_delete.run(version_id)
                                                >
                                                    "Deletar"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </Show>
    }
}
