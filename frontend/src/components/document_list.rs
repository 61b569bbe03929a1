use crate::auth::use_services;
use crate::config::AppConfig;
use crate::web::router::Link;
use ged_shared::format::display_datetime;
use ged_shared::route::AppRoute;
use ged_shared::state::DocumentListState;
use ged_shared::{Document, DocumentStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

#[component]
pub fn DocumentListPage() -> impl IntoView {
    let services = StoredValue::new(use_services());
    let page_size = use_context::<AppConfig>().unwrap_or_default().page_size;

    let state = RwSignal::new(DocumentListState::new(page_size));

    // 每次查询都基于当前的页码与过滤条件
    let load = move || {
        let query = state.with_untracked(DocumentListState::query);
        state.update(DocumentListState::begin_load);

        let documents = services.get_value().documents;
        spawn_local(async move {
            match documents.list(&query).await {
                Ok(page) => state.update(|s| s.apply_page(page)),
                Err(e) => {
                    warn!(error = %e, page = query.page, "failed to load documents");
                    state.update(|s| s.fail_load(&e));
                }
            }
        });
    };

    load();

    let on_reset = move |_| {
        state.update(DocumentListState::reset_filters);
        load();
    };

    let on_previous = move |_| {
        if state.try_update(DocumentListState::previous_page).unwrap_or(false) {
            load();
        }
    };

    let on_next = move |_| {
        if state.try_update(DocumentListState::next_page).unwrap_or(false) {
            load();
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex justify-between items-center mb-4">
                    <h1 class="text-2xl font-bold">"Meus Documentos"</h1>
                    <Link to=AppRoute::DocumentNew class="btn btn-primary">
                        "+ Novo Documento"
                    </Link>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-[1fr_1fr_150px] gap-4 mb-4">
                    <input
                        type="text"
                        class="input input-bordered"
                        placeholder="Buscar por título..."
                        prop:value=move || state.with(|s| s.title_filter.clone())
                        on:input=move |ev| {
                            let title = event_target_value(&ev);
                            state.update(|s| s.set_title_filter(title));
                            load();
                        }
                    />
                    <select
                        class="select select-bordered"
                        prop:value=move || {
                            state.with(|s| s.status_filter.map(|st| st.as_str()).unwrap_or_default())
                        }
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.set_status_filter_value(&value));
                            load();
                        }
                    >
                        <option value="">"Todos os status"</option>
                        {DocumentStatus::ALL
                            .iter()
                            .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                            .collect_view()}
                    </select>
                    <button class="btn btn-secondary" on:click=on_reset>
                        "Resetar"
                    </button>
                </div>

                <Show when=move || state.with(|s| s.load.error_message().is_some())>
                    <div role="alert" class="alert alert-error">
                        <span>
                            {move || state.with(|s| s.load.error_message().unwrap_or_default().to_string())}
                        </span>
                    </div>
                </Show>

                <Show
                    when=move || !state.with(DocumentListState::is_loading)
                    fallback=|| {
                        view! {
                            <div class="flex flex-col items-center py-8 gap-2">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                                <p>"Carregando documentos..."</p>
                            </div>
                        }
                    }
                >
                    <Show
                        when=move || !state.with(DocumentListState::is_empty_result)
                        fallback=|| {
                            view! {
                                <div role="alert" class="alert alert-warning">
                                    <span>"Nenhum documento encontrado. "</span>
                                    <Link to=AppRoute::DocumentNew class="link">
                                        "Criar um novo."
                                    </Link>
                                </div>
                            }
                        }
                    >
                        <DocumentTable documents=Signal::derive(move || {
                            state.with(|s| s.documents.clone())
                        }) />
                    </Show>
                </Show>

                <Show when=move || state.with(DocumentListState::show_pagination)>
                    <div class="flex justify-center items-center gap-2 mt-4">
                        <button
                            class="btn btn-secondary"
                            on:click=on_previous
                            disabled=move || !state.with(DocumentListState::has_previous_page)
                        >
                            "Anterior"
                        </button>
                        <span class="px-3">{move || state.with(DocumentListState::page_label)}</span>
                        <button
                            class="btn btn-secondary"
                            on:click=on_next
                            disabled=move || !state.with(DocumentListState::has_next_page)
                        >
                            "Próxima"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn DocumentTable(documents: Signal<Vec<Document>>) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <table class="table">
                <thead>
                    <tr>
                        <th>"Título"</th>
                        <th>"Status"</th>
                        <th>"Data Criação"</th>
                        <th>"Ações"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || documents.get()
                        key=|doc| doc.id
                        children=move |doc| {
                            view! {
                                <tr>
                                    <td>{doc.title.clone()}</td>
                                    <td>
                                        <span class=doc.status.badge_class()>{doc.status.label()}</span>
                                    </td>
                                    <td>{display_datetime(&doc.created_at)}</td>
                                    <td class="flex gap-2">
                                        <Link to=AppRoute::DocumentDetail(doc.id) class="btn btn-sm btn-secondary">
                                            "Ver"
                                        </Link>
                                        <Link to=AppRoute::DocumentEdit(doc.id) class="btn btn-sm btn-secondary">
                                            "Editar"
                                        </Link>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
