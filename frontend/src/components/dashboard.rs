use crate::web::router::Link;
use ged_shared::route::AppRoute;
use leptos::prelude::*;

const FEATURES: [&str; 6] = [
    "Criar e gerenciar documentos",
    "Upload de arquivos (PDF, PNG, JPEG)",
    "Versionamento automático de arquivos",
    "Pesquisa e filtros por status e título",
    "Controle de acesso por perfil",
    "Download de versões anteriores",
];

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <div class="max-w-3xl mx-auto space-y-8">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body items-center text-center">
                    <h1 class="text-3xl font-bold">"Bem-vindo ao GED"</h1>
                    <p class="text-base-content/70">"Gestão Eletrônica de Documentos"</p>
                    <div class="card-actions mt-6">
                        <Link to=AppRoute::Documents class="btn btn-primary">
                            "Acessar Documentos"
                        </Link>
                        <Link to=AppRoute::Documents class="btn btn-secondary">
                            "Ver Meus Documentos"
                        </Link>
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"Recursos Disponíveis"</h2>
                    <ul class="space-y-1">
                        {FEATURES
                            .iter()
                            .map(|feature| view! { <li>"✓ " {*feature}</li> })
                            .collect_view()}
                    </ul>
                </div>
            </div>
        </div>
    }
}
