use leptos::prelude::*;
use parque_access::paths;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <div class="status-page">
            <h1>"Acceso denegado"</h1>
            <p>"No tienes permiso para ver esta página."</p>
            <a href=paths::HOME>"Volver al inicio"</a>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="status-page">
            <h1>"Página no encontrada"</h1>
            <a href=paths::HOME>"Volver al inicio"</a>
        </div>
    }
}
