//! Home page component.

use leptos::prelude::*;
use parque_access::paths;

use crate::context::use_auth;

/// Landing page, open to everyone.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <div class="home-page">
            <h1>"Parque Senderos"</h1>
            <p>"Reserva recorridos guiados por los senderos del parque."</p>
            {move || match auth.user() {
                Some(user) => view! {
                    <div>
                        <p>{format!("Hola, {}.", user.first_name)}</p>
                        <a href=user.role.home_path() class="cta-button">"Ir a mi panel"</a>
                    </div>
                }.into_any(),
                None => view! {
                    <div>
                        <a href="/senderos" class="cta-button">"Ver senderos"</a>
                        <a href=paths::LOGIN class="link-button">"Iniciar sesión"</a>
                    </div>
                }.into_any(),
            }}
        </div>
    }
}
