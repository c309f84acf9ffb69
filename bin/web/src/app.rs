//! Main Leptos application component and routing.

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    path,
};
use parque_access::paths;

use crate::context::{AuthContext, provide_auth, use_auth};
use crate::guard::Guarded;
use crate::pages::{
    HomePage, LoginPage, NotFoundPage, ProfilePage, RegisterPage, SectionPage, UnauthorizedPage,
};

/// The main application component.
#[component]
pub fn App(auth: AuthContext) -> impl IntoView {
    provide_meta_context();
    provide_auth(auth);

    view! {
        <Title text="Parque Senderos"/>
        <Router>
            <Header/>
            <main class="container">
                <Routes fallback=|| view! { <Redirect path=paths::NOT_FOUND/> }>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/senderos") view=|| view! { <SectionPage title="Senderos"/> }/>
                    <Route
                        path=path!("/senderos/:id")
                        view=|| view! { <SectionPage title="Detalle del sendero"/> }
                    />

                    <Route
                        path=path!("/login")
                        view=|| view! { <Guarded pattern=paths::LOGIN><LoginPage/></Guarded> }
                    />
                    <Route
                        path=path!("/register")
                        view=|| view! { <Guarded pattern=paths::REGISTER><RegisterPage/></Guarded> }
                    />

                    <Route
                        path=path!("/reserva/crear")
                        view=|| section("/reserva/crear", "Nueva reserva")
                    />
                    <Route path=path!("/mis-reservas") view=|| section(paths::VISITOR_HOME, "Mis reservas")/>
                    <Route
                        path=path!("/reserva/editar/:id")
                        view=|| section("/reserva/editar/:id", "Editar reserva")
                    />
                    <Route path=path!("/mi-perfil") view=|| profile("/mi-perfil")/>

                    <Route path=path!("/guia/agenda") view=|| section(paths::GUIDE_HOME, "Mi agenda")/>
                    <Route
                        path=path!("/guia/asignaciones")
                        view=|| section("/guia/asignaciones", "Asignaciones")
                    />
                    <Route
                        path=path!("/guia/recorrido/:id")
                        view=|| section("/guia/recorrido/:id", "Recorrido")
                    />
                    <Route path=path!("/guia/perfil") view=|| profile("/guia/perfil")/>

                    <Route path=path!("/admin/dashboard") view=|| section(paths::ADMIN_HOME, "Panel de administración")/>
                    <Route path=path!("/admin/senderos") view=|| section("/admin/senderos", "Senderos")/>
                    <Route path=path!("/admin/reservas") view=|| section("/admin/reservas", "Reservas")/>
                    <Route path=path!("/admin/guias") view=|| section("/admin/guias", "Guías")/>
                    <Route path=path!("/admin/visitantes") view=|| section("/admin/visitantes", "Visitantes")/>
                    <Route path=path!("/admin/horarios") view=|| section("/admin/horarios", "Horarios")/>
                    <Route path=path!("/admin/reportes") view=|| section("/admin/reportes", "Reportes")/>

                    <Route path=path!("/unauthorized") view=UnauthorizedPage/>
                    <Route path=path!("/404") view=NotFoundPage/>
                </Routes>
            </main>
        </Router>
    }
}

fn section(pattern: &'static str, title: &'static str) -> impl IntoView {
    view! {
        <Guarded pattern=pattern>
            <SectionPage title=title/>
        </Guarded>
    }
}

fn profile(pattern: &'static str) -> impl IntoView {
    view! {
        <Guarded pattern=pattern>
            <ProfilePage/>
        </Guarded>
    }
}

/// Header with navigation and the sign-out button.
#[component]
fn Header() -> impl IntoView {
    let auth = use_auth();
    let state = auth.state();

    let sign_out = move |_: MouseEvent| {
        let auth = auth.clone();
        spawn_local(async move {
            auth.sign_out().await;
        });
    };

    view! {
        <header class="header">
            <div class="header-left">
                <a href=paths::HOME class="logo">"Parque Senderos"</a>
            </div>
            <div class="header-right">
                {move || match state.with(|state| state.user().cloned()) {
                    Some(user) => view! {
                        <div class="user-menu">
                            <a href=user.role.home_path()>"Mi panel"</a>
                            <span class="user-name">{user.full_name()}</span>
                            <button class="logout-button" on:click=sign_out.clone()>
                                "Cerrar sesión"
                            </button>
                        </div>
                    }.into_any(),
                    None => view! {
                        <div class="user-menu">
                            <a href=paths::LOGIN class="login-button">"Iniciar sesión"</a>
                            <a href=paths::REGISTER>"Registrarse"</a>
                        </div>
                    }.into_any(),
                }}
            </div>
        </header>
    }
}
