//! Shells for the signed-in sections of the portal.

use leptos::prelude::*;
use parque_access::SessionUser;

use crate::context::use_auth;

/// Titled page for a portal section, greeting the current user.
#[component]
pub fn SectionPage(title: &'static str) -> impl IntoView {
    let auth = use_auth();

    view! {
        <div class="section-page">
            <h1>{title}</h1>
            {move || auth.user().map(|user| view! { <p class="greeting">{user.full_name()}</p> })}
        </div>
    }
}

/// Read-only view of the current user's profile.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <div class="profile-page">
            <h1>"Mi perfil"</h1>
            {move || auth.user().map(|user| view! { <ProfileDetails user=user/> })}
        </div>
    }
}

#[component]
fn ProfileDetails(user: SessionUser) -> impl IntoView {
    let rows = [
        ("Nombre", Some(user.full_name())),
        ("Email", Some(user.email.clone())),
        ("Rol", Some(user.role.to_string())),
        ("Cédula", user.national_id.clone()),
        ("Teléfono", user.phone.clone()),
        ("Registrado", user.registered_at.clone()),
        ("Estado", user.status.clone()),
    ];

    view! {
        <dl class="profile-details">
            {rows
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <dt>{label}</dt>
                        <dd>{value.unwrap_or_else(|| "No registrado".to_string())}</dd>
                    }
                })
                .collect_view()}
        </dl>
    }
}
