//! Route guard components.
//!
//! Each wrapper re-evaluates its guard whenever the session signal changes
//! and renders a placeholder, a redirect, or its children.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use parque_access::{
    Access, GateDecision, PublicRouteGuard, Role, RoleRouteGuard, RouteGuard, RouteTable, paths,
};

use crate::context::use_auth;

/// Pages for anonymous visitors; signed-in users go to their landing page.
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    let state = use_auth().state();
    move || gate_view(state.with(|state| PublicRouteGuard.evaluate(state)), &children)
}

/// Pages for signed-in users, optionally restricted to some roles.
#[component]
pub fn RoleRoute(
    #[prop(optional, into)] roles: Vec<Role>,
    #[prop(default = true)] require_auth: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let guard = RoleRouteGuard::roles(roles).require_auth(require_auth);
    let state = use_auth().state();
    move || gate_view(state.with(|state| guard.evaluate(state)), &children)
}

/// Wraps a page with the guard its pattern has in the portal route table.
#[component]
pub fn Guarded(pattern: &'static str, children: ChildrenFn) -> impl IntoView {
    match RouteTable::portal().resolve(pattern).map(|entry| entry.access) {
        Some(Access::Open) => children().into_any(),
        Some(Access::Public) => view! { <PublicRoute>{children()}</PublicRoute> }.into_any(),
        Some(Access::Roles(roles)) => {
            view! { <RoleRoute roles=roles.to_vec()>{children()}</RoleRoute> }.into_any()
        }
        None => {
            leptos::logging::warn!("page {pattern} mounted without a route table entry");
            view! { <Redirect path=paths::NOT_FOUND/> }.into_any()
        }
    }
}

fn gate_view(decision: GateDecision, children: &ChildrenFn) -> AnyView {
    match decision.redirect_path() {
        Some(path) => view! { <Redirect path=path/> }.into_any(),
        None if decision.is_authorized() => children(),
        None => view! { <LoadingScreen/> }.into_any(),
    }
}

/// Shown while the stored session is being restored.
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <p>"Cargando..."</p>
        </div>
    }
}
