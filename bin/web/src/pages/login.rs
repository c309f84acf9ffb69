//! Login page.
//!
//! Mounted behind `PublicRoute`: once the login succeeds the guard
//! redirects to the user's landing page.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use parque_access::paths;

use crate::context::{session_error_message, use_auth};
use crate::forms::{FieldErrors, LoginForm};
use crate::pages::field::TextField;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let failure = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };

        errors.set(FieldErrors::new());
        failure.set(None);
        pending.set(true);
        let auth = auth.clone();
        spawn_local(async move {
            if let Err(report) = auth.login(&credentials).await {
                failure.set(Some(session_error_message(report.current_context())));
                pending.set(false);
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"Iniciar sesión"</h1>
                <form on:submit=on_submit>
                    <TextField label="Email" name="email" kind="email" value=email errors=errors/>
                    <TextField label="Contraseña" name="password" kind="password" value=password errors=errors/>
                    {move || failure.get().map(|message| view! { <p class="form-error">{message}</p> })}
                    <button type="submit" class="login-button" disabled=move || pending.get()>
                        {move || if pending.get() { "Ingresando..." } else { "Ingresar" }}
                    </button>
                </form>
                <p>
                    "¿No tienes cuenta? "
                    <a href=paths::REGISTER>"Regístrate"</a>
                </p>
            </div>
        </div>
    }
}
