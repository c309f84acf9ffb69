//! Visitor registration page.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use parque_access::paths;

use crate::context::{session_error_message, use_auth};
use crate::forms::{FieldErrors, RegistrationForm};
use crate::pages::field::TextField;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let national_id = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let failure = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let form = RegistrationForm {
            national_id: national_id.get_untracked(),
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            phone: phone.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        let registration = match form.validate() {
            Ok(registration) => registration,
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
            if let Err(report) = auth.register_visitor(&registration).await {
                failure.set(Some(session_error_message(report.current_context())));
                pending.set(false);
            }
        });
    };

    view! {
        <div class="register-page">
            <h1>"Crear cuenta"</h1>
            <p>"Regístrate para reservar tus recorridos."</p>
            <form on:submit=on_submit>
                <TextField label="Cédula" name="cedula" value=national_id errors=errors/>
                <TextField label="Teléfono" name="telefono" kind="tel" value=phone errors=errors/>
                <TextField label="Nombre" name="nombre" value=first_name errors=errors/>
                <TextField label="Apellido" name="apellido" value=last_name errors=errors/>
                <TextField label="Email" name="email" kind="email" value=email errors=errors/>
                <TextField label="Contraseña" name="password" kind="password" value=password errors=errors/>
                <TextField
                    label="Confirmar contraseña"
                    name="confirmPassword"
                    kind="password"
                    value=confirm_password
                    errors=errors
                />
                {move || failure.get().map(|message| view! { <p class="form-error">{message}</p> })}
                <button type="submit" disabled=move || pending.get()>"Crear cuenta"</button>
            </form>
            <p>
                "¿Ya tienes cuenta? "
                <a href=paths::LOGIN>"Inicia sesión"</a>
            </p>
        </div>
    }
}
