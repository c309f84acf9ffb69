//! parque-senderos browser front-end.
//!
//! A client-side rendered Leptos app. The session lives in
//! [`context::AuthContext`]; pages are wrapped in the guards from
//! [`guard`] according to the portal route table.

#![allow(non_snake_case)]

pub mod app;
pub mod context;
pub mod forms;
pub mod guard;
pub mod pages;
#[cfg(feature = "csr")]
pub mod storage;

/// Entry point of the browser build.
///
/// Restores the stored session in the background and mounts the app; the
/// guards show a placeholder until the restore finishes.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn mount() {
    use leptos::prelude::*;
    use std::sync::Arc;

    use parque_client::ClientConfig;

    use crate::app::App;
    use crate::context::AuthContext;
    use crate::storage::BrowserCredentialStore;

    console_error_panic_hook::set_once();

    let config = match ClientConfig::from_build_env() {
        Ok(config) => config,
        Err(err) => {
            leptos::logging::error!("invalid build configuration: {err}");
            return;
        }
    };
    let store = Arc::new(BrowserCredentialStore::default());
    let auth = match AuthContext::from_config(&config, store) {
        Ok(auth) => auth,
        Err(report) => {
            leptos::logging::error!("cannot start without a valid API client: {report}");
            return;
        }
    };

    let restoring = auth.clone();
    leptos::mount::mount_to_body(move || view! { <App auth=auth.clone()/> });

    leptos::task::spawn_local(async move {
        restoring.check_auth().await;
    });
}
