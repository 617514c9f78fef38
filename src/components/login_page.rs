//! Login Page Component
//!
//! Sign-in and registration form sharing one set of fields.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_sync::Registration;

use crate::context::use_app_context;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();

    let (is_login, set_is_login) = signal(true);
    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        let login_mode = is_login.get_untracked();
        let form = Registration {
            full_name: full_name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let core = ctx.core();

        spawn_local(async move {
            if login_mode {
                match core.auth.login(&form.email, &form.password).await {
                    Ok(next) => ctx.navigate(next),
                    Err(err) => set_error.set(Some(err.to_string())),
                }
                return;
            }

            match core.auth.register(&form).await {
                Ok(()) => {
                    set_is_login.set(true);
                    set_full_name.set(String::new());
                    set_email.set(String::new());
                    set_password.set(String::new());
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
            ctx.refresh();
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>{move || if is_login.get() { "Welcome back" } else { "Create account" }}</h1>

                <Show when=move || !is_login.get()>
                    <input
                        type="text"
                        placeholder="Full name"
                        prop:value=move || full_name.get()
                        on:input=move |ev| set_full_name.set(event_target_value(&ev))
                    />
                </Show>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                {move || error.get().map(|msg| view! { <p class="auth-error">{msg}</p> })}

                <button type="submit">{move || if is_login.get() { "Sign in" } else { "Sign up" }}</button>
                <button
                    type="button"
                    class="link-btn"
                    on:click=move |_| {
                        set_is_login.update(|v| *v = !*v);
                        set_error.set(None);
                    }
                >
                    {move || if is_login.get() { "No account? Sign up" } else { "Already registered? Sign in" }}
                </button>
            </form>
        </div>
    }
}
