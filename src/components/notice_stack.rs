//! Notice Stack Component
//!
//! Toasts for the core's notice queue, dismissed after the configured timeout
//! or on click.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_sync::Notice;

use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn NoticeStack() -> impl IntoView {
    let store = use_ui_store();

    view! {
        <div class="notice-stack">
            <For
                each=move || store.notices().get()
                key=|notice: &Notice| notice.id
                children=move |notice| view! { <NoticeToast notice=notice /> }
            />
        </div>
    }
}

#[component]
fn NoticeToast(notice: Notice) -> impl IntoView {
    let ctx = use_app_context();
    let id = notice.id;

    let dismiss = move || {
        ctx.core().state.borrow_mut().notices.dismiss(id);
        ctx.refresh();
    };

    let timeout = ctx.core().config.notice_timeout_ms;
    spawn_local(async move {
        TimeoutFuture::new(timeout).await;
        dismiss();
    });

    view! {
        <div class=format!("notice notice-{}", notice.level.as_str()) on:click=move |_| dismiss()>
            {notice.message}
        </div>
    }
}
