//! Progress Bar Component

use leptos::prelude::*;

/// Horizontal bar with a rounded percentage label
#[component]
pub fn ProgressBar(#[prop(into)] percent: Signal<u32>) -> impl IntoView {
    view! {
        <div class="progress">
            <div class="progress-track">
                <div
                    class=move || { if percent.get() >= 100 { "progress-fill done" } else { "progress-fill" } }
                    style=move || format!("width: {}%;", percent.get())
                ></div>
            </div>
            <span class="progress-label">{move || format!("{}%", percent.get())}</span>
        </div>
    }
}
