//! Theme Picker Component

use leptos::prelude::*;
use registry_core::domain::THEME_PALETTE;

/// Row of color swatches from the theme palette
#[component]
pub fn ThemePicker(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_pick: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="theme-picker">
            {THEME_PALETTE.iter().map(|(name, color)| {
                let color = color.to_string();
                let selected = color.clone();
                let picked = color.clone();
                view! {
                    <button
                        type="button"
                        title=*name
                        class=move || if value.get() == selected { "theme-swatch selected" } else { "theme-swatch" }
                        style=format!("background-color: {}", color)
                        on:click=move |_| on_pick.run(picked.clone())
                    ></button>
                }
            }).collect_view()}
        </div>
    }
}
