use quorum_client::Theme;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct SettingsMenuProps {
    pub theme: Theme,
    pub signed_in: bool,
    pub on_toggle_theme: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(SettingsMenu)]
pub fn settings_menu(p: &SettingsMenuProps) -> Html {
    let theme_label = match p.theme {
        Theme::Light => "Switch to dark mode",
        Theme::Dark => "Switch to light mode",
    };
    let logout_item = p.signed_in.then(|| {
        html! {
            <li><a class="dropdown-item" href="#" onclick={p.on_logout.reform(|_| ())}>
                <span class="bi-power me-2" aria-hidden="true"></span>
                { "Sign out" }
            </a></li>
        }
    });
    html! {
        <div class="dropdown">
            <button
                type="button"
                class="btn btn-light btn-circle m-3 bi-btn bi-gear-fill fs-6"
                title="Settings"
                data-bs-toggle="dropdown"
            >
            </button>
            <ul class="dropdown-menu dropdown-menu-dark mt-3">
                <li><a class="dropdown-item" href="#" onclick={p.on_toggle_theme.reform(|_| ())}>
                    <span class="bi-moon me-2" aria-hidden="true"></span>
                    { theme_label }
                </a></li>
                { for logout_item }
            </ul>
        </div>
    }
}
