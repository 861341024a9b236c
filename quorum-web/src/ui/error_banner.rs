use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ErrorBannerProps {
    pub message: String,
    pub retryable: bool,
    pub on_dismiss: Callback<()>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(p: &ErrorBannerProps) -> Html {
    let retry_hint = p
        .retryable
        .then(|| html! { <span class="ms-1">{ "You can try again." }</span> });
    html! {
        <div class="alert alert-danger d-flex align-items-center" role="alert">
            <div class="flex-grow-1">
                { &p.message }
                { for retry_hint }
            </div>
            <button
                type="button"
                class="btn-close"
                aria-label="Dismiss"
                onclick={p.on_dismiss.reform(|_| ())}
            >
            </button>
        </div>
    }
}
