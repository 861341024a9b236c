use lazy_static::lazy_static;

mod api;
mod storage;
mod ui;
mod util;

lazy_static! {
    pub static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

/// Base URL of the board API, overridable at build time so a deployment can
/// point the bundle at its own backend.
pub fn api_base() -> &'static str {
    option_env!("QUORUM_API_URL").unwrap_or("http://localhost:8000")
}

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<ui::App>::new().render();
}
