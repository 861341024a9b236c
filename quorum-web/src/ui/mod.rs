mod app;
pub use app::{App, AppMsg, Route};

mod composer;
pub use composer::{ThreadComposer, ThreadDraft};

mod error_banner;
pub use error_banner::ErrorBanner;

mod login;
pub use login::Login;

mod settings_menu;
pub use settings_menu::SettingsMenu;

mod thread_list;
pub use thread_list::ThreadList;

mod thread_view;
pub use thread_view::{ReplyDraft, ThreadView};
