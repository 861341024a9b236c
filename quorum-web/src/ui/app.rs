use std::{collections::HashSet, rc::Rc};

use quorum_client::{
    api::{
        AuthResponse, CreatedReply, CreatedThread, Credentials, Error, ReplyId, Thread, ThreadId,
    },
    Generation, Owned, RefreshSequence, Store, Theme,
};
use yew::prelude::*;

use crate::{
    api,
    storage::BrowserState,
    ui,
    ui::{ReplyDraft, ThreadDraft},
};

/// Whether mutations require a signed-in session. Flipping this to false
/// turns the app into its anonymous-only variant.
const AUTH_REQUIRED: bool = true;

#[derive(Clone, Copy, Eq, PartialEq)]
pub enum Route {
    List,
    Thread(ThreadId),
    Login,
}

pub enum AppMsg {
    Refresh,
    ThreadsLoaded(Generation, Result<Vec<Thread>, Error>),

    Open(ThreadId),
    GoToList,
    GoToLogin,

    SubmitThread(ThreadDraft),
    ThreadCreated(Result<CreatedThread, Error>),
    SubmitReply(ThreadId, ReplyDraft),
    ReplyCreated(Result<CreatedReply, Error>),

    DeleteThread(ThreadId),
    ThreadDeleted(ThreadId, Result<(), Error>),
    DeleteReply(ThreadId, ReplyId),
    ReplyDeleted(ReplyId, Result<(), Error>),

    SignIn(Credentials),
    SignUp(Credentials),
    AuthDone(Result<AuthResponse, Error>),
    Logout,

    ToggleTheme,
    DismissError,
}

pub struct App {
    store: Store<BrowserState>,
    threads: Rc<Vec<Thread>>,
    refresh: RefreshSequence,
    route: Route,
    loading: bool,
    error: Option<Error>,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let store = Store::load(BrowserState, AUTH_REQUIRED);
        apply_theme(store.theme());
        ctx.link().send_message(AppMsg::Refresh);
        App {
            store,
            threads: Rc::new(Vec::new()),
            refresh: RefreshSequence::new(),
            route: Route::List,
            loading: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Refresh => {
                let generation = self.refresh.begin();
                self.loading = true;
                ctx.link().send_future(async move {
                    AppMsg::ThreadsLoaded(generation, api::list_threads(crate::api_base()).await)
                });
            }
            AppMsg::ThreadsLoaded(generation, res) => {
                if !self.refresh.admit(generation) {
                    tracing::debug!("discarding thread list superseded by a newer refresh");
                    return false;
                }
                self.loading = false;
                match res {
                    Ok(threads) => self.threads = Rc::new(threads),
                    Err(e) => self.error = Some(e),
                }
            }

            AppMsg::Open(id) => self.route = Route::Thread(id),
            AppMsg::GoToList => self.route = Route::List,
            AppMsg::GoToLogin => self.route = Route::Login,

            AppMsg::SubmitThread(draft) => {
                let token = match self.store.require_session() {
                    Ok(t) => t.cloned(),
                    Err(e) => {
                        self.error = Some(e);
                        return true;
                    }
                };
                let req = draft.into_new_thread(quorum_client::generate_owner_token());
                if let Err(e) = req.validate() {
                    self.error = Some(e);
                    return true;
                }
                self.error = None;
                ctx.link().send_future(async move {
                    AppMsg::ThreadCreated(
                        api::create_thread(crate::api_base(), token.as_ref(), &req).await,
                    )
                });
            }
            AppMsg::ThreadCreated(res) => match res {
                Ok(created) => {
                    // only a confirmed create registers delete capability
                    self.store
                        .record_ownership(Owned::Thread(created.thread.id), created.owner_token);
                    ctx.link().send_message(AppMsg::Refresh);
                }
                Err(e) => self.error = Some(e),
            },

            AppMsg::SubmitReply(thread_id, draft) => {
                let token = match self.store.require_session() {
                    Ok(t) => t.cloned(),
                    Err(e) => {
                        self.error = Some(e);
                        return true;
                    }
                };
                let req = draft.into_new_reply(quorum_client::generate_owner_token());
                if let Err(e) = req.validate() {
                    self.error = Some(e);
                    return true;
                }
                self.error = None;
                ctx.link().send_future(async move {
                    AppMsg::ReplyCreated(
                        api::create_reply(crate::api_base(), token.as_ref(), thread_id, &req).await,
                    )
                });
            }
            AppMsg::ReplyCreated(res) => match res {
                Ok(created) => {
                    self.store
                        .record_ownership(Owned::Reply(created.reply.id), created.owner_token);
                    ctx.link().send_message(AppMsg::Refresh);
                }
                Err(e) => self.error = Some(e),
            },

            AppMsg::DeleteThread(id) => {
                let owner_token = match self.store.require_owner_token(Owned::Thread(id)) {
                    Ok(t) => String::from(t),
                    Err(e) => {
                        self.error = Some(e);
                        return true;
                    }
                };
                self.error = None;
                ctx.link().send_future(async move {
                    AppMsg::ThreadDeleted(
                        id,
                        api::delete_thread(crate::api_base(), id, &owner_token).await,
                    )
                });
            }
            AppMsg::ThreadDeleted(id, res) => match res {
                Ok(()) => {
                    self.store.forget_ownership(Owned::Thread(id));
                    if self.route == Route::Thread(id) {
                        self.route = Route::List;
                    }
                    ctx.link().send_message(AppMsg::Refresh);
                }
                // the token is kept so the user can retry
                Err(e) => self.error = Some(e),
            },

            AppMsg::DeleteReply(thread_id, reply_id) => {
                let owner_token = match self.store.require_owner_token(Owned::Reply(reply_id)) {
                    Ok(t) => String::from(t),
                    Err(e) => {
                        self.error = Some(e);
                        return true;
                    }
                };
                self.error = None;
                ctx.link().send_future(async move {
                    AppMsg::ReplyDeleted(
                        reply_id,
                        api::delete_reply(crate::api_base(), thread_id, reply_id, &owner_token)
                            .await,
                    )
                });
            }
            AppMsg::ReplyDeleted(reply_id, res) => match res {
                Ok(()) => {
                    self.store.forget_ownership(Owned::Reply(reply_id));
                    ctx.link().send_message(AppMsg::Refresh);
                }
                Err(e) => self.error = Some(e),
            },

            AppMsg::SignIn(creds) => {
                self.error = None;
                ctx.link().send_future(async move {
                    AppMsg::AuthDone(api::sign_in(crate::api_base(), &creds).await)
                });
            }
            AppMsg::SignUp(creds) => {
                self.error = None;
                ctx.link().send_future(async move {
                    AppMsg::AuthDone(api::sign_up(crate::api_base(), &creds).await)
                });
            }
            AppMsg::AuthDone(res) => match res {
                Ok(auth) => {
                    self.store.set_session(auth.access_token, auth.user);
                    self.route = Route::List;
                }
                // a failed attempt leaves us signed out, nothing to roll back
                Err(e) => self.error = Some(e),
            },
            AppMsg::Logout => {
                self.store.clear_session();
                self.route = Route::List;
            }

            AppMsg::ToggleTheme => apply_theme(self.store.toggle_theme()),
            AppMsg::DismissError => self.error = None,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let session_controls = match self.store.session() {
            Some(s) => html! {
                <span class="navbar-text me-2">{ format!("Signed in as {}", s.user.username) }</span>
            },
            None => html! {
                <button
                    type="button"
                    class="btn btn-outline-primary"
                    onclick={link.callback(|_| AppMsg::GoToLogin)}
                >
                    { "Sign in" }
                </button>
            },
        };
        let header = html! {
            <nav class="navbar d-flex align-items-center mb-3">
                <a class="navbar-brand fs-3" href="#" onclick={link.callback(|_| AppMsg::GoToList)}>
                    { "Quorum" }
                </a>
                <div class="d-flex align-items-center">
                    <button
                        type="button"
                        class="btn bi-btn bi-arrow-clockwise"
                        title="Refresh"
                        onclick={link.callback(|_| AppMsg::Refresh)}
                    >
                    </button>
                    { session_controls }
                    <ui::SettingsMenu
                        theme={self.store.theme()}
                        signed_in={self.store.signed_in()}
                        on_toggle_theme={link.callback(|_| AppMsg::ToggleTheme)}
                        on_logout={link.callback(|_| AppMsg::Logout)}
                    />
                </div>
            </nav>
        };

        let error_banner = self.error.as_ref().map(|e| {
            html! {
                <ui::ErrorBanner
                    message={e.to_string()}
                    retryable={e.is_retryable()}
                    on_dismiss={link.callback(|_| AppMsg::DismissError)}
                />
            }
        });

        let content = match self.route {
            Route::Login => html! {
                <ui::Login
                    on_sign_in={link.callback(AppMsg::SignIn)}
                    on_sign_up={link.callback(AppMsg::SignUp)}
                    on_cancel={link.callback(|_| AppMsg::GoToList)}
                />
            },
            Route::List => {
                let deletable = Rc::new(
                    self.threads
                        .iter()
                        .filter(|t| self.store.can_delete(Owned::Thread(t.id)))
                        .map(|t| t.id)
                        .collect::<HashSet<_>>(),
                );
                let loading_spinner = self.loading.then(|| {
                    html! { <div class="spinner-border spinner-border-sm mb-2" role="status"></div> }
                });
                html! {<>
                    { for loading_spinner }
                    <ui::ThreadComposer on_submit={link.callback(AppMsg::SubmitThread)} />
                    <ui::ThreadList
                        threads={self.threads.clone()}
                        deletable={deletable}
                        on_open={link.callback(AppMsg::Open)}
                        on_delete={link.callback(AppMsg::DeleteThread)}
                    />
                </>}
            }
            Route::Thread(id) => match self.threads.iter().find(|t| t.id == id) {
                Some(thread) => {
                    let deletable_replies = Rc::new(
                        thread
                            .replies
                            .iter()
                            .filter(|r| self.store.can_delete(Owned::Reply(r.id)))
                            .map(|r| r.id)
                            .collect::<HashSet<_>>(),
                    );
                    html! {
                        <ui::ThreadView
                            thread={thread.clone()}
                            deletable_replies={deletable_replies}
                            can_delete_thread={self.store.can_delete(Owned::Thread(id))}
                            on_reply={link.callback(move |draft| AppMsg::SubmitReply(id, draft))}
                            on_delete_reply={link.callback(move |rid| AppMsg::DeleteReply(id, rid))}
                            on_delete_thread={link.callback(move |_| AppMsg::DeleteThread(id))}
                            on_back={link.callback(|_| AppMsg::GoToList)}
                        />
                    }
                }
                None => html! { <p class="text-muted">{ "This thread no longer exists." }</p> },
            },
        };

        html! {
            <div class="container">
                { header }
                { for error_banner }
                { content }
            </div>
        }
    }
}

fn apply_theme(theme: Theme) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    match body {
        Some(body) => body.set_class_name(theme.css_class()),
        None => tracing::warn!("no document body to apply the theme to"),
    }
}
