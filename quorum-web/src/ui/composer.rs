use quorum_client::api::NewThread;
use yew::prelude::*;

/// What the new-thread form produces; the app turns it into a [`NewThread`]
/// by attaching a fresh owner token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreadDraft {
    pub title: String,
    pub body: String,
    pub author_name: Option<String>,
    pub is_anonymous: bool,
}

impl ThreadDraft {
    pub fn into_new_thread(self, owner_token: String) -> NewThread {
        NewThread {
            title: self.title,
            body: self.body,
            author_name: self.author_name,
            is_anonymous: self.is_anonymous,
            owner_token,
        }
    }
}

#[derive(Clone, PartialEq, Properties)]
pub struct ThreadComposerProps {
    pub on_submit: Callback<ThreadDraft>,
}

pub enum ComposerMsg {
    TitleChanged(String),
    BodyChanged(String),
    AuthorChanged(String),
    AnonymousToggled,
    Submit,
}

pub struct ThreadComposer {
    title: String,
    body: String,
    author_name: String,
    is_anonymous: bool,
}

impl Component for ThreadComposer {
    type Message = ComposerMsg;
    type Properties = ThreadComposerProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            author_name: String::new(),
            is_anonymous: true,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ComposerMsg::TitleChanged(t) => self.title = t,
            ComposerMsg::BodyChanged(b) => self.body = b,
            ComposerMsg::AuthorChanged(a) => self.author_name = a,
            ComposerMsg::AnonymousToggled => self.is_anonymous = !self.is_anonymous,
            ComposerMsg::Submit => {
                let author_name =
                    (!self.author_name.trim().is_empty()).then(|| self.author_name.clone());
                ctx.props().on_submit.emit(ThreadDraft {
                    title: self.title.clone(),
                    body: self.body.clone(),
                    author_name,
                    is_anonymous: self.is_anonymous,
                });
                self.title = String::new();
                self.body = String::new();
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        macro_rules! callback_for {
            ($msg:ident) => {
                ctx.link().callback(|e: web_sys::Event| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    ComposerMsg::$msg(input.value())
                })
            };
        }
        let author_field = (!self.is_anonymous).then(|| {
            html! {
                <input
                    type="text"
                    class="form-control mb-2"
                    placeholder="Your name"
                    value={self.author_name.clone()}
                    onchange={callback_for!(AuthorChanged)}
                />
            }
        });
        html! {
            <div class="card mb-3">
                <div class="card-body">
                    <h5 class="card-title">{ "Start a thread" }</h5>
                    <input
                        type="text"
                        class="form-control mb-2"
                        placeholder="Title"
                        value={self.title.clone()}
                        onchange={callback_for!(TitleChanged)}
                    />
                    <textarea
                        class="form-control mb-2"
                        placeholder="What do you want to talk about?"
                        value={self.body.clone()}
                        onchange={ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            ComposerMsg::BodyChanged(input.value())
                        })}
                    >
                    </textarea>
                    <div class="form-check mb-2">
                        <input
                            type="checkbox"
                            class="form-check-input"
                            id="thread-anonymous"
                            checked={self.is_anonymous}
                            onchange={ctx.link().callback(|_| ComposerMsg::AnonymousToggled)}
                        />
                        <label class="form-check-label" for="thread-anonymous">
                            { "Post anonymously" }
                        </label>
                    </div>
                    { for author_field }
                    <button
                        type="button"
                        class="btn btn-primary"
                        onclick={ctx.link().callback(|_| ComposerMsg::Submit)}
                    >
                        { "Post thread" }
                    </button>
                </div>
            </div>
        }
    }
}
