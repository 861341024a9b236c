use std::{collections::HashSet, rc::Rc};

use quorum_client::{
    api::{NewReply, Reply, ReplyId, Thread},
    ReplyTree,
};
use yew::prelude::*;

use crate::util;

/// What the reply composer produces; the app turns it into a [`NewReply`] by
/// attaching a fresh owner token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReplyDraft {
    pub body: String,
    pub parent_id: Option<ReplyId>,
    pub author_name: Option<String>,
    pub is_anonymous: bool,
}

impl ReplyDraft {
    pub fn into_new_reply(self, owner_token: String) -> NewReply {
        NewReply {
            body: self.body,
            parent_id: self.parent_id,
            author_name: self.author_name,
            is_anonymous: self.is_anonymous,
            owner_token,
        }
    }
}

#[derive(Clone, PartialEq, Properties)]
pub struct ThreadViewProps {
    pub thread: Thread,
    /// Replies this browser may delete (token recorded and session valid).
    pub deletable_replies: Rc<HashSet<ReplyId>>,
    pub can_delete_thread: bool,
    pub on_reply: Callback<ReplyDraft>,
    pub on_delete_reply: Callback<ReplyId>,
    pub on_delete_thread: Callback<()>,
    pub on_back: Callback<()>,
}

pub enum ThreadViewMsg {
    BodyChanged(String),
    AuthorChanged(String),
    AnonymousToggled,
    ReplyTo(Option<ReplyId>),
    Submit,
}

/// Shows one thread with its reply forest indented by depth, plus a single
/// reply composer that can be retargeted at any reply.
pub struct ThreadView {
    body: String,
    author_name: String,
    is_anonymous: bool,
    reply_to: Option<ReplyId>,
}

impl Component for ThreadView {
    type Message = ThreadViewMsg;
    type Properties = ThreadViewProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            body: String::new(),
            author_name: String::new(),
            is_anonymous: true,
            reply_to: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ThreadViewMsg::BodyChanged(b) => self.body = b,
            ThreadViewMsg::AuthorChanged(a) => self.author_name = a,
            ThreadViewMsg::AnonymousToggled => self.is_anonymous = !self.is_anonymous,
            ThreadViewMsg::ReplyTo(parent) => self.reply_to = parent,
            ThreadViewMsg::Submit => {
                let author_name =
                    (!self.author_name.trim().is_empty()).then(|| self.author_name.clone());
                ctx.props().on_reply.emit(ReplyDraft {
                    body: self.body.clone(),
                    parent_id: self.reply_to,
                    author_name,
                    is_anonymous: self.is_anonymous,
                });
                self.body = String::new();
                self.reply_to = None;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let thread = &ctx.props().thread;

        let delete_button = ctx.props().can_delete_thread.then(|| {
            html! {
                <button
                    type="button"
                    class="btn bi-btn bi-trash"
                    aria-label="Delete thread"
                    onclick={ctx.props().on_delete_thread.reform(|_| ())}
                >
                </button>
            }
        });

        // Rebuilt on every render: the tree is a pure function of the reply
        // collection we were handed.
        let tree = ReplyTree::build(&thread.replies);
        let replies = tree
            .walk()
            .into_iter()
            .map(|(r, depth)| self.view_reply(ctx, r, depth))
            .collect::<Html>();

        html! {<>
            <button
                type="button"
                class="btn btn-link ps-0"
                onclick={ctx.props().on_back.reform(|_| ())}
            >
                { "Back to all threads" }
            </button>
            <div class="card mb-3">
                <div class="card-body">
                    <div class="d-flex align-items-center">
                        <h2 class="flex-grow-1">{ &thread.title }</h2>
                        { for delete_button }
                    </div>
                    <div class="text-muted">
                        { format!(
                            "{}, {}",
                            util::author_label(&thread.author_name, thread.is_anonymous),
                            util::format_time(&thread.created_at),
                        ) }
                    </div>
                    <p class="mt-2 mb-0">{ &thread.body }</p>
                </div>
            </div>
            { replies }
            { self.view_composer(ctx) }
        </>}
    }
}

impl ThreadView {
    fn view_reply(&self, ctx: &Context<Self>, r: &Reply, depth: usize) -> Html {
        let id = r.id;
        let replying_here = self.reply_to == Some(id);
        let delete_button = ctx.props().deletable_replies.contains(&id).then(|| {
            html! {
                <button
                    type="button"
                    class="btn btn-sm bi-btn bi-trash"
                    aria-label="Delete reply"
                    onclick={ctx.props().on_delete_reply.reform(move |_| id)}
                >
                </button>
            }
        });
        html! {
            <div class="reply card my-2" style={format!("margin-left: {}rem;", 2 * depth)}>
                <div class="card-body py-2">
                    <div class="text-muted">
                        { format!(
                            "{}, {}",
                            util::author_label(&r.author_name, r.is_anonymous),
                            util::format_time(&r.created_at),
                        ) }
                    </div>
                    <p class="mb-1">{ &r.body }</p>
                    <button
                        type="button"
                        class="btn btn-sm btn-link ps-0"
                        onclick={ctx.link().callback(move |_| {
                            ThreadViewMsg::ReplyTo(match replying_here {
                                true => None,
                                false => Some(id),
                            })
                        })}
                    >
                        { if replying_here { "Cancel reply" } else { "Reply" } }
                    </button>
                    { for delete_button }
                </div>
            </div>
        }
    }

    fn view_composer(&self, ctx: &Context<Self>) -> Html {
        let target = match self.reply_to {
            Some(id) => format!("Replying to reply #{}", id.0),
            None => String::from("Replying to the thread"),
        };
        let author_field = (!self.is_anonymous).then(|| {
            html! {
                <input
                    type="text"
                    class="form-control mb-2"
                    placeholder="Your name"
                    value={self.author_name.clone()}
                    onchange={ctx.link().callback(|e: web_sys::Event| {
                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                        ThreadViewMsg::AuthorChanged(input.value())
                    })}
                />
            }
        });
        html! {
            <div class="card mt-3">
                <div class="card-body">
                    <div class="text-muted mb-2">{ target }</div>
                    <textarea
                        class="form-control mb-2"
                        placeholder="Write a reply"
                        value={self.body.clone()}
                        onchange={ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            ThreadViewMsg::BodyChanged(input.value())
                        })}
                    >
                    </textarea>
                    <div class="form-check mb-2">
                        <input
                            type="checkbox"
                            class="form-check-input"
                            id="reply-anonymous"
                            checked={self.is_anonymous}
                            onchange={ctx.link().callback(|_| ThreadViewMsg::AnonymousToggled)}
                        />
                        <label class="form-check-label" for="reply-anonymous">
                            { "Post anonymously" }
                        </label>
                    </div>
                    { for author_field }
                    <button
                        type="button"
                        class="btn btn-primary"
                        onclick={ctx.link().callback(|_| ThreadViewMsg::Submit)}
                    >
                        { "Post reply" }
                    </button>
                </div>
            </div>
        }
    }
}
