use std::{collections::HashSet, rc::Rc};

use quorum_client::api::{Thread, ThreadId};
use yew::prelude::*;

use crate::util;

#[derive(Clone, PartialEq, Properties)]
pub struct ThreadListProps {
    pub threads: Rc<Vec<Thread>>,
    /// Threads this browser may delete (token recorded and session valid).
    pub deletable: Rc<HashSet<ThreadId>>,
    pub on_open: Callback<ThreadId>,
    pub on_delete: Callback<ThreadId>,
}

#[function_component(ThreadList)]
pub fn thread_list(p: &ThreadListProps) -> Html {
    if p.threads.is_empty() {
        return html! { <p class="text-muted">{ "No threads yet. Start the first one!" }</p> };
    }

    let items = p.threads.iter().map(|t| {
        let id = t.id;
        let delete_button = p.deletable.contains(&id).then(|| {
            html! {
                <button
                    type="button"
                    class="btn bi-btn bi-trash"
                    aria-label="Delete thread"
                    onclick={p.on_delete.reform(move |_| id)}
                >
                </button>
            }
        });
        let reply_count = match t.replies.len() {
            1 => String::from("1 reply"),
            n => format!("{} replies", n),
        };
        html! {
            <li class="list-group-item d-flex align-items-center">
                <div class="flex-grow-1">
                    <a href="#" class="fs-5" onclick={p.on_open.reform(move |_| id)}>
                        { &t.title }
                    </a>
                    <div class="text-muted">
                        { format!(
                            "{}, {}, {}",
                            util::author_label(&t.author_name, t.is_anonymous),
                            util::format_time(&t.created_at),
                            reply_count,
                        ) }
                    </div>
                </div>
                { for delete_button }
            </li>
        }
    });

    html! {
        <ul class="thread-list list-group">
            { for items }
        </ul>
    }
}
