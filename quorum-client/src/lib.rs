mod seq;
pub use seq::{Generation, RefreshSequence};

mod store;
pub use store::{MemoryState, Owned, Session, StateStore, Store, Theme};

mod token;
pub use token::generate_owner_token;

mod tree;
pub use tree::ReplyTree;

pub mod api {
    pub use quorum_api::*;
}
