use crate::{Error, ThreadId, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct ReplyId(pub i64);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Reply {
    pub id: ReplyId,
    pub thread_id: ThreadId,

    /// `None` means this reply sits directly under the thread.
    pub parent_id: Option<ReplyId>,

    pub body: String,
    pub author_name: Option<String>,
    pub is_anonymous: bool,
    pub created_at: Time,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewReply {
    pub body: String,
    pub parent_id: Option<ReplyId>,
    pub author_name: Option<String>,
    pub is_anonymous: bool,

    /// Client-generated delete secret; the server echoes it back on creation.
    pub owner_token: String,
}

impl NewReply {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_body("body", &self.body)?;
        crate::validate_author(self.is_anonymous, &self.author_name)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CreatedReply {
    #[serde(flatten)]
    pub reply: Reply,
    pub owner_token: String,
}
