use crate::{Error, Reply, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct ThreadId(pub i64);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Thread {
    pub id: ThreadId,
    pub title: String,
    pub body: String,
    pub author_name: Option<String>,
    pub is_anonymous: bool,
    pub created_at: Time,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewThread {
    pub title: String,
    pub body: String,
    pub author_name: Option<String>,
    pub is_anonymous: bool,

    /// Client-generated delete secret; the server echoes it back on creation.
    pub owner_token: String,
}

impl NewThread {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_body("title", &self.title)?;
        crate::validate_body("body", &self.body)?;
        crate::validate_author(self.is_anonymous, &self.author_name)?;
        Ok(())
    }
}

/// Response to a successful thread creation: the thread plus the owner token
/// the server committed to.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CreatedThread {
    #[serde(flatten)]
    pub thread: Thread,
    pub owner_token: String,
}
