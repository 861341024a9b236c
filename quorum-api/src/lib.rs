use chrono::Utc;

mod auth;
pub use auth::{AuthResponse, AuthToken, Credentials, User, UserId};

mod error;
pub use error::Error;

mod reply;
pub use reply::{CreatedReply, NewReply, Reply, ReplyId};

mod thread;
pub use thread::{CreatedThread, NewThread, Thread, ThreadId};

pub type Time = chrono::DateTime<Utc>;

pub(crate) fn validate_body(what: &str, body: &str) -> Result<(), Error> {
    if body.trim().is_empty() {
        return Err(Error::Invalid(format!("{} must not be empty", what)));
    }
    Ok(())
}

pub(crate) fn validate_author(
    is_anonymous: bool,
    author_name: &Option<String>,
) -> Result<(), Error> {
    match author_name {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ if is_anonymous => Ok(()),
        _ => Err(Error::Invalid(String::from(
            "a name is required when posting non-anonymously",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_listing_roundtrip() {
        let body = r#"[{
            "id": 1,
            "title": "First",
            "body": "hello",
            "author_name": null,
            "is_anonymous": true,
            "created_at": "2024-05-01T10:00:00Z",
            "replies": [{
                "id": 7,
                "thread_id": 1,
                "parent_id": null,
                "body": "hi back",
                "author_name": "ada",
                "is_anonymous": false,
                "created_at": "2024-05-01T10:05:00Z"
            }]
        }]"#;
        let threads: Vec<Thread> = serde_json::from_str(body).unwrap();
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].id, ThreadId(1));
        assert_eq!(threads[0].replies[0].id, ReplyId(7));
        assert_eq!(threads[0].replies[0].parent_id, None);
        assert_eq!(threads[0].replies[0].author_name.as_deref(), Some("ada"));
    }

    #[test]
    fn created_thread_carries_owner_token_and_defaults_replies() {
        // The creation response has no replies member at all
        let body = r#"{
            "id": 3,
            "title": "t",
            "body": "b",
            "author_name": null,
            "is_anonymous": true,
            "created_at": "2024-05-01T10:00:00Z",
            "owner_token": "abc123abc123abc1"
        }"#;
        let created: CreatedThread = serde_json::from_str(body).unwrap();
        assert_eq!(created.owner_token, "abc123abc123abc1");
        assert_eq!(created.thread.id, ThreadId(3));
        assert!(created.thread.replies.is_empty());
    }

    #[test]
    fn auth_response_shape() {
        let body = r#"{
            "access_token": "tok-opaque",
            "user": {"id": 12, "username": "ada", "email": "ada@example.org"}
        }"#;
        let auth: AuthResponse = serde_json::from_str(body).unwrap();
        assert_eq!(auth.access_token, AuthToken(String::from("tok-opaque")));
        assert_eq!(auth.user.id, UserId(12));
    }

    #[test]
    fn new_thread_validation() {
        let mut t = NewThread {
            title: String::from("a title"),
            body: String::from("a body"),
            author_name: None,
            is_anonymous: true,
            owner_token: String::from("0123456789abcdef0123456789abcdef"),
        };
        assert_eq!(t.validate(), Ok(()));

        t.is_anonymous = false;
        assert!(matches!(t.validate(), Err(Error::Invalid(_))));
        t.author_name = Some(String::from("ada"));
        assert_eq!(t.validate(), Ok(()));

        t.title = String::from("   ");
        assert!(matches!(t.validate(), Err(Error::Invalid(_))));
    }

    #[test]
    fn new_reply_validation() {
        let r = NewReply {
            body: String::from(""),
            parent_id: Some(ReplyId(4)),
            author_name: None,
            is_anonymous: true,
            owner_token: String::from("0123456789abcdef0123456789abcdef"),
        };
        assert!(matches!(r.validate(), Err(Error::Invalid(_))));
    }
}
