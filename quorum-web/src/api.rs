use futures::{pin_mut, select, FutureExt};
use quorum_client::api::{
    AuthResponse, AuthToken, CreatedReply, CreatedThread, Credentials, Error, NewReply, NewThread,
    ReplyId, Thread, ThreadId,
};

/// Bound on every request, so a hung server surfaces as a retryable timeout
/// instead of a spinner forever.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

async fn with_timeout<T>(
    fut: impl std::future::Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    let fut = fut.fuse();
    let deadline = wasm_timer::Delay::new(REQUEST_TIMEOUT).fuse();
    pin_mut!(fut, deadline);
    select! {
        res = fut => res,
        _ = deadline => Err(Error::Timeout),
    }
}

fn net(e: reqwest::Error) -> Error {
    Error::Network(e.to_string())
}

async fn expect_json<T>(resp: reqwest::Response) -> Result<T, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let status = resp.status();
    match status.is_success() {
        true => resp.json().await.map_err(net),
        false => {
            let body = resp.bytes().await.unwrap_or_default();
            Err(Error::from_status(status.as_u16(), &body))
        }
    }
}

async fn expect_success(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    match status.is_success() {
        true => Ok(()),
        false => {
            let body = resp.bytes().await.unwrap_or_default();
            Err(Error::from_status(status.as_u16(), &body))
        }
    }
}

pub async fn list_threads(base: &str) -> Result<Vec<Thread>, Error> {
    with_timeout(async {
        let resp = crate::CLIENT
            .get(format!("{}/threads", base))
            .send()
            .await
            .map_err(net)?;
        expect_json(resp).await
    })
    .await
}

pub async fn create_thread(
    base: &str,
    token: Option<&AuthToken>,
    req: &NewThread,
) -> Result<CreatedThread, Error> {
    with_timeout(async {
        let mut request = crate::CLIENT.post(format!("{}/threads", base)).json(req);
        if let Some(token) = token {
            request = request.bearer_auth(&token.0);
        }
        let resp = request.send().await.map_err(net)?;
        expect_json(resp).await
    })
    .await
}

pub async fn create_reply(
    base: &str,
    token: Option<&AuthToken>,
    thread: ThreadId,
    req: &NewReply,
) -> Result<CreatedReply, Error> {
    with_timeout(async {
        let mut request = crate::CLIENT
            .post(format!("{}/threads/{}/replies", base, thread.0))
            .json(req);
        if let Some(token) = token {
            request = request.bearer_auth(&token.0);
        }
        let resp = request.send().await.map_err(net)?;
        expect_json(resp).await
    })
    .await
}

pub async fn delete_thread(base: &str, thread: ThreadId, owner_token: &str) -> Result<(), Error> {
    with_timeout(async {
        let resp = crate::CLIENT
            .delete(format!("{}/threads/{}", base, thread.0))
            .header("X-Owner-Token", owner_token)
            .send()
            .await
            .map_err(net)?;
        expect_success(resp).await
    })
    .await
}

pub async fn delete_reply(
    base: &str,
    thread: ThreadId,
    reply: ReplyId,
    owner_token: &str,
) -> Result<(), Error> {
    with_timeout(async {
        let resp = crate::CLIENT
            .delete(format!("{}/threads/{}/replies/{}", base, thread.0, reply.0))
            .header("X-Owner-Token", owner_token)
            .send()
            .await
            .map_err(net)?;
        expect_success(resp).await
    })
    .await
}

pub async fn sign_in(base: &str, creds: &Credentials) -> Result<AuthResponse, Error> {
    with_timeout(async {
        let resp = crate::CLIENT
            .post(format!("{}/auth/signin", base))
            .json(creds)
            .send()
            .await
            .map_err(net)?;
        expect_json(resp).await
    })
    .await
}

pub async fn sign_up(base: &str, creds: &Credentials) -> Result<AuthResponse, Error> {
    with_timeout(async {
        let resp = crate::CLIENT
            .post(format!("{}/auth/signup", base))
            .json(creds)
            .send()
            .await
            .map_err(net)?;
        expect_json(resp).await
    })
    .await
}
