use crate::error::{ApiError, ApiResult};
use crate::types::{CommandReply, CommandRequest};
use futures::future::BoxFuture;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str =
    "https://4ntchrutj1.execute-api.us-east-2.amazonaws.com/default/fan-controller-handler";
const DEFAULT_USER_AGENT: &str = "fan-ctl/0.1";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends one command request and yields the parsed reply.
///
/// The returned future is `'static` so the panel can move it onto its own
/// task; implementations clone whatever handles they need up front.
pub trait CommandTransport: Send + Sync {
    fn send_command(&self, request: CommandRequest) -> BoxFuture<'static, ApiResult<CommandReply>>;
}

#[derive(Debug, Clone)]
pub struct EndpointOptions {
    pub url: String,
    pub connect_timeout: Duration,
    /// `None` waits for the reply indefinitely.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for EndpointOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub fn parse_endpoint(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidEndpoint(format!("{raw}: {e}")))?;
    match url.scheme() {
        "https" | "http" => Ok(url),
        other => Err(ApiError::InvalidEndpoint(format!(
            "{raw}: unsupported scheme {other}"
        ))),
    }
}

/// HTTP transport for the fan controller handler.
#[derive(Clone)]
pub struct FanApi {
    client: Client,
    endpoint: Url,
}

impl FanApi {
    pub fn new(options: &EndpointOptions) -> ApiResult<Self> {
        let endpoint = parse_endpoint(&options.url)?;
        if endpoint.scheme() != "https" {
            tracing::warn!(endpoint = %endpoint, "Fan controller endpoint is not using HTTPS");
        }

        let mut builder = Client::builder()
            .user_agent(options.user_agent.clone())
            .connect_timeout(options.connect_timeout);
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn post_command(&self, request: &CommandRequest) -> ApiResult<CommandReply> {
        tracing::debug!(command = %request.message, "Posting fan command");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        // The handler reports its own status in the body, so the HTTP status
        // only matters for logging.
        let http_status = response.status();
        let text = response.text().await?;
        tracing::debug!(%http_status, "Fan controller replied");

        CommandReply::parse(&text)
    }
}

impl CommandTransport for FanApi {
    fn send_command(&self, request: CommandRequest) -> BoxFuture<'static, ApiResult<CommandReply>> {
        let api = self.clone();
        Box::pin(async move { api.post_command(&request).await })
    }
}
