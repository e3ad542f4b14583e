//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    Credentials, MessageBody, OutboundResult, ProviderError, RawPhoneNumber, SendSms,
    ValidationError,
};
use crate::transport::{DecodeError, encode_send_sms_form, normalize_outbound_response};

const DEFAULT_BASE_URL: &str = "https://api.twilio.com/2010-04-01";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

#[derive(Debug, Clone, Copy)]
struct BasicAuth<'a> {
    username: &'a str,
    password: &'a str,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: BasicAuth<'a>,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: BasicAuth<'a>,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .basic_auth(auth.username, Some(auth.password))
                .header(reqwest::header::ACCEPT, "application/json")
                .timeout(self.timeout)
                .form(&params)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TwilioClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - provider-level failures (error payloads with a non-zero `code`),
/// - validation/decode failures.
pub enum TwilioError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code without a recognisable Twilio error payload.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Twilio answered with an error payload.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this when you need to customize the API base URL, timeout, or user-agent.
pub struct TwilioClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl TwilioClientBuilder {
    /// Create a builder with the default base URL and a 10 second timeout.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the API base URL (`https://api.twilio.com/2010-04-01`).
    ///
    /// `Accounts/{sid}/Messages.json` is appended to it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TwilioClient`].
    pub fn build(self) -> Result<TwilioClient, TwilioError> {
        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TwilioError::Transport(Box::new(err)))?;

        Ok(TwilioClient {
            credentials: self.credentials,
            base_url: self.base_url,
            http: Arc::new(ReqwestTransport {
                client,
                timeout: self.timeout,
            }),
        })
    }
}

#[derive(Clone)]
/// High-level client for the Messages endpoint.
///
/// Sends `To`, `From` and `Body` as a form to `{base_url}/Accounts/{sid}/Messages.json`,
/// authenticated with the account SID and auth token.
pub struct TwilioClient {
    credentials: Credentials,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl TwilioClient {
    /// Create a client using the default base URL and timeout.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
                timeout: DEFAULT_TIMEOUT,
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> TwilioClientBuilder {
        TwilioClientBuilder::new(credentials)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn messages_endpoint(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            self.credentials.account_sid().as_str()
        )
    }

    /// Send one SMS.
    ///
    /// Errors:
    /// - [`TwilioError::Provider`] when Twilio returns an error payload,
    /// - [`TwilioError::HttpStatus`] for any other non-2xx HTTP response,
    /// - [`TwilioError::Decode`] when a 2xx body cannot be decoded.
    pub async fn send_sms(&self, request: SendSms) -> Result<OutboundResult, TwilioError> {
        let url = self.messages_endpoint();
        let params = encode_send_sms_form(&request, self.credentials.phone_number());
        let auth = BasicAuth {
            username: self.credentials.account_sid().as_str(),
            password: self.credentials.auth_token().as_str(),
        };

        tracing::debug!(url = %url, to = request.to().raw(), "sending SMS");

        let response = self
            .http
            .post_form(&url, auth, params)
            .await
            .map_err(TwilioError::Transport)?;
        let is_success = (200..=299).contains(&response.status);

        let result = match normalize_outbound_response(response.body.as_bytes()) {
            Ok(result) => result,
            Err(err) if is_success => return Err(TwilioError::Decode(err)),
            Err(_) => return Err(http_status_error(response)),
        };

        if let Err(mut err) = result.check_error() {
            err.http_status = err.http_status.or(Some(response.status));
            tracing::warn!(
                code = err.code,
                http_status = response.status,
                "Twilio rejected message"
            );
            return Err(TwilioError::Provider(err));
        }

        // Error payloads with `code: 0` still fail on their HTTP status.
        if !is_success {
            return Err(http_status_error(response));
        }

        Ok(result)
    }

    /// Validate `to` and `body`, then [`TwilioClient::send_sms`] from the default number.
    pub async fn send_text(
        &self,
        to: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<OutboundResult, TwilioError> {
        let request = SendSms::new(RawPhoneNumber::new(to)?, MessageBody::new(body)?);
        self.send_sms(request).await
    }
}

fn http_status_error(response: HttpResponse) -> TwilioError {
    tracing::warn!(status = response.status, "unexpected HTTP status from Twilio");
    let body = if response.body.trim().is_empty() {
        None
    } else {
        Some(response.body)
    };
    TwilioError::HttpStatus {
        status: response.status,
        body,
    }
}
