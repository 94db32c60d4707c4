use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use url::Url;

use engine_logging::{engine_debug, engine_info};
use shedu_core::AccessCode;

use crate::config::EngineConfig;
use crate::decode::decode_html;
use crate::page::parse_access_page;
use crate::types::{map_reqwest_error, FailureKind, ResolveError, Resolution};
use crate::EngineError;

#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, code: &AccessCode) -> Result<Resolution, ResolveError>;
}

/// Exchanges a code for the access page with a single form POST.
#[derive(Debug, Clone)]
pub struct ReqwestResolver {
    client: reqwest::Client,
    base_url: Url,
    access_url: Url,
    user_agent: String,
}

impl ReqwestResolver {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let base_url = Url::parse(&config.base_url)?;
        let access_url = base_url.join(&config.access_path)?;
        let client = reqwest::Client::builder()
            .connect_timeout(config.resolve_timeout)
            .timeout(config.resolve_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            access_url,
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Resolver for ReqwestResolver {
    async fn resolve(&self, code: &AccessCode) -> Result<Resolution, ResolveError> {
        let code = code.as_str();
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("code", code)
            .finish();

        engine_debug!("POST {} code={}", self.access_url, code);
        let response = self
            .client
            .post(self.access_url.clone())
            .header(USER_AGENT, self.user_agent.as_str())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|err| ResolveError::new(code, map_reqwest_error(&err), err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::new(
                code,
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ResolveError::new(code, map_reqwest_error(&err), err.to_string()))?;

        let decoded = decode_html(&bytes, content_type.as_deref())
            .map_err(|err| ResolveError::new(code, FailureKind::Decode, err.to_string()))?;
        let page = parse_access_page(&decoded.html, &self.base_url);

        engine_info!(
            "Resolved code={} encoding={} title={:?} links={}",
            code,
            decoded.encoding_label,
            page.title,
            page.links.len()
        );

        Ok(Resolution {
            code: code.to_string(),
            title: page.title,
            links: page.links,
        })
    }
}
