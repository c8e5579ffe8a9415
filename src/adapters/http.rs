use crate::config::DEFAULT_AGGREGATION_PATH;
use crate::domain::model::{AggregationResponse, ItemKind, LikeStatus};
use crate::domain::ports::{AggregationSource, ConfigProvider, LikeService};
use crate::utils::error::{CarouselError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

pub fn kind_segment(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Advertisement => "advertisements",
        ItemKind::JobOffer => "job-offers",
        ItemKind::BusinessOpportunity => "business-opportunities",
    }
}

/// reqwest client for the aggregation read and the like endpoints.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
    aggregation_path: String,
    auth_token: Option<String>,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: Url::parse(base_url)?,
            aggregation_path: DEFAULT_AGGREGATION_PATH.to_string(),
            auth_token: None,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let mut api = Self::new(config.api_base_url(), config.request_timeout())?
            .with_aggregation_path(config.aggregation_path());
        if let Some(token) = config.auth_token() {
            api = api.with_auth_token(token);
        }
        Ok(api)
    }

    pub fn with_aggregation_path(mut self, path: &str) -> Self {
        self.aggregation_path = path.to_string();
        self
    }

    pub fn with_auth_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    pub fn aggregation_url(&self) -> Result<Url> {
        let segments: Vec<&str> = self
            .aggregation_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        self.url_with(&segments)
    }

    pub fn like_url(&self, kind: ItemKind, id: &str, action: &str) -> Result<Url> {
        self.url_with(&[kind_segment(kind), id, action])
    }

    // Appends to the base path so a prefix like /api survives.
    fn url_with(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CarouselError::InvalidConfigValueError {
                field: "source.base_url".to_string(),
                value: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response> {
        let request = match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 {} -> {}", url, status);

        if !status.is_success() {
            return Err(CarouselError::UnexpectedStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn post_action(&self, kind: ItemKind, id: &str, action: &str) -> Result<()> {
        let url = self.like_url(kind, id, action)?;
        self.send(self.client.post(url.clone()), &url).await?;
        Ok(())
    }
}

#[async_trait]
impl AggregationSource for HttpApi {
    async fn fetch_aggregate(&self) -> Result<AggregationResponse> {
        let url = self.aggregation_url()?;
        tracing::debug!("📡 Making aggregation request to: {}", url);

        let response = self.send(self.client.get(url.clone()), &url).await?;
        let body: AggregationResponse = serde_json::from_str(&response.text().await?)?;

        if !body.success {
            return Err(CarouselError::UnsuccessfulResponse {
                endpoint: url.to_string(),
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl LikeService for HttpApi {
    async fn like(&self, kind: ItemKind, id: &str) -> Result<()> {
        self.post_action(kind, id, "like").await
    }

    async fn unlike(&self, kind: ItemKind, id: &str) -> Result<()> {
        match kind {
            ItemKind::Advertisement => self.post_action(kind, id, "unlike").await,
            ItemKind::JobOffer | ItemKind::BusinessOpportunity => {
                Err(CarouselError::UnsupportedAction {
                    kind: kind.to_string(),
                    action: "unlike".to_string(),
                })
            }
        }
    }

    async fn check_like(&self, kind: ItemKind, id: &str) -> Result<LikeStatus> {
        let url = self.like_url(kind, id, "check-like")?;
        let response = self.send(self.client.get(url.clone()), &url).await?;
        Ok(serde_json::from_str(&response.text().await?)?)
    }
}
