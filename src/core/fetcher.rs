use crate::domain::model::AggregationResponse;
use crate::domain::ports::AggregationSource;

#[derive(Debug)]
pub enum FetchOutcome {
    Live(AggregationResponse),
    Unavailable { reason: String },
}

/// Wraps the aggregation source so that no failure reaches the caller.
/// One call per load, no retry.
pub struct Fetcher<A: AggregationSource> {
    source: A,
}

impl<A: AggregationSource> Fetcher<A> {
    pub fn new(source: A) -> Self {
        Self { source }
    }

    pub async fn fetch(&self) -> FetchOutcome {
        let response = match self.source.fetch_aggregate().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("⚠️ Aggregation source unavailable: {}", e);
                return FetchOutcome::Unavailable {
                    reason: e.to_string(),
                };
            }
        };

        if !response.success {
            tracing::warn!("⚠️ Aggregation source returned success=false");
            return FetchOutcome::Unavailable {
                reason: "unsuccessful response".to_string(),
            };
        }

        if response.total_records() == 0 {
            tracing::warn!("⚠️ Aggregation source returned no records");
            return FetchOutcome::Unavailable {
                reason: "empty response".to_string(),
            };
        }

        tracing::debug!(
            "📡 Fetched {} advertisements, {} job offers, {} opportunities",
            response.advertisements.len(),
            response.job_offers.len(),
            response.business_opportunities.len()
        );
        FetchOutcome::Live(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RawAdvertisement, RawCommon};
    use crate::utils::error::{CarouselError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        response: fn() -> Result<AggregationResponse>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(response: fn() -> Result<AggregationResponse>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AggregationSource for StubSource {
        async fn fetch_aggregate(&self) -> Result<AggregationResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.response)()
        }
    }

    fn one_ad() -> Result<AggregationResponse> {
        Ok(AggregationResponse {
            success: true,
            advertisements: vec![RawAdvertisement {
                common: RawCommon {
                    id: Some("1".to_string()),
                    ..Default::default()
                },
                views: Some(3),
            }],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_fetch_live_response() {
        let fetcher = Fetcher::new(StubSource::new(one_ad));
        match fetcher.fetch().await {
            FetchOutcome::Live(response) => assert_eq!(response.total_records(), 1),
            other => panic!("expected live data, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_error_is_unavailable_without_retry() {
        let fetcher = Fetcher::new(StubSource::new(|| {
            Err(CarouselError::UnexpectedStatus {
                endpoint: "/carousel".to_string(),
                status: 502,
            })
        }));

        let outcome = fetcher.fetch().await;
        assert!(matches!(outcome, FetchOutcome::Unavailable { .. }));
        assert_eq!(fetcher.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_unsuccessful_flag_is_unavailable() {
        let fetcher = Fetcher::new(StubSource::new(|| {
            let mut response = one_ad()?;
            response.success = false;
            Ok(response)
        }));
        assert!(matches!(
            fetcher.fetch().await,
            FetchOutcome::Unavailable { .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_empty_collections_is_unavailable() {
        let fetcher = Fetcher::new(StubSource::new(|| {
            Ok(AggregationResponse {
                success: true,
                ..Default::default()
            })
        }));
        match fetcher.fetch().await {
            FetchOutcome::Unavailable { reason } => assert_eq!(reason, "empty response"),
            other => panic!("expected unavailable, got {:?}", other),
        }
    }
}
