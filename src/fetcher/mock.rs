//! Mock fetcher for isolating controllers and services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::fetcher::{FetchRequest, FetchResponse, FetchResult, Fetcher};

mock! {
    pub Fetcher {}

    #[async_trait]
    impl Fetcher for Fetcher {
        async fn fetch(&self, url: &str, request: FetchRequest) -> FetchResult<FetchResponse>;
    }
}
