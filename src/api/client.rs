use reqwest::{Client, RequestBuilder};

use super::error::ApiError;

pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP client bound to one server base URL.
///
/// No request timeout is set: a zone replacement only fails through its own
/// error channel.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .user_agent(concat!("zonedit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(client.url("zone_file"), "http://localhost:8000/api/zone_file");
        assert_eq!(client.url("/reset_zone"), "http://localhost:8000/api/reset_zone");
    }
}
