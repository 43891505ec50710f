//! Test helpers for the WAPI client

#[cfg(test)]
#[allow(dead_code)]
pub fn create_test_client(url: &str) -> super::Client {
    super::Client::with_config(
        url,
        "v2.13.6",
        "admin",
        "infoblox",
        true,
        super::RetryConfig {
            max_retries: 1,
            initial_backoff_ms: 1,
            max_backoff_ms: 5,
            timeout_seconds: 5,
        },
    )
    .unwrap()
}

/// Match a WAPI path with or without a query string
#[cfg(test)]
#[allow(dead_code)]
pub fn wapi_path(path: &str) -> mockito::Matcher {
    mockito::Matcher::Regex(format!(
        "^/wapi/v2\\.13\\.6{}(\\?.*)?$",
        path.replace('.', "\\.")
    ))
}
