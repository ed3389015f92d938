//! HTTP client wrapper - performs the two GETs and decodes their envelopes

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::{FetchError, Result};
use crate::models::{Friend, FriendsResponse, Language, Repository, SearchResponse};

/// Search URL for the most starred repositories in `language`
pub fn popular_repos_url(base_url: &str, language: Language) -> String {
    format!(
        "{}/search/repositories?q=stars:%3E1+language:{}&sort=stars&order=desc&type=Repositories",
        base_url.trim_end_matches('/'),
        language.as_str()
    )
}

/// Decode a search response body
pub fn parse_search_response(body: &str) -> Result<Vec<Repository>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.items)
}

/// Decode a friends response body
pub fn parse_friends_response(body: &str) -> Result<Vec<Friend>> {
    let response: FriendsResponse = serde_json::from_str(body)?;
    Ok(response.data)
}

/// GET `request` and return the body, mapping transport failures
async fn get_text(request: reqwest::RequestBuilder, url: &str) -> Result<String> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.text().await?)
}

/// Fetch the most starred repositories, bounded by the configured timeout
pub async fn fetch_popular_repos(
    client: &reqwest::Client,
    config: &Config,
    language: Language,
) -> Result<Vec<Repository>> {
    let url = popular_repos_url(&config.search_base_url, language);
    let timeout = config.search_timeout();

    let mut request = client
        .get(&url)
        .header(ACCEPT, "application/vnd.github+json")
        .timeout(timeout);
    if let Some(token) = &config.github_token {
        request = request.header(AUTHORIZATION, format!("Bearer {}", token));
    }

    let body = get_text(request, &url).await.map_err(|e| match e {
        FetchError::Network(err) if err.is_timeout() => FetchError::Timeout(timeout),
        other => other,
    })?;
    parse_search_response(&body)
}

/// Fetch the bulk friends list from the mock data host
pub async fn fetch_friends(client: &reqwest::Client, config: &Config) -> Result<Vec<Friend>> {
    let url = config.friends_url.as_str();
    let body = get_text(client.get(url), url).await?;
    parse_friends_response(&body)
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popular_repos_url() {
        assert_eq!(
            popular_repos_url("https://api.github.com", Language::All),
            "https://api.github.com/search/repositories?q=stars:%3E1+language:all&sort=stars&order=desc&type=Repositories"
        );
        assert_eq!(
            popular_repos_url("http://localhost:8080/", Language::Ruby),
            "http://localhost:8080/search/repositories?q=stars:%3E1+language:ruby&sort=stars&order=desc&type=Repositories"
        );
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"{"items":[{"id":1,"name":"rails","html_url":"https://github.com/rails/rails","owner":{"login":"rails"},"stargazers_count":55000}]}"#;
        let repos = parse_search_response(body).unwrap();
        assert_eq!(repos[0].name, "rails");
        assert_eq!(repos[0].id, 1);
    }

    #[test]
    fn test_parse_malformed_response() {
        let err = parse_search_response(r#"{"message":"API rate limit exceeded"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));

        let err = parse_friends_response("not json").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_parse_friends_response() {
        let body = r#"{"data":[{"name":"Al","active":true,"deleted":false},{"name":"Bo","active":false,"deleted":true}]}"#;
        let friends = parse_friends_response(body).unwrap();
        assert_eq!(friends.len(), 2);
        assert!(friends[1].deleted);
    }
}
