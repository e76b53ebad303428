use anyhow::{Context, Result, bail};
use base64::Engine as _;
use log::info;
use serde::Deserialize;

use super::Catalog;
use crate::common::user_agent;

const FETCH_TIMEOUT_SECS: u64 = 30;
const CONNECTIVITY_TIMEOUT_SECS: u64 = 10;

/// Body of a GitLab repository-files API response.
#[derive(Deserialize)]
struct FileResponse {
    /// Base64 encoded file content
    content: String,
}

/// Extracts and decodes the file content from a repository-files response.
fn decode_file_response(body: &[u8]) -> Result<String> {
    let response: FileResponse =
        serde_json::from_slice(body).context("Unexpected repository file response")?;

    // GitLab may wrap the payload on several lines
    let encoded: String = response
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .context("Repository file content is not valid base64")?;

    String::from_utf8(bytes).context("Repository file content is not valid UTF-8")
}

/// Downloads and decodes the package catalog.
///
/// Parameters:
///   - `url`: GitLab repository-files API URL of `packages.json`
///   - `private_token`: token sent as `Private-Token`
///
/// Returns: the decoded catalog, Err on HTTP, decoding or parsing failure
pub fn fetch_catalog(url: &str, private_token: &str) -> Result<Catalog> {
    info!("Fetching catalog: {url}");

    let res = minreq::get(url)
        .with_header("User-Agent", user_agent())
        .with_header("Private-Token", private_token)
        .with_timeout(FETCH_TIMEOUT_SECS)
        .send()
        .with_context(|| format!("{url} failed"))?;

    if !(200..300).contains(&res.status_code) {
        bail!(
            "Failed to fetch packages json file: HTTP {} {}",
            res.status_code,
            res.reason_phrase
        );
    }

    let json = decode_file_response(res.as_bytes())?;
    Catalog::parse(&json)
}

/// Checks that `url` answers at all. Any HTTP status counts as reachable.
pub fn check_connectivity(url: &str) -> Result<()> {
    info!("Checking connectivity against {url}");

    minreq::get(url)
        .with_header("User-Agent", user_agent())
        .with_timeout(CONNECTIVITY_TIMEOUT_SECS)
        .send()
        .with_context(|| format!("Unable to reach {url}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(payload: &str) -> Vec<u8> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(payload);
        serde_json::to_vec(&serde_json::json!({
            "file_name": "packages.json",
            "encoding": "base64",
            "content": encoded,
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_file_response() {
        let body = wrap(r#"{"common": [{"name": "jq"}]}"#);
        let json = decode_file_response(&body).unwrap();
        let catalog = Catalog::parse(&json).unwrap();
        assert_eq!(catalog.common[0].name, "jq");
    }

    #[test]
    fn test_decode_tolerates_wrapped_base64() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("{\"common\": []}");
        let (head, tail) = encoded.split_at(6);
        let body = serde_json::to_vec(&serde_json::json!({ "content": format!("{head}\n{tail}") }))
            .unwrap();

        assert_eq!(decode_file_response(&body).unwrap(), "{\"common\": []}");
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let body = br#"{"content": "***"}"#;
        assert!(decode_file_response(body).is_err());
    }

    #[test]
    fn test_decode_rejects_missing_content() {
        let body = br#"{"message": "404 File Not Found"}"#;
        assert!(decode_file_response(body).is_err());
    }
}
