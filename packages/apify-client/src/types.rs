use serde::{Deserialize, Serialize};

/// Input for listing-detail actors that take a list of start URLs.
#[derive(Debug, Clone, Serialize)]
pub struct StartUrlsInput {
    #[serde(rename = "startUrls")]
    pub start_urls: Vec<StartUrl>,
}

impl StartUrlsInput {
    pub fn single(url: impl Into<String>) -> Self {
        Self {
            start_urls: vec![StartUrl { url: url.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StartUrl {
    pub url: String,
}

/// Wrapper for Apify API responses.
///
/// `data` is optional so a malformed start-run answer surfaces as
/// [`crate::ApifyError::MissingRunId`] instead of a decode error.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_urls_input_shape() {
        let input = StartUrlsInput::single("https://www.zillow.com/homedetails/1_zpid/");
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json["startUrls"][0]["url"],
            "https://www.zillow.com/homedetails/1_zpid/"
        );
    }

    #[test]
    fn test_run_data_tolerates_missing_fields() {
        let resp: ApiResponse<RunData> =
            serde_json::from_str(r#"{"data":{"status":"READY"}}"#).unwrap();
        let run = resp.data.unwrap();
        assert!(run.id.is_empty());
        assert_eq!(run.status, "READY");
        assert!(run.default_dataset_id.is_none());

        let empty: ApiResponse<RunData> = serde_json::from_str("{}").unwrap();
        assert!(empty.data.is_none());
    }
}
