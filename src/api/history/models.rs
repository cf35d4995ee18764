use serde::{Deserialize, Serialize};

use crate::models::{HistoryPage, TransactionRecord};
use crate::utils::errors::FetchError;

/// Response body of GET /v1/history.
///
/// Every numeric field comes over the wire as a string. The `page_id`/`page_size` echo is
/// advisory, so it may be missing or numeric without failing the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub page_id: Option<serde_json::Value>,
    #[serde(default)]
    pub page_size: Option<serde_json::Value>,
    pub total_page: String,
    pub total_history: String,
    #[serde(default)]
    pub list: Option<Vec<TransactionRecord>>,
}

impl HistoryResponse {
    /// Validate the counts and turn the envelope into a `HistoryPage` for the page that
    /// was actually requested.
    pub fn into_page(self, page: u32, page_size: u32) -> Result<HistoryPage, FetchError> {
        let total_pages = parse_wire_count("total_page", &self.total_page)?;
        let total_history = parse_wire_count("total_history", &self.total_history)?;

        let total_pages = u32::try_from(total_pages).map_err(|_| {
            FetchError::MalformedResponse(format!("total_page out of range: {}", self.total_page))
        })?;

        Ok(HistoryPage {
            records: self.list.unwrap_or_default(),
            page,
            page_size,
            total_pages,
            total_history,
        })
    }

    /// The service echoes the page it served. Returns the echo if both fields parse.
    pub fn echoed_position(&self) -> Option<(u64, u64)> {
        let page = echo_count("page_id", self.page_id.as_ref()?)?;
        let size = echo_count("page_size", self.page_size.as_ref()?)?;
        Some((page, size))
    }
}

fn echo_count(field: &str, value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => parse_wire_count(field, s).ok(),
        _ => None,
    }
}

/// The one place wire strings become counts.
///
/// Accepts surrounding whitespace, nothing else: signs, decimals, empty strings and
/// non-digits are all `MalformedResponse`.
pub fn parse_wire_count(field: &str, raw: &str) -> Result<u64, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FetchError::MalformedResponse(format!(
            "{} is not a non-negative integer: '{}'",
            field, raw
        )));
    }

    trimmed.parse::<u64>().map_err(|e| {
        FetchError::MalformedResponse(format!("{} could not be parsed ('{}'): {}", field, raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(total_page: &str, total_history: &str) -> HistoryResponse {
        HistoryResponse {
            page_id: Some(serde_json::Value::from("1")),
            page_size: Some(serde_json::Value::from("10")),
            total_page: total_page.to_string(),
            total_history: total_history.to_string(),
            list: None,
        }
    }

    #[test]
    fn test_parse_wire_count_rejects_non_integers() {
        assert_eq!(parse_wire_count("total_page", " 12 ").unwrap(), 12);
        assert_eq!(parse_wire_count("total_page", "0").unwrap(), 0);

        for bad in ["abc", "", "-1", "1.5", "+3", "NaN", "1e3"] {
            assert!(
                matches!(parse_wire_count("total_page", bad), Err(FetchError::MalformedResponse(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_into_page_fails_on_malformed_total_page() {
        let err = response("abc", "3").into_page(1, 10).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(msg) if msg.contains("total_page")));
    }

    #[test]
    fn test_into_page_defaults_missing_list() {
        let page = response("1", "3").into_page(2, 10).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_history, 3);
    }

    #[test]
    fn test_missing_or_numeric_echo_does_not_fail_page() {
        let missing: HistoryResponse =
            serde_json::from_str(r#"{"total_page": "3", "total_history": "25", "list": []}"#).unwrap();
        assert_eq!(missing.echoed_position(), None);
        assert_eq!(missing.into_page(1, 10).unwrap().total_pages, 3);

        let numeric: HistoryResponse = serde_json::from_str(
            r#"{"page_id": 2, "page_size": 10, "total_page": "3", "total_history": "25"}"#,
        )
        .unwrap();
        assert_eq!(numeric.echoed_position(), Some((2, 10)));

        let garbage: HistoryResponse = serde_json::from_str(
            r#"{"page_id": "two", "page_size": null, "total_page": "3", "total_history": "25"}"#,
        )
        .unwrap();
        assert_eq!(garbage.echoed_position(), None);
        assert!(garbage.into_page(2, 10).is_ok());
    }

    #[test]
    fn test_response_deserializes_wire_body() {
        let body = r#"{
            "page_id": "2",
            "page_size": "10",
            "total_page": "7",
            "total_history": "65",
            "list": [{"id": "a", "status": "confirmed"}]
        }"#;
        let parsed: HistoryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.echoed_position(), Some((2, 10)));

        let page = parsed.into_page(2, 10).unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.total_pages, 7);
    }
}
