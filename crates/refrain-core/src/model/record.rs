use serde::{Deserialize, Serialize};

/// One lyric occurrence returned by the search backend.
///
/// `line` holds the lyric line containing the hit; on the wire it is the
/// `match` field. `before` and `after` carry the neighbouring lines when the
/// backend has them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub title: String,
    pub album: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(rename = "match")]
    pub line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// Matches in backend response order. Not deduplicated.
pub type ResultSet = Vec<MatchRecord>;

impl MatchRecord {
    #[must_use]
    pub fn new(title: impl Into<String>, album: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            album: album.into(),
            before: None,
            line: line.into(),
            after: None,
        }
    }

    #[must_use]
    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    #[must_use]
    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    /// The preceding line, if present and non-empty.
    pub fn before_line(&self) -> Option<&str> {
        self.before.as_deref().filter(|s| !s.is_empty())
    }

    /// The following line, if present and non-empty.
    pub fn after_line(&self) -> Option<&str> {
        self.after.as_deref().filter(|s| !s.is_empty())
    }
}

// Body of `GET /search`. A missing `results` field means no matches.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: ResultSet,
}

/// Parse the JSON body of a search response into a [`ResultSet`].
pub fn parse_search_response(body: &str) -> crate::Result<ResultSet> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_record_builder() {
        let record = MatchRecord::new("Best Part", "Freudian", "You're the coffee that I need")
            .with_before("You don't know babe")
            .with_after("In the morning");

        assert_eq!(record.title, "Best Part");
        assert_eq!(record.before_line(), Some("You don't know babe"));
        assert_eq!(record.after_line(), Some("In the morning"));
    }

    #[test]
    fn test_empty_context_lines_are_hidden() {
        let record = MatchRecord::new("Hold Me Down", "Freudian", "hold me down").with_before("");
        assert_eq!(record.before_line(), None);
        assert_eq!(record.after_line(), None);
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "results": [
                {"title": "Get You", "album": "Freudian", "before": "Who would've thought",
                 "match": "I would get you", "after": "Every morning"},
                {"title": "Loose", "album": "Freudian", "match": "love is loose"}
            ]
        }"#;

        let results = parse_search_response(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].line, "I would get you");
        assert_eq!(results[0].before.as_deref(), Some("Who would've thought"));
        assert_eq!(results[1].title, "Loose");
        assert!(results[1].before.is_none());
        assert!(results[1].after.is_none());
    }

    #[test]
    fn test_parse_search_response_missing_results() {
        let results = parse_search_response(r#"{"word": "love", "matches": []}"#).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_search_response_null_context_lines() {
        let body = r#"{"results": [{"title": "T", "album": "A", "before": null, "match": "m", "after": null}]}"#;
        let results = parse_search_response(body).unwrap();
        assert_eq!(results[0].before, None);
    }

    #[test]
    fn test_parse_search_response_malformed() {
        assert!(parse_search_response("<html>502 Bad Gateway</html>").is_err());
        assert!(parse_search_response(r#"{"results": [{"title": "no match field"}]}"#).is_err());
    }

    #[test]
    fn test_serialize_uses_match_field() {
        let record = MatchRecord::new("Japanese Denim", "Pilgrim's Paradise", "these jeans");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["match"], "these jeans");
        assert!(json.get("before").is_none());
    }
}
