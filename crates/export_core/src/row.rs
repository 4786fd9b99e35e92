use serde::{Deserialize, Deserializer};

pub const RATING_UNKNOWN: &str = "N/A";

/// One matching problem as returned by the preview endpoint. Display-only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreviewRow {
    pub contest_name: String,
    pub problem_name: String,
    #[serde(default = "unknown_rating", deserialize_with = "rating_as_text")]
    pub rating: String,
    #[serde(default)]
    pub tags: String,
    pub link: String,
}

fn unknown_rating() -> String {
    RATING_UNKNOWN.to_string()
}

/// The service sends numeric ratings, or the string `"N/A"` when unrated.
fn rating_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rating {
        Number(i64),
        Text(String),
        Missing(()),
    }

    Ok(match Rating::deserialize(deserializer)? {
        Rating::Number(value) => value.to_string(),
        Rating::Text(text) => text,
        Rating::Missing(()) => unknown_rating(),
    })
}

#[cfg(test)]
mod tests {
    use super::PreviewRow;

    #[test]
    fn numeric_rating_becomes_text() {
        let row: PreviewRow = serde_json::from_str(
            r#"{"contest_name":"Round 1","problem_name":"Sum","rating":800,
                "tags":"math","link":"https://codeforces.com/contest/1/problem/A","complete":""}"#,
        )
        .unwrap();
        assert_eq!(row.rating, "800");
        assert_eq!(row.tags, "math");
    }

    #[test]
    fn missing_or_null_rating_is_unknown() {
        let row: PreviewRow = serde_json::from_str(
            r#"{"contest_name":"R","problem_name":"P","link":"l"}"#,
        )
        .unwrap();
        assert_eq!(row.rating, "N/A");

        let row: PreviewRow = serde_json::from_str(
            r#"{"contest_name":"R","problem_name":"P","rating":null,"link":"l"}"#,
        )
        .unwrap();
        assert_eq!(row.rating, "N/A");
    }
}
