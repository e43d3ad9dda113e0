use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::DocumentError;

/// Deserialize a schema document, reporting failures with the JSON path they
/// occurred at and the file they came from. Trailing input after the
/// document is a parse failure.
pub fn from_str_with_path<T: DeserializeOwned>(origin: &Path, src: &str) -> Result<T, DocumentError> {
    let parse_error = |message: String| DocumentError::Parse {
        path: origin.to_path_buf(),
        message,
    };
    let mut de = serde_json::Deserializer::from_str(src);
    let value = serde_path_to_error::deserialize::<_, T>(&mut de).map_err(|err| {
        let at = err.path().to_string();
        let inner = err.into_inner();
        parse_error(format!("at JSON path {at} (line {}, column {}) → {inner}", inner.line(), inner.column()))
    })?;
    de.end().map_err(|inner| {
        parse_error(format!("trailing data (line {}, column {}) → {inner}", inner.line(), inner.column()))
    })?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn parse_errors_carry_origin_and_position() {
        let origin = Path::new("models/user.json");
        let err = from_str_with_path::<Value>(origin, "{\"title\": }").unwrap_err();
        match &err {
            DocumentError::Parse { path, message } => {
                assert_eq!(path, origin);
                assert!(message.contains("line 1"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.to_string().contains("models/user.json"));
    }

    #[test]
    fn trailing_data_is_rejected() {
        let origin = Path::new("junk.json");
        let err = from_str_with_path::<Value>(origin, r#"{ "title": "widget" } this is not json"#).unwrap_err();
        match &err {
            DocumentError::Parse { path, message } => {
                assert_eq!(path, origin);
                assert!(message.contains("trailing"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
        // whitespace after the document is fine
        let v: Value = from_str_with_path(origin, "{ \"title\": \"w\" }\n\n").unwrap();
        assert_eq!(v["title"], "w");
    }

    #[test]
    fn valid_documents_decode() {
        let v: Value = from_str_with_path(Path::new("a.json"), r#"{"title":"A"}"#).unwrap();
        assert_eq!(v["title"], "A");
    }
}
