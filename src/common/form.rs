//! URL-encoded form decoding and binding onto typed form records
//!
//! Each form record declares a mapping table of source keys to setters via
//! [`FormBinding::fields`]. Decoding walks that table against the parsed
//! payload, so there is no reflection or derive magic involved.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use std::collections::HashMap;
use tracing::debug;

use super::error::AppError;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DecodeError {
    #[error("unsupported content type: {0:?}")]
    UnsupportedContentType(String),

    #[error("form body is not valid UTF-8")]
    InvalidUtf8,

    #[error("malformed percent escape {0:?}")]
    MalformedEscape(String),

    #[error("malformed form body: {0}")]
    Malformed(String),

    #[error("field {key:?} expects an integer, got {value:?}")]
    InvalidInt { key: String, value: String },
}

// ============================================================================
// Raw payload
// ============================================================================

/// Parsed `application/x-www-form-urlencoded` payload.
///
/// Repeated keys keep every value in arrival order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormValues {
    values: HashMap<String, Vec<String>>,
}

impl FormValues {
    /// Parses a url-encoded body.
    ///
    /// Escapes are checked strictly before decoding: a `%` not followed by
    /// two hex digits, or escapes that decode to invalid UTF-8, are errors
    /// rather than being passed through or replaced.
    pub fn parse(body: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(body).map_err(|_| DecodeError::InvalidUtf8)?;
        check_escapes(text)?;
        urlencoding::decode(text).map_err(|_| DecodeError::InvalidUtf8)?;

        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(text)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;

        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in pairs {
            values.entry(key).or_default().push(value);
        }

        Ok(Self { values })
    }

    /// First value submitted for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    #[cfg(test)]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn check_escapes(raw: &str) -> Result<(), DecodeError> {
    let bytes = raw.as_bytes();
    for (i, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let well_formed = bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
            && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit);
        if !well_formed {
            let end = (i + 3).min(bytes.len());
            return Err(DecodeError::MalformedEscape(
                String::from_utf8_lossy(&bytes[i..end]).into_owned(),
            ));
        }
    }
    Ok(())
}

// ============================================================================
// Mapping table
// ============================================================================

enum Converter<T> {
    Text(fn(&mut T, String)),
    Int(fn(&mut T, i64)),
}

/// One row of a form's mapping table: source key plus typed setter.
pub struct FormField<T> {
    pub key: &'static str,
    converter: Converter<T>,
}

impl<T> FormField<T> {
    pub fn text(key: &'static str, set: fn(&mut T, String)) -> Self {
        Self {
            key,
            converter: Converter::Text(set),
        }
    }

    pub fn int(key: &'static str, set: fn(&mut T, i64)) -> Self {
        Self {
            key,
            converter: Converter::Int(set),
        }
    }

    fn apply(&self, target: &mut T, raw: &str) -> Result<(), DecodeError> {
        match &self.converter {
            Converter::Text(set) => set(target, raw.to_string()),
            // An empty integer value leaves the field at its default
            Converter::Int(_) if raw.is_empty() => {}
            Converter::Int(set) => {
                let parsed = raw.parse::<i64>().map_err(|_| DecodeError::InvalidInt {
                    key: self.key.to_string(),
                    value: raw.to_string(),
                })?;
                set(target, parsed);
            }
        }
        Ok(())
    }
}

/// Implemented by every form record that can be populated from a request body.
pub trait FormBinding: Default {
    fn fields() -> Vec<FormField<Self>>;
}

/// Builds `T` from its default, applying every mapped key present in `values`.
pub fn decode_form<T: FormBinding>(values: &FormValues) -> Result<T, DecodeError> {
    let mut target = T::default();
    for field in T::fields() {
        if let Some(raw) = values.get(field.key) {
            field.apply(&mut target, raw)?;
        }
    }
    Ok(target)
}

fn is_form_encoded(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

// ============================================================================
// Extractor
// ============================================================================

/// Axum extractor that decodes and binds a form body.
///
/// Every decode failure is rejected as a bare 400; details only reach the log.
pub struct BoundForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for BoundForm<T>
where
    S: Send + Sync,
    T: FormBinding + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_form_encoded(&content_type) {
            let e = DecodeError::UnsupportedContentType(content_type);
            debug!(error = %e, "Rejecting form submission");
            return Err(AppError::BadRequest);
        }

        let body = Bytes::from_request(req, state).await.map_err(|e| {
            debug!(error = %e, "Failed to read form body");
            AppError::BadRequest
        })?;

        let form = FormValues::parse(&body)
            .and_then(|values| decode_form::<T>(&values))
            .map_err(|e| {
                debug!(error = %e, "Failed to decode form body");
                AppError::BadRequest
            })?;

        Ok(BoundForm(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct SampleForm {
        title: String,
        count: i64,
    }

    impl FormBinding for SampleForm {
        fn fields() -> Vec<FormField<Self>> {
            vec![
                FormField::text("title", |f, v| f.title = v),
                FormField::int("count", |f, v| f.count = v),
            ]
        }
    }

    #[test]
    fn test_parse_decodes_escapes_and_plus() {
        let values = FormValues::parse(b"title=Hello+W%C3%B6rld&note=a%2Bb").unwrap();
        assert_eq!(values.get("title"), Some("Hello Wörld"));
        assert_eq!(values.get("note"), Some("a+b"));
        assert_eq!(values.get("missing"), None);

        let values = FormValues::parse(b"q=a%26b%3Dc&k%20ey=v").unwrap();
        assert_eq!(values.get("q"), Some("a&b=c"));
        assert_eq!(values.get("k ey"), Some("v"));
    }

    #[test]
    fn test_parse_repeated_keys_first_wins() {
        let values = FormValues::parse(b"tag=one&tag=two&&flag").unwrap();
        assert_eq!(values.get("tag"), Some("one"));
        assert_eq!(values.get_all("tag"), ["one".to_string(), "two".to_string()]);
        assert_eq!(values.get("flag"), Some(""));
    }

    #[test]
    fn test_parse_rejects_malformed_escape() {
        let err = FormValues::parse(b"title=100%").unwrap_err();
        assert_eq!(err, DecodeError::MalformedEscape("%".to_string()));
        assert_eq!(
            FormValues::parse(b"title=%zz&x=1").unwrap_err(),
            DecodeError::MalformedEscape("%zz".to_string())
        );
        assert!(FormValues::parse(b"ti%2tle=ok").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        assert_eq!(
            FormValues::parse(&[b't', b'=', 0xff]).unwrap_err(),
            DecodeError::InvalidUtf8
        );
        assert_eq!(
            FormValues::parse(b"t=%ff").unwrap_err(),
            DecodeError::InvalidUtf8
        );
    }

    #[test]
    fn test_decode_form_binds_declared_keys() {
        let values = FormValues::parse(b"title=Hi&count=7&ignored=x").unwrap();
        let form: SampleForm = decode_form(&values).unwrap();
        assert_eq!(
            form,
            SampleForm {
                title: "Hi".to_string(),
                count: 7
            }
        );
    }

    #[test]
    fn test_decode_form_missing_keys_keep_defaults() {
        let values = FormValues::parse(b"").unwrap();
        let form: SampleForm = decode_form(&values).unwrap();
        assert_eq!(form, SampleForm::default());

        let values = FormValues::parse(b"count=").unwrap();
        let form: SampleForm = decode_form(&values).unwrap();
        assert_eq!(form.count, 0);
    }

    #[test]
    fn test_decode_form_rejects_non_integer() {
        let values = FormValues::parse(b"title=Hi&count=seven").unwrap();
        let err = decode_form::<SampleForm>(&values).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidInt {
                key: "count".to_string(),
                value: "seven".to_string()
            }
        );
    }

    #[test]
    fn test_content_type_detection() {
        assert!(is_form_encoded("application/x-www-form-urlencoded"));
        assert!(is_form_encoded("application/x-www-form-urlencoded; charset=UTF-8"));
        assert!(is_form_encoded("Application/X-WWW-Form-Urlencoded"));
        assert!(!is_form_encoded("application/json"));
        assert!(!is_form_encoded("multipart/form-data; boundary=x"));
        assert!(!is_form_encoded(""));
    }
}
