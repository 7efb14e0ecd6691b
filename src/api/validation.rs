use axum::body::Bytes;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::ApiError;
use crate::domain::GadgetStatus;

/// Parses a JSON body, treating an empty body as `T::default()`.
pub fn parse_json_body<T>(body: &Bytes) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::validation(format!("Invalid JSON body: {e}")))
}

pub fn validate_gadget_name(name: Option<&str>) -> Result<&str, ApiError> {
    name.filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Gadget name is required"))
}

/// Absent or empty means "no status".
pub fn parse_status(status: Option<&str>) -> Result<Option<GadgetStatus>, ApiError> {
    match status {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|e: crate::domain::ParseStatusError| ApiError::validation(e.to_string())),
    }
}

/// A malformed id can never match a gadget, so it reads as "not found".
pub fn parse_gadget_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::gadget_not_found())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::UpdateGadgetRequest;

    #[test]
    fn test_parse_json_body() {
        let empty: UpdateGadgetRequest = parse_json_body(&Bytes::new()).unwrap();
        assert!(empty.new_name.is_none());

        let parsed: UpdateGadgetRequest =
            parse_json_body(&Bytes::from_static(br#"{"newName":"Pen","status":"Deployed"}"#))
                .unwrap();
        assert_eq!(parsed.new_name.as_deref(), Some("Pen"));
        assert_eq!(parsed.status.as_deref(), Some("Deployed"));

        assert!(parse_json_body::<UpdateGadgetRequest>(&Bytes::from_static(b"{nope")).is_err());
    }

    #[test]
    fn test_validate_gadget_name() {
        assert_eq!(validate_gadget_name(Some("The Kraken")).unwrap(), "The Kraken");
        assert!(validate_gadget_name(None).is_err());
        assert!(validate_gadget_name(Some("")).is_err());
        assert!(validate_gadget_name(Some("   ")).is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(None).unwrap(), None);
        assert_eq!(parse_status(Some("")).unwrap(), None);
        assert_eq!(
            parse_status(Some("Destroyed")).unwrap(),
            Some(GadgetStatus::Destroyed)
        );
        assert!(parse_status(Some("Exploded")).is_err());
    }

    #[test]
    fn test_parse_gadget_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_gadget_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_gadget_id("42"),
            Err(ApiError::NotFound(_))
        ));
    }
}
