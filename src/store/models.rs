use serde::{Deserialize, Serialize};

/// A stored short link.
///
/// `metadata` is owned by the remote store and only passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub slug: String,
    pub target: String,
    #[serde(default)]
    pub metadata: LinkMetadata,
}

/// Store-side fields reported alongside a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkMetadata {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub validity: Option<serde_json::Number>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub inherit_param: Option<bool>,
    #[serde(default)]
    pub inherit_path: Option<bool>,
}

/// `GET /_/{slug}` response envelope.
///
/// `item` is only meaningful when `found` is true, so it is kept raw until then.
#[derive(Debug, Deserialize)]
pub struct LinkInfoResponse {
    pub found: bool,
    #[serde(default)]
    pub item: Option<serde_json::Value>,
}

/// The `item` object of [`LinkInfoResponse`].
#[derive(Debug, Deserialize)]
pub struct LinkItem {
    pub payload: String,
    #[serde(flatten)]
    pub metadata: LinkMetadata,
}

impl LinkInfoResponse {
    /// Turn the envelope into a link, honouring `found`.
    ///
    /// A `found: true` envelope without a decodable `item` is an error.
    pub fn into_link(self, slug: &str) -> Result<Option<Link>, serde_json::Error> {
        if !self.found {
            return Ok(None);
        }
        let Some(raw) = self.item.filter(|item| !item.is_null()) else {
            return Err(serde::de::Error::custom("found link without item"));
        };
        let item: LinkItem = serde_json::from_value(raw)?;
        Ok(Some(Link {
            slug: slug.to_string(),
            target: item.payload,
            metadata: item.metadata,
        }))
    }
}

/// `PUT /_/{slug}` request body.
#[derive(Debug, Serialize)]
pub struct PutLinkRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub payload: &'a str,
}

impl<'a> PutLinkRequest<'a> {
    pub const LINK_TYPE: &'static str = "link";

    pub fn link(target: &'a str) -> Self {
        Self {
            kind: Self::LINK_TYPE,
            payload: target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_envelope_keeps_metadata() {
        let json = r#"{
            "found": true,
            "item": {
                "createdAt": "2026-03-01T12:00:00.000Z",
                "validity": -1,
                "payload": "https://example.com",
                "type": "link",
                "inheritParam": true,
                "inheritPath": false
            }
        }"#;
        let resp: LinkInfoResponse = serde_json::from_str(json).unwrap();
        let link = resp.into_link("ex").unwrap().unwrap();

        assert_eq!(link.slug, "ex");
        assert_eq!(link.target, "https://example.com");
        assert_eq!(
            link.metadata.created_at.as_deref(),
            Some("2026-03-01T12:00:00.000Z")
        );
        assert_eq!(link.metadata.validity, Some(serde_json::Number::from(-1)));
        assert_eq!(link.metadata.kind.as_deref(), Some("link"));
        assert_eq!(link.metadata.inherit_param, Some(true));
        assert_eq!(link.metadata.inherit_path, Some(false));
    }

    #[test]
    fn test_not_found_envelope() {
        let resp: LinkInfoResponse = serde_json::from_str(r#"{"found": false}"#).unwrap();
        assert_eq!(resp.into_link("ex").unwrap(), None);
    }

    #[test]
    fn test_not_found_envelope_ignores_item_shape() {
        for json in [
            r#"{"found": false, "item": {}}"#,
            r#"{"found": false, "item": {"payload": null}}"#,
            r#"{"found": false, "item": null}"#,
            r#"{"found": false, "item": "garbage"}"#,
        ] {
            let resp: LinkInfoResponse = serde_json::from_str(json).unwrap();
            assert_eq!(resp.into_link("ex").unwrap(), None, "{}", json);
        }
    }

    #[test]
    fn test_found_without_payload_is_error() {
        for json in [
            r#"{"found": true, "item": null}"#,
            r#"{"found": true}"#,
            r#"{"found": true, "item": {}}"#,
            r#"{"found": true, "item": {"payload": null}}"#,
        ] {
            let resp: LinkInfoResponse = serde_json::from_str(json).unwrap();
            assert!(resp.into_link("ex").is_err(), "{}", json);
        }
    }

    #[test]
    fn test_put_body_shape() {
        let body = serde_json::to_value(PutLinkRequest::link("https://x.com")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"type": "link", "payload": "https://x.com"})
        );
    }
}
