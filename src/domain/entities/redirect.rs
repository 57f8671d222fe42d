//! Redirect entity and response aggregates.

use serde::{Deserialize, Serialize};

/// A redirect mapping between a source path and a destination path.
///
/// Identity is derived, not stored: `id` is the encoded form of `from`
/// (see [`crate::utils::id_codec`]). The single-resource response carries
/// only `from`/`to`; list items additionally carry `id` and `links`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redirect {
    pub from: String,
    pub to: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<RedirectLinks>,
}

impl Redirect {
    /// A bare `from`/`to` representation, as returned by the single-GET
    /// endpoint.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            id: None,
            links: None,
        }
    }

    /// The list-item representation, carrying the derived id and self link.
    pub fn resource(
        from: impl Into<String>,
        to: impl Into<String>,
        id: impl Into<String>,
        self_href: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            from: from.into(),
            to: to.into(),
            links: Some(RedirectLinks {
                self_link: RedirectSelf {
                    href: self_href.into(),
                    id: id.clone(),
                },
            }),
            id: Some(id),
        }
    }
}

/// Links relating to an individual redirect. Currently only the link to
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectLinks {
    #[serde(rename = "self")]
    pub self_link: RedirectSelf,
}

/// A link to the individual redirect itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectSelf {
    pub href: String,
    pub id: String,
}

/// One page of redirects, as returned by the list endpoint.
///
/// `cursor` echoes the caller-supplied token unchanged; `next_cursor` is the
/// backend's continuation token (`"0"` signals end of iteration). The two
/// being equal tells the caller the data is exhausted. `total_count` is a
/// separately computed best-effort count, not guaranteed consistent with
/// the page under concurrent writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectPage {
    pub count: i64,
    pub items: Vec<Redirect>,
    pub cursor: String,
    pub next_cursor: String,
    pub total_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_representation_omits_id_and_links() {
        let redirect = Redirect::new("/economy/old-path", "/economy/new-path");
        let json = serde_json::to_value(&redirect).unwrap();

        assert_eq!(json["from"], "/economy/old-path");
        assert_eq!(json["to"], "/economy/new-path");
        assert!(json.get("id").is_none());
        assert!(json.get("links").is_none());
    }

    #[test]
    fn test_resource_representation_carries_self_link() {
        let redirect = Redirect::resource(
            "/economy/old-path",
            "/economy/new-path",
            "L2Vjb25vbXkvb2xkLXBhdGg=",
            "http://localhost:29900/v1/redirects/L2Vjb25vbXkvb2xkLXBhdGg=",
        );
        let json = serde_json::to_value(&redirect).unwrap();

        assert_eq!(json["id"], "L2Vjb25vbXkvb2xkLXBhdGg=");
        assert_eq!(json["links"]["self"]["id"], "L2Vjb25vbXkvb2xkLXBhdGg=");
        assert_eq!(
            json["links"]["self"]["href"],
            "http://localhost:29900/v1/redirects/L2Vjb25vbXkvb2xkLXBhdGg="
        );
    }

    #[test]
    fn test_page_serialization_shape() {
        let page = RedirectPage {
            count: 10,
            items: vec![],
            cursor: "0".to_string(),
            next_cursor: "0".to_string(),
            total_count: 12,
        };
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["count"], 10);
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["cursor"], "0");
        assert_eq!(json["next_cursor"], "0");
        assert_eq!(json["total_count"], 12);
    }
}
