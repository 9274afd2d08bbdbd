//! Share link encoding.
//!
//! A shared set is addressed by the page it was drawn on plus a fragment
//! `#ant={viewport width}={id}`. The public link wraps that annotated page
//! URL in base64 and hands it to the viewer host as its `view` parameter:
//!
//! ```text
//! https://annotateweb.com/?view=base64("https://example.com/a#ant=1280=k3j9x")
//! ```

use super::types::ShareError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use url::Url;

/// Fragment prefix marking a shared annotation set.
pub const FRAGMENT_PREFIX: &str = "#ant=";
/// Query parameter carrying the encoded page URL.
pub const VIEW_PARAM: &str = "view";

/// A page, the viewport width the annotations were drawn at and their store id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTarget {
    /// Page URL without any fragment
    pub page_url: String,
    /// `None` when a received fragment carried no readable width
    pub viewport_width: Option<u32>,
    pub id: String,
}

impl ShareTarget {
    /// Builds a target; any fragment on `page_url` is dropped.
    pub fn new(page_url: &str, viewport_width: u32, id: impl Into<String>) -> Self {
        let page_url = page_url.split('#').next().unwrap_or_default();
        Self {
            page_url: page_url.to_string(),
            viewport_width: Some(viewport_width),
            id: id.into(),
        }
    }

    pub fn fragment(&self) -> String {
        let width = self.viewport_width.map(|w| w.to_string()).unwrap_or_default();
        format!("{FRAGMENT_PREFIX}{}={}", width, self.id)
    }

    /// The page URL with the share fragment attached.
    pub fn annotated_url(&self) -> String {
        format!("{}{}", self.page_url, self.fragment())
    }

    /// Encodes the public link on `view_host`.
    pub fn to_view_link(&self, view_host: &str) -> Result<String, ShareError> {
        let mut url = Url::parse(view_host)
            .map_err(|e| ShareError::InvalidLink(format!("view host '{view_host}': {e}")))?;
        url.query_pairs_mut()
            .append_pair(VIEW_PARAM, &STANDARD.encode(self.annotated_url()));
        Ok(url.into())
    }

    /// Decodes a public link produced by [`ShareTarget::to_view_link`].
    ///
    /// Unescaped links are accepted too: a `+` turned into a space by query
    /// decoding is put back before the base64 step.
    pub fn from_view_link(link: &str) -> Result<Self, ShareError> {
        let url = Url::parse(link).map_err(|e| ShareError::InvalidLink(e.to_string()))?;
        let encoded = url
            .query_pairs()
            .find(|(key, _)| key == VIEW_PARAM)
            .map(|(_, value)| value.replace(' ', "+"))
            .ok_or_else(|| ShareError::InvalidLink(format!("no '{VIEW_PARAM}' parameter")))?;

        let decoded = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| ShareError::InvalidLink(format!("bad base64: {e}")))?;
        let page_url = String::from_utf8(decoded)
            .map_err(|_| ShareError::InvalidLink("decoded URL is not UTF-8".to_string()))?;

        Self::from_page_url(&page_url)
    }

    /// Parses an annotated page URL (`...#ant={width}={id}`).
    pub fn from_page_url(page_url: &str) -> Result<Self, ShareError> {
        let Some(hash) = page_url.find('#') else {
            return Err(ShareError::InvalidLink(format!("'{page_url}' has no fragment")));
        };
        let (width, id) = parse_fragment(&page_url[hash..]).ok_or_else(|| {
            ShareError::InvalidLink(format!("'{}' is not a share fragment", &page_url[hash..]))
        })?;
        Ok(Self {
            page_url: page_url[..hash].to_string(),
            viewport_width: width,
            id,
        })
    }

    /// Accepts either a public view link or an annotated page URL.
    pub fn parse(input: &str) -> Result<Self, ShareError> {
        let input = input.trim();
        if input.contains('#') {
            Self::from_page_url(input)
        } else {
            Self::from_view_link(input)
        }
    }
}

/// Parses `#ant={width}={id}` into its width and id.
///
/// The part after the prefix must split on `=` into exactly two pieces with a
/// non-empty id. The width is informational: its leading decimal digits are
/// read (`1280px` gives 1280) and a token without any gives `None`.
pub fn parse_fragment(fragment: &str) -> Option<(Option<u32>, String)> {
    let params = fragment.strip_prefix(FRAGMENT_PREFIX)?;
    let parts: Vec<&str> = params.split('=').collect();
    let [width, id] = parts.as_slice() else {
        return None;
    };
    if id.is_empty() {
        return None;
    }
    Some((leading_number(width), id.to_string()))
}

fn leading_number(token: &str) -> Option<u32> {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_and_annotated_url() {
        let target = ShareTarget::new("https://example.com/docs?page=2#intro", 1280, "abc123");
        assert_eq!(target.page_url, "https://example.com/docs?page=2");
        assert_eq!(target.fragment(), "#ant=1280=abc123");
        assert_eq!(
            target.annotated_url(),
            "https://example.com/docs?page=2#ant=1280=abc123"
        );
    }

    #[test]
    fn view_link_round_trip() {
        let target = ShareTarget::new("https://example.com/a b?x=1&y=2", 390, "k3j9xq1z0m");
        let link = target.to_view_link("https://annotateweb.com/").unwrap();
        assert!(link.starts_with("https://annotateweb.com/?view="));
        assert_eq!(ShareTarget::from_view_link(&link).unwrap(), target);
        assert_eq!(ShareTarget::parse(&link).unwrap(), target);
    }

    #[test]
    fn unescaped_base64_links_decode() {
        let annotated = "https://example.com/?q=>>>#ant=800=zz";
        let raw = format!("https://annotateweb.com/?view={}", STANDARD.encode(annotated));
        let target = ShareTarget::from_view_link(&raw).unwrap();
        assert_eq!(target.page_url, "https://example.com/?q=>>>");
        assert_eq!(target.viewport_width, Some(800));
        assert_eq!(target.id, "zz");
    }

    #[test]
    fn fragment_parsing_rules() {
        assert_eq!(parse_fragment("#ant=1024=abc"), Some((Some(1024), "abc".to_string())));
        assert_eq!(parse_fragment("#ant=1024"), None);
        assert_eq!(parse_fragment("#ant=1024=abc=def"), None);
        assert_eq!(parse_fragment("#ant=1024="), None);
        assert_eq!(parse_fragment("#other=1024=abc"), None);
    }

    #[test]
    fn unreadable_width_still_yields_the_id() {
        assert_eq!(parse_fragment("#ant=1280px=abc"), Some((Some(1280), "abc".to_string())));
        assert_eq!(parse_fragment("#ant=wide=abc"), Some((None, "abc".to_string())));
        assert_eq!(parse_fragment("#ant==abc"), Some((None, "abc".to_string())));

        let target = ShareTarget::from_page_url("https://example.com/#ant=abc=k3j9").unwrap();
        assert_eq!(target.viewport_width, None);
        assert_eq!(target.id, "k3j9");
        assert_eq!(target.fragment(), "#ant==k3j9");
    }

    #[test]
    fn page_url_without_share_fragment_is_rejected() {
        assert!(matches!(
            ShareTarget::from_page_url("https://example.com/"),
            Err(ShareError::InvalidLink(_))
        ));
        assert!(ShareTarget::from_page_url("https://example.com/#top").is_err());
        assert!(ShareTarget::from_view_link("https://annotateweb.com/?join=1").is_err());
    }
}
