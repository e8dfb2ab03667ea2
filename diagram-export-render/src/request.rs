//! Request construction: payload encoding and endpoint URLs.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

use diagram_export_config::{DiagramEntry, ExportConfig};

/// Encode diagram source as URL-safe base64 of its UTF-8 bytes.
///
/// The alphabet swaps `+/` for `-_`; `=` padding is kept.
pub fn encode_payload(source: &str) -> String {
    URL_SAFE.encode(source.as_bytes())
}

/// The rendering endpoint and the fixed query parameters sent with every
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
    image_type: String,
    background_color: String,
}

impl Endpoint {
    pub fn new(
        base: impl Into<String>,
        image_type: impl Into<String>,
        background_color: impl Into<String>,
    ) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
            image_type: image_type.into(),
            background_color: background_color.into(),
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(
            config.endpoint.as_str(),
            config.image_type.as_str(),
            config.background_color.as_str(),
        )
    }

    /// File extension of the images this endpoint returns.
    pub fn image_type(&self) -> &str {
        &self.image_type
    }

    /// `<base>/<payload>?type=<image_type>&bgColor=<background_color>`
    pub fn url_for(&self, payload: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("type", &self.image_type)
            .append_pair("bgColor", &self.background_color)
            .finish();
        format!("{}/{}?{}", self.base, payload, query)
    }

    /// Build the request for one entry.
    pub fn request_for(&self, entry: &DiagramEntry) -> RenderRequest {
        let encoded_payload = encode_payload(entry.trimmed_source());
        let url = self.url_for(&encoded_payload);
        RenderRequest {
            name: entry.name.clone(),
            encoded_payload,
            url,
        }
    }
}

/// A single encoded render request, discarded once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub name: String,
    pub encoded_payload: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    fn default_endpoint() -> Endpoint {
        Endpoint::from_config(&ExportConfig::default())
    }

    #[test]
    fn test_default_url_shape() {
        let url = default_endpoint().url_for("abc");
        assert_eq!(url, "https://mermaid.ink/img/abc?type=png&bgColor=white");
    }

    #[test]
    fn test_trailing_slash_on_base_is_dropped() {
        let endpoint = Endpoint::new("http://localhost:9000/img/", "png", "white");
        assert_eq!(
            endpoint.url_for("xyz"),
            "http://localhost:9000/img/xyz?type=png&bgColor=white"
        );
    }

    #[test]
    fn test_query_values_are_escaped() {
        let endpoint = Endpoint::new("https://mermaid.ink/img", "png", "!#FF00FF");
        let url = endpoint.url_for("p");
        assert!(url.ends_with("bgColor=%21%23FF00FF"), "got {url}");
    }

    #[test]
    fn test_payload_uses_url_safe_alphabet() {
        // Standard alphabet: "w7vDvz8+Pg==".
        let source = "\u{00fb}\u{00ff}?>>";
        let standard = STANDARD.encode(source.as_bytes());
        let url_safe = encode_payload(source);
        assert_eq!(url_safe, standard.replace('+', "-").replace('/', "_"));
        assert!(!url_safe.contains('+') && !url_safe.contains('/'));
    }

    #[test]
    fn test_request_round_trips_trimmed_source() {
        let entry = DiagramEntry::new(
            "03_exu_state_machine",
            "\n  stateDiagram-v2\n    IDLE --> DECODE: 译码完成\n\n",
        );
        let request = default_endpoint().request_for(&entry);

        let payload = request
            .url
            .strip_prefix("https://mermaid.ink/img/")
            .and_then(|rest| rest.split('?').next())
            .expect("payload segment");
        assert_eq!(payload, request.encoded_payload);

        let decoded = URL_SAFE.decode(payload).expect("valid base64");
        assert_eq!(decoded, entry.trimmed_source().as_bytes());
        assert_eq!(request.name, "03_exu_state_machine");
    }
}
