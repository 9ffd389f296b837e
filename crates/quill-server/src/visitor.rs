use axum::http::header;
use axum::http::HeaderMap;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_PROTOCOL: &str = "x-forwarded-protocol";

/// Who a page is being rendered for.
///
/// Carries the host the request was addressed to and the scheme it arrived
/// on, which together give absolute URLs for the feed. Requests addressed to
/// the local machine see drafts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visitor {
    scheme: String,
    host: String,
}

impl Visitor {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Read the host and scheme from request headers. The scheme honours
    /// reverse proxy headers and defaults to `http`.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let value = |name| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
        };

        let scheme = value(FORWARDED_PROTO)
            .or_else(|| value(FORWARDED_PROTOCOL))
            .unwrap_or("http");
        let host = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        Self::new(scheme, host)
    }

    /// `scheme://host`
    #[must_use]
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Whether the request was addressed to this machine.
    #[must_use]
    pub fn is_local(&self) -> bool {
        let domain = self.host.split(':').next().unwrap_or_default();
        domain == "localhost" || domain == "127.0.0.1"
    }
}
