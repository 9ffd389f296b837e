/// Content type for a static file extension.
///
/// HTML is not listed: `.html` files are page templates, never served raw.
#[must_use]
pub fn content_type(extension: &str) -> Option<&'static str> {
    let content_type = match extension {
        "css" => "text/css",
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "jpg" | "jpeg" => "image/jpeg",
        "js" => "text/javascript",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "txt" => "text/plain; charset=utf-8",
        "webp" => "image/webp",
        "woff2" => "font/woff2",
        "xml" => "application/xml",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(content_type)
}
