//! Minimal XML-RPC envelope codec for the Brew hub.
//!
//! The resolver makes exactly one scalar call, so the envelope is rendered
//! and picked apart directly here; nothing outside this module sees the
//! hub's wire format.

/// Render a method call with string parameters.
pub(crate) fn render_call(method: &str, params: &[&str]) -> String {
    let mut body = String::from("<?xml version=\"1.0\"?><methodCall>");
    body.push_str(&format!("<methodName>{}</methodName><params>", escape(method)));
    for param in params {
        body.push_str("<param><value><string>");
        body.push_str(&escape(param));
        body.push_str("</string></value></param>");
    }
    body.push_str("</params></methodCall>");
    body
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A scalar method response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScalarResponse {
    Int(i64),
    /// The hub answers `<nil/>` for "no such record".
    Nil,
    Fault {
        message: String,
    },
}

/// Pick the scalar out of a method response. `None` means the body is not
/// a response this codec understands.
pub(crate) fn parse_scalar_response(body: &str) -> Option<ScalarResponse> {
    if body.contains("<fault>") {
        let message = body
            .find("faultString")
            .and_then(|pos| text_between(&body[pos..], "<string>", "</string>"))
            .unwrap_or("unknown fault")
            .to_string();
        return Some(ScalarResponse::Fault { message });
    }
    if body.contains("<nil/>") {
        return Some(ScalarResponse::Nil);
    }
    let digits = text_between(body, "<int>", "</int>")
        .or_else(|| text_between(body, "<i4>", "</i4>"))?;
    digits
        .trim()
        .parse()
        .ok()
        .map(ScalarResponse::Int)
}

fn text_between<'a>(haystack: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = haystack.find(open)? + open.len();
    let end = haystack[start..].find(close)? + start;
    Some(&haystack[start..end])
}
