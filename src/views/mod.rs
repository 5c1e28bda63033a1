//! Server-rendered HTML views.
//!
//! Every view is a pure function from view data to a complete document.
//! Interpolated text always goes through [`escape`].

mod home;
mod not_found;
mod security;
mod users;

use std::fmt::Write;

pub use home::index;
pub use not_found::not_found;
pub use security::security_page;
pub use users::users;

const STYLES: &str = "body{font-family:system-ui,sans-serif;margin:0;color:#212121;background:#fafafa}\
nav{background:#263238;padding:12px 24px}nav a{color:#fff;margin-right:16px;text-decoration:none}\
main{padding:24px;max-width:1100px;margin:0 auto}\
.card{background:#fff;border:1px solid #e0e0e0;border-radius:4px;padding:16px;margin-bottom:16px}\
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(200px,1fr));gap:16px}\
.error{color:#d32f2f}.muted{color:#757575}.mono{font-family:monospace;font-size:.75rem}\
.chip{display:inline-block;padding:2px 8px;border-radius:12px;font-size:.75rem}\
table{border-collapse:collapse;width:100%}th,td{text-align:left;padding:6px 8px;border-bottom:1px solid #eee}";

/// Escape text for use in HTML content and attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap body markup in the shared document layout.
pub(crate) fn layout(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title}</title>\n<style>{STYLES}</style>\n</head>\n<body>\n\
<nav><a href=\"/\">Dashboard</a><a href=\"/users\">Users</a><a href=\"/health\">Health</a></nav>\n\
<main>\n<h1>{title}</h1>\n{body}</main>\n</body>\n</html>\n",
        title = escape(title),
    );
    html
}

/// Display a JSON scalar without quotes; missing or null renders as `-`.
pub(crate) fn display_value(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => "-".to_string(),
        Some(serde_json::Value::String(s)) => escape(s),
        Some(other) => escape(&other.to_string()),
    }
}
