use super::{escape, layout};

pub fn not_found(title: &str, detail: Option<&str>) -> String {
    let body = match detail {
        Some(d) => format!(
            "<p>{}</p>\n<p><a href=\"/\">Back to the dashboard</a></p>\n",
            escape(d)
        ),
        None => "<p>The page you requested does not exist.</p>\n<p><a href=\"/\">Back to the dashboard</a></p>\n"
            .to_string(),
    };
    layout(title, &body)
}
