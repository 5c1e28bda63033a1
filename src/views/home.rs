use std::fmt::Write;

use serde_json::Value;

use super::{display_value, escape, layout};

const STAT_FIELDS: &[(&str, &str)] = &[
    ("total_users", "Total users"),
    ("recent_users", "New this week"),
    ("cache_hits", "Cache hits"),
];

/// Dashboard home. `stats` is the backend payload or a display error.
pub fn index(title: &str, stats: Result<&Value, &str>) -> String {
    let mut body = String::new();

    match stats {
        Ok(stats) => {
            body.push_str("<div class=\"grid\">\n");
            for (key, label) in STAT_FIELDS {
                let _ = writeln!(
                    body,
                    "<div class=\"card\"><div class=\"muted\">{}</div><h2>{}</h2></div>",
                    label,
                    display_value(stats.get(*key)),
                );
            }
            body.push_str("</div>\n");
            let _ = writeln!(
                body,
                "<p class=\"muted\">Updated {}</p>",
                display_value(stats.get("timestamp"))
            );
        }
        Err(message) => {
            let _ = writeln!(body, "<div class=\"card error\">{}</div>", escape(message));
        }
    }

    layout(title, &body)
}
