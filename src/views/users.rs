use std::fmt::Write;

use serde_json::Value;

use super::{display_value, escape, layout};

/// Users list with a create form that posts to the API proxy.
pub fn users(title: &str, users: &[Value], error: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(message) = error {
        let _ = writeln!(body, "<div class=\"card error\">{}</div>", escape(message));
    }

    if users.is_empty() {
        body.push_str("<p class=\"muted\">No users found.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>ID</th><th>Username</th><th>Email</th><th>Created</th></tr></thead>\n<tbody>\n",
        );
        for user in users {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                display_value(user.get("id")),
                display_value(user.get("username")),
                display_value(user.get("email")),
                display_value(user.get("created_at")),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str(
        "<div class=\"card\">\n<h3>Add user</h3>\n\
<form method=\"post\" action=\"/api/users\">\n\
<input name=\"username\" placeholder=\"Username\" required>\n\
<input name=\"email\" type=\"email\" placeholder=\"Email\" required>\n\
<button type=\"submit\">Create</button>\n</form>\n</div>\n",
    );

    layout(title, &body)
}
