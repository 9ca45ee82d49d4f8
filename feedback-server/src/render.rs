//! Presentation layer: pure functions from form state to HTML.
//!
//! Rendering never queries the store; callers pass everything in. Every
//! interpolated value is HTML-escaped, and every rendered form embeds the
//! anti-forgery token as a hidden field.

use feedback_storage::{FeedbackRecord, FeedbackStats};

use crate::validate::{FieldErrors, SubmittedFields, RATING_MAX, RATING_MIN};

/// Escapes text for safe interpolation into HTML.
pub fn escape_html(input: &str) -> String {
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn field_error(errors: &FieldErrors, field: &str) -> String {
    match errors.get(field) {
        Some(message) => format!(
            "<p class=\"error\" data-field=\"{}\">{}</p>",
            field,
            escape_html(message)
        ),
        None => String::new(),
    }
}

/// Renders the feedback form, pre-filled with `values` and annotated with
/// `errors` (both empty for the initial GET).
pub fn render_form(values: &SubmittedFields, errors: &FieldErrors, csrf_token: &str) -> String {
    let mut body = String::from("<h1>Leave feedback</h1>\n");

    body.push_str("<form method=\"post\" action=\"/feedback/\">\n");
    body.push_str(&format!(
        "<input type=\"hidden\" name=\"csrf_token\" value=\"{}\">\n",
        escape_html(csrf_token)
    ));

    body.push_str(&field_error(errors, "name"));
    body.push_str(&format!(
        "<label>Name <input type=\"text\" name=\"name\" value=\"{}\"></label>\n",
        escape_html(&values.name)
    ));

    body.push_str(&field_error(errors, "email"));
    body.push_str(&format!(
        "<label>Email <input type=\"text\" name=\"email\" value=\"{}\"></label>\n",
        escape_html(&values.email)
    ));

    body.push_str(&field_error(errors, "message"));
    body.push_str(&format!(
        "<label>Message <textarea name=\"message\">{}</textarea></label>\n",
        escape_html(&values.message)
    ));

    body.push_str(&field_error(errors, "rating"));
    body.push_str(&format!(
        "<label>Rating ({}-{}) <input type=\"text\" name=\"rating\" value=\"{}\"></label>\n",
        RATING_MIN,
        RATING_MAX,
        escape_html(&values.rating)
    ));

    body.push_str("<button type=\"submit\">Send</button>\n</form>");

    page("Leave feedback", &body)
}

/// Static confirmation page shown after a successful submission.
pub fn render_thanks() -> String {
    page(
        "Thank you",
        "<h1>Thank you for your feedback!</h1>\n<p><a href=\"/feedback/\">Leave more feedback</a></p>",
    )
}

/// Operator-facing listing, most recent first.
pub fn render_admin_list(records: &[FeedbackRecord], search: &str, rating: Option<i64>) -> String {
    let mut body = String::from("<h1>Feedback</h1>\n");

    body.push_str("<form method=\"get\" action=\"/admin/feedback/\">\n");
    body.push_str(&format!(
        "<input type=\"text\" name=\"q\" value=\"{}\" placeholder=\"Search\">\n",
        escape_html(search)
    ));
    body.push_str("<select name=\"rating\"><option value=\"\">Any rating</option>");
    for r in RATING_MIN..=RATING_MAX {
        let selected = if rating == Some(r) { " selected" } else { "" };
        body.push_str(&format!("<option value=\"{}\"{}>{}</option>", r, selected, r));
    }
    body.push_str("</select>\n<button type=\"submit\">Filter</button>\n</form>\n");

    body.push_str("<table>\n<tr><th>Name</th><th>Email</th><th>Rating</th><th>Submitted</th><th>Message</th></tr>\n");
    for record in records {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&record.name),
            escape_html(&record.email),
            record.rating,
            record.created_at.to_rfc3339(),
            escape_html(&record.message),
        ));
    }
    body.push_str("</table>");

    page("Feedback admin", &body)
}

/// Operator-facing aggregate stats.
pub fn render_admin_stats(stats: &FeedbackStats) -> String {
    let mut body = String::from("<h1>Feedback stats</h1>\n<ul>\n");
    body.push_str(&format!("<li>Total: {}</li>\n", stats.total));
    for (i, count) in stats.by_rating.iter().enumerate() {
        body.push_str(&format!("<li>Rating {}: {}</li>\n", i + 1, count));
    }
    if let Some(avg) = stats.average_rating {
        body.push_str(&format!("<li>Average rating: {:.2}</li>\n", avg));
    }
    if let Some(first) = stats.first_submission {
        body.push_str(&format!("<li>First submission: {}</li>\n", first.to_rfc3339()));
    }
    if let Some(last) = stats.last_submission {
        body.push_str(&format!("<li>Last submission: {}</li>\n", last.to_rfc3339()));
    }
    body.push_str("</ul>");

    page("Feedback stats", &body)
}
