//! HTML pages.

use std::fmt::Write;

use crate::models::Session;
use crate::stats::Summary;

pub const INDEX: &str = include_str!("index.html");
pub const FOCUS: &str = include_str!("focus.html");

const DASHBOARD_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Dashboard - focusd</title>
<link rel="stylesheet" href="/static/css/style.css">
</head>
<body>
<nav><a href="/">Home</a> <a href="/focus">Focus</a> <a href="/dashboard">Dashboard</a></nav>
<main>
<h1>Dashboard</h1>
"#;

const DASHBOARD_TAIL: &str = "</main>\n</body>\n</html>\n";

/// Render the dashboard with totals and the recent history table.
pub fn render_dashboard(summary: &Summary, recent: &[Session], current: Option<&Session>) -> String {
    let mut html = String::from(DASHBOARD_HEAD);

    if let Some(session) = current {
        let _ = writeln!(
            html,
            "<p class=\"in-progress\">Session {} ({}) in progress since {}.</p>",
            session.id,
            escape(&session.session_type),
            session.start_time.format("%H:%M"),
        );
    }

    let _ = write!(
        html,
        "<section class=\"totals\">\n\
         <div><strong>{}</strong> sessions</div>\n\
         <div><strong>{}</strong> completed</div>\n\
         <div><strong>{}</strong> minutes focused</div>\n\
         </section>\n",
        summary.total_sessions,
        summary.completed_sessions,
        format_minutes(summary.total_minutes),
    );

    html.push_str("<h2>Recent sessions</h2>\n");
    if recent.is_empty() {
        html.push_str("<p>No sessions yet.</p>\n");
    } else {
        html.push_str(
            "<table>\n<tr><th>#</th><th>Started</th><th>Type</th><th>Environment</th>\
             <th>Planned</th><th>Actual</th><th>Status</th></tr>\n",
        );
        for session in recent {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                session.id,
                session.start_time.format("%Y-%m-%d %H:%M"),
                escape(&session.session_type),
                escape(&session.environment),
                format_minutes(session.planned_duration),
                session
                    .actual_duration
                    .map_or_else(|| "-".to_string(), format_minutes),
                if session.completed { "Completed" } else { "Stopped" },
            );
        }
        html.push_str("</table>\n");
    }

    html.push_str(DASHBOARD_TAIL);
    html
}

/// Whole minutes print without a fraction.
fn format_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{minutes:.0}")
    } else {
        format!("{minutes:.1}")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
