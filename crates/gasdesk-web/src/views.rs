//! Minimal HTML rendering for the console shell.
//!
//! Markup is deliberately bare: a navigation list, a main region, and the
//! fixed skeleton / access-denied / notice fragments the guard chooses
//! between.

use std::fmt::Write;

use axum::response::Html;

use gasdesk_auth::AuthorizedUser;
use gasdesk_core::error::ErrorKind;

/// A navigation entry.
#[derive(Debug, Clone, Copy)]
pub struct NavLink<'a> {
    /// Target path.
    pub path: &'a str,
    /// Link text.
    pub title: &'a str,
}

/// Escape text for HTML element and attribute content.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full page with navigation around `body`.
pub fn layout(title: &str, user: Option<&AuthorizedUser>, nav: &[NavLink<'_>], body: &str) -> Html<String> {
    let mut links = String::new();
    for link in nav {
        let _ = write!(
            links,
            r#"<li><a href="{}">{}</a></li>"#,
            escape(link.path),
            escape(link.title)
        );
    }

    let account = match user {
        Some(user) => format!(
            r#"<div class="account"><span class="name">{}</span> <span class="role">{}</span><form method="post" action="/logout"><button type="submit">Log out</button></form></div>"#,
            escape(&user.user().name),
            escape(user.role_name()),
        ),
        None => String::new(),
    };

    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} · GasDesk</title></head>
<body>
<header><strong>GasDesk</strong>{account}</header>
<nav><ul>{links}</ul></nav>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    ))
}

/// Placeholder shown while the identity is still being resolved.
pub fn skeleton() -> &'static str {
    r#"<section class="skeleton" aria-busy="true"><p>Loading…</p></section>"#
}

/// Fixed view shown in place of content the user may not see.
pub fn access_denied() -> &'static str {
    r#"<section class="access-denied"><h2>Access denied</h2><p>You do not have permission to view this page.</p></section>"#
}

/// Page content placeholder for a console section.
pub fn section(title: &str) -> String {
    format!(
        r#"<section class="content" data-section="{0}"><p>{0}</p></section>"#,
        escape(title)
    )
}

/// Standalone page telling the user why nothing could be loaded.
pub fn notice(kind: ErrorKind) -> Html<String> {
    let (title, text) = match kind {
        ErrorKind::Transport => (
            "Connection problem",
            "The GasDesk service could not be reached. Check your connection and try again.",
        ),
        ErrorKind::Server => (
            "Server trouble",
            "The GasDesk service ran into a problem. Please try again in a moment.",
        ),
        _ => (
            "Something went wrong",
            "The request could not be completed. Please try again.",
        ),
    };
    let body = format!(
        r#"<section class="notice"><p>{}</p><p><a href="">Retry</a></p></section>"#,
        escape(text)
    );
    layout(title, None, &[], &body)
}

/// The login form, optionally with an error message and the last username.
pub fn login_form(message: Option<&str>, username: &str) -> Html<String> {
    let alert = message
        .map(|m| format!(r#"<p class="error" role="alert">{}</p>"#, escape(m)))
        .unwrap_or_default();
    let body = format!(
        r#"{alert}<form method="post" action="/login">
<label>Username <input name="username" value="{username}" autocomplete="username"></label>
<label>Password <input name="password" type="password" autocomplete="current-password"></label>
<button type="submit">Sign in</button>
</form>"#,
        username = escape(username),
    );
    layout("Sign in", None, &[], &body)
}
