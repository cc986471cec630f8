//! Permission-guarded console pages.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

use gasdesk_auth::RouteGuard;

use crate::extractors::AuthContext;
use crate::state::WebState;
use crate::views::{self, NavLink};

/// A console page and the permission it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Mount path.
    pub path: &'static str,
    /// Heading and navigation text.
    pub title: &'static str,
    /// Required permission; `None` for pages every signed-in user sees.
    pub required: Option<&'static str>,
}

const fn page(path: &'static str, title: &'static str, required: Option<&'static str>) -> Page {
    Page {
        path,
        title,
        required,
    }
}

/// Every guarded page, in navigation order.
pub const PAGES: &[Page] = &[
    page("/dashboard", "Dashboard", None),
    page("/customers", "Customers", Some("customer:view")),
    page("/suppliers", "Suppliers", Some("supplier:view")),
    page("/products", "Products", Some("product:view")),
    page("/orders", "Orders", Some("order:view")),
    page("/deliveries", "Deliveries", Some("delivery:view")),
    page("/gas-conversions", "Gas conversions", Some("gas_conversion:view")),
    page("/warehouse", "Warehouse", Some("warehouse:view")),
    page("/audits", "Customer audits", Some("audit:view")),
    page("/return-receipts", "Return receipts", Some("return_receipt:view")),
    page("/users", "Users", Some("user:view")),
];

/// GET /
pub async fn root(State(state): State<WebState>) -> Redirect {
    Redirect::temporary(&state.config.auth.landing_path)
}

/// Render `page` for the request's resolved identity.
pub async fn render(ctx: AuthContext, page: &'static Page) -> Response {
    if let Some(response) = ctx.failure_response() {
        return response;
    }

    let nav: Vec<NavLink<'_>> = PAGES
        .iter()
        .filter(|p| ctx.can(p.required))
        .map(|p| NavLink {
            path: p.path,
            title: p.title,
        })
        .collect();

    let (status, body) = RouteGuard::new(page.required).wrap(
        ctx.snapshot(),
        ctx.controller().evaluator(),
        || (StatusCode::OK, views::section(page.title)),
        || (StatusCode::OK, views::skeleton().to_string()),
        || (StatusCode::FORBIDDEN, views::access_denied().to_string()),
    );

    let html = views::layout(page.title, ctx.snapshot().user(), &nav, &body);
    (status, ctx.jar(), html).into_response()
}
