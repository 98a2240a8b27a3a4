//! Request logging middleware.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::extensions::*;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Paths served without a span, request id or traffic metrics.
const UNTRACED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

/// What is known about a request once the rest of the chain has run.
#[derive(Debug)]
struct Completed<'a> {
    request_id: &'a str,
    method: &'a str,
    route: &'a str,
    status: StatusCode,
    elapsed: Duration,
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let names = spans::request_span_name(&method, req.uri().path());
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %names.route,
        path = %req.uri().path(),
        remote_addr = %req.remote_addr(),
        user_uuid = tracing::field::Empty,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent_context) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent_context)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    // Set by the auth hoop, so absent for rejected tokens and public routes.
    if let Ok(user) = depot.user_uuid_or_401() {
        span.record("user_uuid", tracing::field::display(user));
    }

    let completed = Completed {
        request_id: &request_id,
        method: &method,
        route: &names.route,
        status: request_ids::response_status_or_ok(res.status_code),
        elapsed: started.elapsed(),
    };

    metrics::observe_request(
        completed.method,
        completed.route,
        completed.status.as_u16(),
        completed.elapsed.as_secs_f64(),
    );

    log_completion(&span, &completed);
}

fn log_completion(span: &Span, completed: &Completed<'_>) {
    let status = completed.status.as_u16();
    let duration_ms = completed.elapsed.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    span.record("status", status);
    span.record("duration_ms", duration_ms);

    let _entered = span.enter();

    info!(status, duration_ms, "request.completed");

    if completed.status.is_server_error() {
        error!(
            status,
            method = completed.method,
            route = completed.route,
            request_id = completed.request_id,
            "server error response"
        );
    } else if completed.status.is_client_error() {
        warn!(
            status,
            method = completed.method,
            route = completed.route,
            request_id = completed.request_id,
            "client error response"
        );
    }

    if duration_ms > threshold_ms {
        warn!(
            method = completed.method,
            route = completed.route,
            request_id = completed.request_id,
            duration_ms,
            threshold_ms,
            "slow request detected"
        );
    }
}
