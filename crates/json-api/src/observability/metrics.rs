//! Prometheus metrics: HTTP traffic plus checkout and order lifecycle counters.
//!
//! Every metric lives in one registry prefixed with `shopfront_json_`.

use std::sync::OnceLock;

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

use shopfront_app::domain::orders::{OrderAction, OrderStatus};

const NAMESPACE: &str = "shopfront_json";

#[derive(Debug)]
struct ShopMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    checkouts_total: IntCounter,
    checkout_items: Histogram,
    order_transitions_total: IntCounterVec,
}

static METRICS: OnceLock<Option<ShopMetrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let Some(metrics) = metrics() else {
            return Self { tracked: false };
        };

        metrics.requests_in_flight.inc();

        Self { tracked: true }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class(status_code), &code])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a completed checkout and the number of distinct products it ordered.
pub(crate) fn record_checkout(item_count: usize) {
    let Some(metrics) = metrics() else {
        return;
    };

    let items = u32::try_from(item_count).map_or(f64::from(u32::MAX), f64::from);

    metrics.checkouts_total.inc();
    metrics.checkout_items.observe(items);
}

/// Count an order status change by the action that caused it and the status it reached.
pub(crate) fn record_order_transition(action: OrderAction, to: OrderStatus) {
    if let Some(metrics) = metrics() {
        metrics
            .order_transitions_total
            .with_label_values(&[action.as_str(), to.as_str()])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    match encode() {
        Ok((content_type, body)) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(body);
        }
        Err(reason) => {
            error!("failed to render metrics: {reason}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn encode() -> Result<(HeaderValue, String), String> {
    let metrics = metrics().ok_or("metrics registry unavailable")?;

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    encoder
        .encode(&metrics.registry.gather(), &mut encoded)
        .map_err(|source| source.to_string())?;

    let content_type =
        HeaderValue::from_str(encoder.format_type()).map_err(|source| source.to_string())?;

    Ok((content_type, String::from_utf8_lossy(&encoded).into_owned()))
}

fn metrics() -> Option<&'static ShopMetrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

/// Creates `metric` and adds it to `registry`, logging whichever step fails.
fn register<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = metric
        .inspect_err(|source| error!(metric = name, "failed to create metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!(metric = name, "failed to register metric: {source}"))
        .ok()?;

    Some(metric)
}

fn build_metrics() -> Option<ShopMetrics> {
    let registry = Registry::new_custom(Some(NAMESPACE.to_owned()), None)
        .inspect_err(|source| error!("failed to create metrics registry: {source}"))
        .ok()?;

    let requests_total = register(
        &registry,
        "http_requests_total",
        IntCounterVec::new(
            Opts::new(
                "http_requests_total",
                "HTTP requests by method, route, status class and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "http_request_duration_seconds",
        HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds by method and route.",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "http_requests_in_flight",
        IntGauge::new("http_requests_in_flight", "HTTP requests currently being served."),
    )?;

    let checkouts_total = register(
        &registry,
        "checkouts_total",
        IntCounter::new("checkouts_total", "Carts turned into orders."),
    )?;

    let checkout_items = register(
        &registry,
        "checkout_items",
        Histogram::with_opts(
            HistogramOpts::new("checkout_items", "Distinct products per checked out order.")
                .buckets(vec![0.0, 1.0, 2.0, 3.0, 5.0, 10.0, 20.0, 50.0]),
        ),
    )?;

    let order_transitions_total = register(
        &registry,
        "order_transitions_total",
        IntCounterVec::new(
            Opts::new(
                "order_transitions_total",
                "Order status changes by action and resulting status.",
            ),
            &["action", "to"],
        ),
    )?;

    Some(ShopMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        checkouts_total,
        checkout_items,
        order_transitions_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
