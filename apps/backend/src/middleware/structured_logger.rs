//! One `request_completed` event per request.
//!
//! Events carry the matched route pattern (`/api/vehicles/{id}`) rather than
//! the raw path, the API resource it belongs to, and the `{id}` segment when
//! the route has one, so log queries can group by endpoint.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

/// Route label for requests no resource matched.
const UNMATCHED: &str = "unmatched";

/// API resource a route pattern belongs to.
pub fn resource_of(pattern: &str) -> &'static str {
    let mut segments = pattern.trim_start_matches('/').split('/');
    match (segments.next(), segments.next()) {
        (Some(""), _) => "root",
        (Some("health"), _) => "health",
        (Some("api"), Some("vehicles")) => "vehicles",
        (Some("api"), Some("services")) => "service_history",
        (Some("api"), Some("service-types")) => "service_types",
        (Some("api"), Some("catalog")) => "catalog",
        _ => "other",
    }
}

#[derive(Debug)]
struct Completed {
    method: String,
    route: String,
    resource: &'static str,
    record_id: Option<String>,
    status: StatusCode,
    duration_us: u64,
    trace_id: String,
}

impl Completed {
    fn from_request(
        req: &HttpRequest,
        method: String,
        status: StatusCode,
        start: Instant,
        trace_id: String,
    ) -> Self {
        let route = req
            .match_pattern()
            .unwrap_or_else(|| UNMATCHED.to_string());
        Self {
            method,
            resource: resource_of(&route),
            record_id: req.match_info().get("id").map(str::to_string),
            route,
            status,
            duration_us: start.elapsed().as_micros() as u64,
            trace_id,
        }
    }

    fn emit(&self) {
        let status = self.status.as_u16();
        let record_id = self.record_id.as_deref().unwrap_or("");
        if self.status.is_server_error() {
            error!(http.method = %self.method, http.route = %self.route, api.resource = self.resource, record_id, http.status_code = status, duration_us = self.duration_us, trace_id = %self.trace_id, "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %self.method, http.route = %self.route, api.resource = self.resource, record_id, http.status_code = status, duration_us = self.duration_us, trace_id = %self.trace_id, "request_completed");
        } else {
            info!(http.method = %self.method, http.route = %self.route, api.resource = self.resource, record_id, http.status_code = status, duration_us = self.duration_us, trace_id = %self.trace_id, "request_completed");
        }
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let http_req = req.request().clone();
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let completed = match &result {
                Ok(res) => {
                    Completed::from_request(res.request(), method, res.status(), start, trace_id)
                }
                Err(err) => Completed::from_request(
                    &http_req,
                    method,
                    err.as_response_error().status_code(),
                    start,
                    trace_id,
                ),
            };
            completed.emit();
            result
        })
    }
}
