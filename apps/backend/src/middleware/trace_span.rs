//! Per-request tracing span middleware.
//!
//! Opens a `request` span with `trace_id`, `method` and `route` (the matched
//! pattern, or the raw path when nothing matched) and records `status` once
//! the handler finishes. Handler and repo logs inherit these fields.
//!
//! Expects `RequestTrace` to have already inserted a `String` trace_id into
//! `req.extensions()`, so `RequestTrace` must be wrapped outside of it
//! (i.e. `.wrap(TraceSpan).wrap(RequestTrace)`).

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::field::Empty;
use tracing::{info_span, Instrument};

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "missing-trace-id".to_string());

        let route = req.match_pattern().unwrap_or_else(|| req.path().to_string());
        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            route = %route,
            status = Empty
        );

        let fut = self.service.call(req).instrument(span.clone());
        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            span.record("status", status.as_u16());
            result
        })
    }
}
