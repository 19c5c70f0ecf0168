//! Request-context middleware
//!
//! For every inbound request:
//!
//! 1. take the `X-Request-ID` header, or generate an id
//! 2. open a `request` span carrying component, method, path and request id
//! 3. hand handlers a [`RequestScope`] (context + span) via extensions
//! 4. cancel the context if the request future is dropped unfinished
//! 5. echo the request id and log one `request completed` line

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::FromRequestParts;
use axum::http::header::HeaderName;
use axum::http::request::Parts;
use axum::http::{Extensions, HeaderMap, HeaderValue, Request, Response};
use futures::future::BoxFuture;
use tower::{Layer, Service};
use tracing::{Instrument, Span};

use todo_domain::RequestContext;

use crate::gateway::random_hex_id;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Client-supplied id if usable, otherwise a fresh one
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(random_hex_id)
}

// =============================================================================
// RequestScope
// =============================================================================

/// What a handler gets to know about the request it serves
///
/// The span is the request-scoped logger: events recorded under it carry
/// the request's fields.
#[derive(Debug, Clone)]
pub struct RequestScope {
    context: RequestContext,
    span: Span,
}

impl RequestScope {
    pub fn new(context: RequestContext, span: Span) -> Self {
        Self { context, span }
    }

    /// Scope used when no middleware ran: background context and no span,
    /// so events go straight to the global subscriber.
    pub fn detached() -> Self {
        Self::new(RequestContext::background(), Span::none())
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub(crate) fn from_extensions(extensions: &Extensions) -> Self {
        extensions
            .get::<RequestScope>()
            .cloned()
            .unwrap_or_else(Self::detached)
    }
}

impl<S> FromRequestParts<S> for RequestScope
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_extensions(&parts.extensions))
    }
}

// =============================================================================
// RequestContextLayer
// =============================================================================

#[derive(Debug, Clone)]
pub struct RequestContextLayer {
    component: Arc<str>,
}

impl RequestContextLayer {
    pub fn new(component: impl Into<Arc<str>>) -> Self {
        Self {
            component: component.into(),
        }
    }
}

impl<S> Layer<S> for RequestContextLayer {
    type Service = RequestContextService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestContextService {
            inner,
            component: Arc::clone(&self.component),
        }
    }
}

// =============================================================================
// RequestContextService
// =============================================================================

#[derive(Debug, Clone)]
pub struct RequestContextService<S> {
    inner: S,
    component: Arc<str>,
}

impl<InnerService, RequestBody, ResponseBody> Service<Request<RequestBody>>
    for RequestContextService<InnerService>
where
    InnerService:
        Service<Request<RequestBody>, Response = Response<ResponseBody>> + Clone + Send + 'static,
    InnerService::Future: Send,
    RequestBody: Send + 'static,
    ResponseBody: Send + 'static,
{
    type Response = Response<ResponseBody>;
    type Error = InnerService::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(context)
    }

    fn call(&mut self, mut request: Request<RequestBody>) -> Self::Future {
        let started = Instant::now();
        let request_id = resolve_request_id(request.headers());
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        let span = tracing::info_span!(
            "request",
            component = %self.component,
            method = %method,
            path = %path,
            request_id = %request_id,
        );
        let context = RequestContext::new(request_id.clone());
        let guard = context.cancellation().cancel_on_drop();
        request
            .extensions_mut()
            .insert(RequestScope::new(context, span.clone()));

        // Drive the instance poll_ready was called on; keep the clone for next time.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let result = inner.call(request).instrument(span.clone()).await;
            guard.disarm();
            let mut response = result?;

            if let Ok(header_value) = HeaderValue::from_str(&request_id) {
                response
                    .headers_mut()
                    .insert(REQUEST_ID_HEADER.clone(), header_value);
            }

            let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            span.in_scope(|| {
                tracing::info!(
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    status = response.status().as_u16(),
                    duration_ms,
                    "request completed"
                );
            });

            Ok(response)
        })
    }
}
