//! Router builder for the shelf HTTP server

use axum::{extract::Request, http::HeaderValue, routing::get, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::{Timestamp, Uuid};

use shelf_kernel::ModuleRegistry;

const HTTP_METHODS: &[&str] = &["get", "post", "put", "patch", "delete"];

/// Builder for constructing the main HTTP router.
///
/// Middleware switches are recorded and applied in [`RouterBuilder::build`], so
/// they wrap every route regardless of the order the builder methods are called.
pub struct RouterBuilder {
    router: Router,
    tracing: bool,
    cors: bool,
    request_id: bool,
    timeout: Option<Duration>,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            tracing: false,
            cors: false,
            request_id: false,
            timeout: None,
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `/api/{module_name}`
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        let api_path = format!("/api/{}", module_name);
        self.router = self.router.nest(&api_path, module_router);
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.tracing = true;
        self
    }

    /// Add CORS middleware (any origin, method and header)
    pub fn with_cors(mut self) -> Self {
        self.cors = true;
        self
    }

    /// Add request ID middleware; the id is echoed back on the response
    pub fn with_request_id(mut self) -> Self {
        self.request_id = true;
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = Some(Duration::from_millis(timeout_ms));
        self
    }

    /// Serve Swagger UI at `/swagger-ui` and the raw document at `/docs/openapi.json`
    pub fn with_openapi(mut self, openapi_spec: serde_json::Value) -> Self {
        let openapi_obj: utoipa::openapi::OpenApi =
            serde_json::from_value(openapi_spec.clone()).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "merged OpenAPI document rejected, serving bare info");
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("Shelf API")
                            .version("1.0.0")
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj),
        );

        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        let mut router = self.router;

        if let Some(timeout) = self.timeout {
            router = router.layer(TimeoutLayer::new(timeout));
        }

        if self.cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.tracing {
            router = router.layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            );
        }

        if self.request_id {
            router = router
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        }

        router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge the OpenAPI fragments of every module into one document.
///
/// Module paths are prefixed with `/api/{module_name}`; a module path of `/`
/// maps to the bare prefix.
pub fn openapi_document(registry: &ModuleRegistry) -> serde_json::Value {
    let mut openapi_spec = serde_json::json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Shelf API",
            "version": "1.0.0",
            "description": "In-memory book tracking API"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    openapi_spec["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": {} },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    });

    openapi_spec["paths"]["/healthz"] = serde_json::json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": { "schema": { "type": "string" } }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };

        if let Some(paths_obj) = module_spec.get("paths").and_then(|p| p.as_object()) {
            for (path, path_item) in paths_obj {
                let prefixed_path = if path == "/" {
                    format!("/api/{}", module.name())
                } else {
                    format!("/api/{}{}", module.name(), path)
                };
                openapi_spec["paths"][prefixed_path] = path_item.clone();
            }
        }

        if let Some(schemas_obj) = module_spec
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object())
        {
            for (schema_name, schema_def) in schemas_obj {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

/// One documented route: method, path and summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub method: String,
    pub path: String,
    pub summary: String,
}

/// Flatten an OpenAPI document into a sorted route table.
pub fn route_table(openapi_spec: &serde_json::Value) -> Vec<RouteEntry> {
    let mut entries = Vec::new();

    if let Some(paths) = openapi_spec.get("paths").and_then(|p| p.as_object()) {
        for (path, item) in paths {
            for method in HTTP_METHODS {
                if let Some(operation) = item.get(*method) {
                    entries.push(RouteEntry {
                        method: method.to_uppercase(),
                        path: path.clone(),
                        summary: operation
                            .get("summary")
                            .and_then(|s| s.as_str())
                            .unwrap_or_default()
                            .to_string(),
                    });
                }
            }
        }
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.method.cmp(&b.method)));
    entries
}

/// Request ID generator producing time-ordered UUIDs
#[derive(Clone, Copy)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}
