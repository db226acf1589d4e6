pub mod handlers;
pub mod models;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{get, put},
    Router,
};
use serde_json::json;
use shelf_kernel::{InitCtx, Module};

pub use models::{Book, BookId, BookStatus, NewBook};
pub use store::BookStore;

/// Books module: owns the book store and exposes it under `/api/books`
pub struct BooksModule {
    store: Arc<BookStore>,
}

impl BooksModule {
    pub fn new(store: Arc<BookStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<BookStore> {
        &self.store
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = self.store.len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(handlers::list_books).post(handlers::create_book))
            .route("/health", get(handlers::health_check))
            .route("/status/{status}", get(handlers::list_books_by_status))
            .route("/{id}", get(handlers::get_book))
            .route("/{id}/status", put(handlers::update_book_status))
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let book_ref = json!({ "$ref": "#/components/schemas/Book" });
        let book_list = json!({ "type": "array", "items": book_ref });
        let bad_request = json!({
            "description": "Malformed request",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64", "minimum": 1 }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Every book in insertion order",
                                "content": { "application/json": { "schema": book_list } }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/NewBook" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Stored book with its assigned id",
                                "content": { "application/json": { "schema": book_ref } }
                            },
                            "400": bad_request
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": { "application/json": { "schema": book_ref } }
                            },
                            "400": bad_request,
                            "404": { "description": "No book with this id" }
                        }
                    }
                },
                "/status/{status}": {
                    "get": {
                        "summary": "List books by status",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "status",
                            "in": "path",
                            "required": true,
                            "schema": { "$ref": "#/components/schemas/BookStatus" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Matching books in insertion order",
                                "content": { "application/json": { "schema": book_list } }
                            },
                            "400": bad_request
                        }
                    }
                },
                "/{id}/status": {
                    "put": {
                        "summary": "Set the status of a book",
                        "tags": ["Books"],
                        "parameters": [
                            id_param,
                            {
                                "name": "status",
                                "in": "query",
                                "required": true,
                                "schema": { "$ref": "#/components/schemas/BookStatus" }
                            }
                        ],
                        "responses": {
                            "200": { "description": "Applied, or ignored when the id is unknown" },
                            "400": bad_request
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "BookStatus": {
                        "type": "string",
                        "enum": BookStatus::ALL.map(|s| s.as_str())
                    },
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64", "description": "Unique identifier for the book" },
                            "title": { "type": "string", "description": "Title of the book" },
                            "author": { "type": "string", "description": "Author of the book" },
                            "status": { "$ref": "#/components/schemas/BookStatus" }
                        },
                        "required": ["id", "title", "author", "status"]
                    },
                    "NewBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "default": "" },
                            "author": { "type": "string", "default": "" },
                            "status": { "$ref": "#/components/schemas/BookStatus" }
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            books = self.store.len(),
            "books module stopped, in-memory records discarded"
        );
        Ok(())
    }
}

/// Create a books module around a fresh, empty store
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new(Arc::new(BookStore::new())))
}
