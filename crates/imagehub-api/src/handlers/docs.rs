//! OpenAPI document and Swagger UI.

use axum::Json;
use axum::response::Html;
use serde_json::{Map, Value, json};

/// GET /api/docs
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// GET /api/docs/openapi.json
pub async fn openapi_json() -> Json<Value> {
    Json(openapi_document())
}

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>ImageHub API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({
        url: "/api/docs/openapi.json",
        dom_id: "#swagger-ui",
        persistAuthorization: true,
      });
    };
  </script>
</body>
</html>
"##;

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
    })
}

fn data_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "required": ["success", "data"],
                    "properties": {
                        "success": { "type": "boolean" },
                        "data": schema
                    }
                }
            }
        }
    })
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn image_id_param() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string", "format": "uuid" }
    })
}

fn image_form(file_required: bool) -> Value {
    let required: Vec<&str> = if file_required { vec!["file"] } else { Vec::new() };
    json!({
        "required": true,
        "content": {
            "multipart/form-data": {
                "schema": {
                    "type": "object",
                    "required": required,
                    "properties": {
                        "file": { "type": "string", "format": "binary", "description": "PNG, JPEG, GIF, or WebP" },
                        "title": { "type": "string", "maxLength": 200 },
                        "description": { "type": "string", "maxLength": 2000, "description": "An empty value clears the description on update" }
                    }
                }
            }
        }
    })
}

/// Build the OpenAPI 3.0 document describing every route.
pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "ImageHub API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "User registration and login with per-user image storage."
        },
        "servers": [{ "url": "/" }],
        "tags": [
            { "name": "auth" },
            { "name": "images" },
            { "name": "health" }
        ],
        "paths": paths(),
        "components": {
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
            },
            "schemas": schemas()
        }
    })
}

fn paths() -> Map<String, Value> {
    let secured = json!([{ "bearerAuth": [] }]);
    let mut map = Map::new();
    map.insert(
        "/api/auth/register".to_string(),
        json!({
            "post": {
                "tags": ["auth"],
                "summary": "Register a new account",
                "requestBody": {
                    "required": true,
                    "content": { "application/json": { "schema": schema_ref("RegisterRequest") } }
                },
                "responses": {
                    "201": data_response("Account created", schema_ref("User")),
                    "400": error_response("Invalid input or email already registered")
                }
            }
        }),
    );
    map.insert(
        "/api/auth/login".to_string(),
        json!({
            "post": {
                "tags": ["auth"],
                "summary": "Exchange credentials for an access token",
                "requestBody": {
                    "required": true,
                    "content": { "application/json": { "schema": schema_ref("LoginRequest") } }
                },
                "responses": {
                    "200": data_response("Authenticated", schema_ref("LoginResponse")),
                    "400": error_response("Invalid input"),
                    "401": error_response("Invalid email or password")
                }
            }
        }),
    );
    map.insert(
        "/api/auth/me".to_string(),
        json!({
            "get": {
                "tags": ["auth"],
                "summary": "Current user",
                "security": secured,
                "responses": {
                    "200": data_response("The authenticated user", schema_ref("User")),
                    "401": error_response("Missing or invalid token")
                }
            }
        }),
    );
    map.insert(
        "/api/images".to_string(),
        json!({
            "get": {
                "tags": ["images"],
                "summary": "List the caller's images, newest first",
                "security": secured,
                "parameters": [
                    { "name": "page", "in": "query", "schema": { "type": "integer", "minimum": 1, "default": 1 } },
                    { "name": "per_page", "in": "query", "schema": { "type": "integer", "minimum": 1, "maximum": 100, "default": 20 } }
                ],
                "responses": {
                    "200": data_response("A page of images", schema_ref("ImagePage")),
                    "401": error_response("Missing or invalid token")
                }
            },
            "post": {
                "tags": ["images"],
                "summary": "Upload an image",
                "security": secured,
                "requestBody": image_form(true),
                "responses": {
                    "201": data_response("Image stored", schema_ref("Image")),
                    "400": error_response("Missing, empty, oversized, or unsupported file"),
                    "401": error_response("Missing or invalid token"),
                    "413": error_response("Request body too large")
                }
            }
        }),
    );
    map.insert(
        "/api/images/{id}".to_string(),
        json!({
            "parameters": [image_id_param()],
            "get": {
                "tags": ["images"],
                "summary": "Get image metadata",
                "security": secured,
                "responses": {
                    "200": data_response("Image metadata", schema_ref("Image")),
                    "401": error_response("Missing or invalid token"),
                    "403": error_response("Image belongs to another user"),
                    "404": error_response("Image not found")
                }
            },
            "put": {
                "tags": ["images"],
                "summary": "Update title, description, or file",
                "security": secured,
                "requestBody": image_form(false),
                "responses": {
                    "200": data_response("Updated image", schema_ref("Image")),
                    "400": error_response("Nothing to update or invalid file"),
                    "401": error_response("Missing or invalid token"),
                    "403": error_response("Image belongs to another user"),
                    "404": error_response("Image not found")
                }
            },
            "delete": {
                "tags": ["images"],
                "summary": "Delete an image and its file",
                "security": secured,
                "responses": {
                    "200": data_response("Deleted", schema_ref("Message")),
                    "401": error_response("Missing or invalid token"),
                    "403": error_response("Image belongs to another user"),
                    "404": error_response("Image not found")
                }
            }
        }),
    );
    map.insert(
        "/api/images/{id}/file".to_string(),
        json!({
            "parameters": [image_id_param()],
            "get": {
                "tags": ["images"],
                "summary": "Download the image bytes",
                "security": secured,
                "responses": {
                    "200": {
                        "description": "Image content",
                        "content": {
                            "image/png": { "schema": { "type": "string", "format": "binary" } },
                            "image/jpeg": { "schema": { "type": "string", "format": "binary" } },
                            "image/gif": { "schema": { "type": "string", "format": "binary" } },
                            "image/webp": { "schema": { "type": "string", "format": "binary" } }
                        }
                    },
                    "401": error_response("Missing or invalid token"),
                    "403": error_response("Image belongs to another user"),
                    "404": error_response("Image not found")
                }
            }
        }),
    );
    map.insert(
        "/api/health".to_string(),
        json!({
            "get": {
                "tags": ["health"],
                "summary": "Liveness",
                "responses": { "200": data_response("Service is up", schema_ref("Health")) }
            }
        }),
    );
    map.insert(
        "/api/health/detailed".to_string(),
        json!({
            "get": {
                "tags": ["health"],
                "summary": "Dependency reachability",
                "responses": { "200": data_response("Component status", schema_ref("DetailedHealth")) }
            }
        }),
    );
    map
}

fn schemas() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(
        "Error".to_string(),
        json!({
            "type": "object",
            "required": ["error", "message"],
            "properties": {
                "error": { "type": "string", "example": "VALIDATION_ERROR" },
                "message": { "type": "string" },
                "details": { "type": "object", "additionalProperties": true }
            }
        }),
    );
    map.insert(
        "Message".to_string(),
        json!({
            "type": "object",
            "properties": { "message": { "type": "string" } }
        }),
    );
    map.insert(
        "RegisterRequest".to_string(),
        json!({
            "type": "object",
            "required": ["email", "name", "password"],
            "properties": {
                "email": { "type": "string", "format": "email" },
                "name": { "type": "string", "minLength": 1, "maxLength": 100 },
                "password": { "type": "string", "format": "password", "minLength": 8, "maxLength": 128 }
            }
        }),
    );
    map.insert(
        "LoginRequest".to_string(),
        json!({
            "type": "object",
            "required": ["email", "password"],
            "properties": {
                "email": { "type": "string", "format": "email" },
                "password": { "type": "string", "format": "password" }
            }
        }),
    );
    map.insert(
        "User".to_string(),
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "string", "format": "uuid" },
                "email": { "type": "string", "format": "email" },
                "name": { "type": "string" },
                "created_at": { "type": "string", "format": "date-time" }
            }
        }),
    );
    map.insert(
        "LoginResponse".to_string(),
        json!({
            "type": "object",
            "properties": {
                "access_token": { "type": "string" },
                "token_type": { "type": "string", "example": "Bearer" },
                "expires_at": { "type": "string", "format": "date-time" },
                "expires_in": { "type": "integer" },
                "user": schema_ref("User")
            }
        }),
    );
    map.insert(
        "Image".to_string(),
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "string", "format": "uuid" },
                "owner_id": { "type": "string", "format": "uuid" },
                "title": { "type": "string" },
                "description": { "type": "string", "nullable": true },
                "original_filename": { "type": "string" },
                "mime_type": { "type": "string" },
                "size_bytes": { "type": "integer", "format": "int64" },
                "width": { "type": "integer" },
                "height": { "type": "integer" },
                "file_url": { "type": "string" },
                "created_at": { "type": "string", "format": "date-time" },
                "updated_at": { "type": "string", "format": "date-time" }
            }
        }),
    );
    map.insert(
        "ImagePage".to_string(),
        json!({
            "type": "object",
            "properties": {
                "items": { "type": "array", "items": schema_ref("Image") },
                "total": { "type": "integer" },
                "page": { "type": "integer" },
                "per_page": { "type": "integer" },
                "total_pages": { "type": "integer" }
            }
        }),
    );
    map.insert(
        "Health".to_string(),
        json!({
            "type": "object",
            "properties": {
                "status": { "type": "string" },
                "version": { "type": "string" },
                "uptime_seconds": { "type": "integer" }
            }
        }),
    );
    map.insert(
        "DetailedHealth".to_string(),
        json!({
            "type": "object",
            "properties": {
                "status": { "type": "string", "enum": ["ok", "degraded"] },
                "version": { "type": "string" },
                "uptime_seconds": { "type": "integer" },
                "database": schema_ref("ComponentHealth"),
                "storage": schema_ref("ComponentHealth")
            }
        }),
    );
    map.insert(
        "ComponentHealth".to_string(),
        json!({
            "type": "object",
            "properties": {
                "component": { "type": "string" },
                "status": { "type": "string", "enum": ["up", "down"] }
            }
        }),
    );
    map
}
