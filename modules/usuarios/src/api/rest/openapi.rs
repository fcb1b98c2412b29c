//! OpenAPI document for the `/usuarios` endpoints.
//!
//! The runtime envelope is generic; the `*Response` types below spell out
//! its concrete shapes so the generated document shows real payloads.

use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::api::rest::dto::{CreateUserReq, DeleteUserReq, UpdateUserReq, UserDto};

/// Envelope carrying a fixed message.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "El usuario fue creado")]
    pub data: String,
    /// Same value as the HTTP status.
    #[schema(example = 201)]
    pub status: u16,
}

/// Envelope carrying one user.
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub data: UserDto,
    #[schema(example = 201)]
    pub status: u16,
}

/// Envelope carrying every user.
#[derive(Serialize, ToSchema)]
pub struct UserListResponse {
    pub data: Vec<UserDto>,
    #[schema(example = 201)]
    pub status: u16,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Grupo GASON",
        version = "1.0.0",
        description = "Api de prueba grupo GASON.",
        license(name = "MIT", url = "https://spdx.org/licenses/MIT.html")
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::api::rest::handlers::list_users,
        crate::api::rest::handlers::get_user,
        crate::api::rest::handlers::create_user,
        crate::api::rest::handlers::update_user,
        crate::api::rest::handlers::delete_user,
    ),
    components(schemas(
        UserDto,
        CreateUserReq,
        UpdateUserReq,
        DeleteUserReq,
        MessageResponse,
        UserResponse,
        UserListResponse
    )),
    tags((name = "Usuarios", description = "Endpoint para retorno de usuarios"))
)]
pub struct UsuariosApiDoc;

/// The generated document, ready to be served as JSON.
pub fn openapi() -> utoipa::openapi::OpenApi {
    UsuariosApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_both_paths_and_all_methods() {
        let doc = openapi();

        let collection = doc.paths.paths.get("/usuarios").expect("collection path");
        assert!(collection.get.is_some());
        assert!(collection.post.is_some());
        assert!(collection.put.is_some());
        assert!(collection.delete.is_some());

        let item = doc.paths.paths.get("/usuarios/{id}").expect("item path");
        assert!(item.get.is_some());
    }

    #[test]
    fn document_registers_envelope_schemas() {
        let doc = openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        for name in ["UserDto", "MessageResponse", "UserResponse", "UserListResponse"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }

    #[test]
    fn document_serializes_to_json() {
        let json = openapi().to_json().unwrap();
        assert!(json.contains("API Grupo GASON"));
    }
}
