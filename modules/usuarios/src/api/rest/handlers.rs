use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::{info, warn};

use crate::api::rest::dto::{CreateUserReq, DeleteUserReq, UpdateUserReq, UserDto};
use crate::api::rest::error::{map_domain_error, map_json_rejection, ApiError, Operation};
use crate::api::rest::messages;
use crate::api::rest::openapi::{MessageResponse, UserListResponse, UserResponse};
use crate::api::rest::response::Envelope;
use crate::domain::service::Service;

/// List every registered user
#[utoipa::path(
    get,
    path = "/usuarios",
    tag = "Usuarios",
    operation_id = "usuarios.list_users",
    responses(
        (status = 201, description = "Usuarios del sistema", body = UserListResponse),
        (status = 500, description = "No se pudo leer la coleccion", body = MessageResponse)
    )
)]
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Envelope<Vec<UserDto>>, ApiError> {
    let users = svc
        .list_users()
        .await
        .map_err(|e| map_domain_error(Operation::List, &e))?;

    Ok(Envelope::created(
        users.into_iter().map(UserDto::from).collect(),
    ))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/usuarios/{id}",
    tag = "Usuarios",
    operation_id = "usuarios.get_user",
    params(("id" = String, Path, description = "ID de usuario")),
    responses(
        (status = 201, description = "Usuario encontrado", body = UserResponse),
        (status = 404, description = "El id no corresponde a ningun usuario o la busqueda fallo", body = MessageResponse)
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Envelope<UserDto>, ApiError> {
    let user = svc
        .get_user(&id)
        .await
        .map_err(|e| map_domain_error(Operation::Get, &e))?;

    Ok(Envelope::created(UserDto::from(user)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/usuarios",
    tag = "Usuarios",
    operation_id = "usuarios.create_user",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "Usuario creado", body = MessageResponse,
            headers(("location" = String, description = "Ruta del usuario creado"))),
        (status = 400, description = "Faltan campos obligatorios", body = MessageResponse),
        (status = 412, description = "El email ya esta registrado", body = MessageResponse),
        (status = 500, description = "Falla del almacenamiento", body = MessageResponse)
    )
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<CreateUserReq>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload.map_err(|r| map_json_rejection(Operation::Create, &r))?;

    let user = svc
        .create_user(req.into())
        .await
        .map_err(|e| map_domain_error(Operation::Create, &e))?;

    info!(user_id = %user.id, "created user via REST");
    let location = format!("/usuarios/{}", user.id);
    Ok((
        [(header::LOCATION, location)],
        Envelope::created(messages::USER_CREATED),
    )
        .into_response())
}

/// Replace an existing user; the id travels in the body
#[utoipa::path(
    put,
    path = "/usuarios",
    tag = "Usuarios",
    operation_id = "usuarios.update_user",
    request_body = UpdateUserReq,
    responses(
        (status = 201, description = "Usuario modificado", body = MessageResponse),
        (status = 400, description = "Faltan campos obligatorios", body = MessageResponse),
        (status = 404, description = "El usuario no existe", body = MessageResponse),
        (status = 412, description = "El email ya esta registrado", body = MessageResponse),
        (status = 500, description = "Falla del almacenamiento", body = MessageResponse)
    )
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<UpdateUserReq>, JsonRejection>,
) -> Result<Envelope<&'static str>, ApiError> {
    let Json(req) = payload.map_err(|r| map_json_rejection(Operation::Update, &r))?;
    let (id, data) = req.into_parts();

    svc.update_user(&id, data)
        .await
        .map_err(|e| map_domain_error(Operation::Update, &e))?;

    Ok(Envelope::created(messages::USER_UPDATED))
}

/// Delete a user; the id travels in the body
#[utoipa::path(
    delete,
    path = "/usuarios",
    tag = "Usuarios",
    operation_id = "usuarios.delete_user",
    request_body = DeleteUserReq,
    responses(
        (status = 201, description = "Usuario eliminado", body = MessageResponse),
        (status = 404, description = "El usuario no existe o la busqueda fallo", body = MessageResponse),
        (status = 502, description = "El usuario existe pero no se pudo eliminar", body = MessageResponse)
    )
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<DeleteUserReq>, JsonRejection>,
) -> Result<Envelope<&'static str>, ApiError> {
    // Without a readable id there is nothing to delete
    let id = match payload {
        Ok(Json(req)) => req.id,
        Err(r) => {
            warn!(error = %r.body_text(), "unreadable delete body");
            String::new()
        }
    };

    svc.delete_user(&id)
        .await
        .map_err(|e| map_domain_error(Operation::Delete, &e))?;

    Ok(Envelope::created(messages::USER_DELETED))
}
