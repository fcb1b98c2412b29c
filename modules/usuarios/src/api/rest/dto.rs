use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::contract::model::{User, UserData};

/// REST DTO for user representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    /// ID de usuario generado por Mongo.
    #[schema(example = "67225d8ec6b3d63e54b6c728")]
    pub id: String,
    /// El nombre o nombres del usuario.
    #[schema(example = "Juan Pablo")]
    pub nombre: String,
    /// Apellido paterno del usuario.
    #[schema(example = "Perez")]
    pub paterno: String,
    /// Apellido materno del usuario.
    #[schema(example = "Perez")]
    pub materno: String,
    /// Nivel de uso al que puede acceder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 1)]
    pub roll: Option<i64>,
    /// Cuenta de usuario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "usuario12")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[schema(example = "juan@example.com")]
    pub email: String,
}

/// REST DTO for creating a new user
///
/// Missing text fields deserialize as empty so the presence check can
/// report all of them at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateUserReq {
    #[serde(default)]
    #[schema(example = "Juan Pablo")]
    pub nombre: String,
    #[serde(default)]
    #[schema(example = "Perez")]
    pub paterno: String,
    #[serde(default)]
    #[schema(example = "Perez")]
    pub materno: String,
    #[serde(default)]
    #[schema(example = 1)]
    pub roll: Option<i64>,
    #[serde(default)]
    #[schema(example = "usuario12")]
    pub username: Option<String>,
    /// Contrasena del usuario, se guarda tal como llega.
    #[serde(default)]
    #[schema(example = "123asdZXC")]
    pub password: Option<String>,
    #[serde(default)]
    #[schema(example = "juan@example.com")]
    pub email: String,
}

/// REST DTO for replacing a user; the id travels in the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserReq {
    #[serde(default, alias = "_id")]
    #[schema(example = "67225d8ec6b3d63e54b6c728")]
    pub id: String,
    #[serde(flatten)]
    pub user: CreateUserReq,
}

/// REST DTO for deleting a user
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserReq {
    #[serde(default, alias = "_id")]
    #[schema(example = "67225d8ec6b3d63e54b6c728")]
    pub id: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nombre: user.nombre,
            paterno: user.paterno,
            materno: user.materno,
            roll: user.roll,
            username: user.username,
            password: user.password,
            email: user.email,
        }
    }
}

impl From<CreateUserReq> for UserData {
    fn from(req: CreateUserReq) -> Self {
        Self {
            nombre: req.nombre,
            paterno: req.paterno,
            materno: req.materno,
            roll: req.roll,
            username: req.username,
            password: req.password,
            email: req.email,
        }
    }
}

impl UpdateUserReq {
    pub fn into_parts(self) -> (String, UserData) {
        (self.id, self.user.into())
    }
}
