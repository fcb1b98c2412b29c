//! Fixed response texts. Clients match on these strings, keep them verbatim.

pub const LIST_FAILED: &str = "No se encontro ningun usuario";
pub const USER_NOT_FOUND_OR_REMOVED: &str = "El usuario solicitado no existe o fue dado de baja";
pub const FIELDS_REQUIRED: &str = "No se pudo procesar, todos los campos son obligatorios";
pub const EMAIL_DUPLICATED: &str =
    "El campo email contiene un error, solo se puede registrar el correo una unica vez.";
pub const USER_CREATED: &str = "El usuario fue creado";
pub const SERVER_PROBLEM: &str = "Surgio un problema en el servidor, intente mas tarde.";
pub const USER_UPDATED: &str = "Modificado";
pub const UPDATE_FAILED: &str = "Se presento un error al modificar el usuario.";
pub const USER_DELETED: &str = "El usuario fue eliminado";
pub const UNEXPECTED_ERROR: &str = "Se ha presentado un error inesperado";
pub const USER_DOES_NOT_EXIST: &str = "El usuario no existe";
