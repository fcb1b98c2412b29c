/// Pure user model for in-process consumers (no serde).
///
/// `id` is the store-assigned identifier rendered as a 24-char hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub nombre: String,
    pub paterno: String,
    pub materno: String,
    pub roll: Option<i64>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: String,
}

/// Every field of a user except the identifier.
///
/// Used both for creation and for full replacement on update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserData {
    pub nombre: String,
    pub paterno: String,
    pub materno: String,
    pub roll: Option<i64>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: String,
}

impl User {
    pub fn from_data(id: impl Into<String>, data: UserData) -> Self {
        Self {
            id: id.into(),
            nombre: data.nombre,
            paterno: data.paterno,
            materno: data.materno,
            roll: data.roll,
            username: data.username,
            password: data.password,
            email: data.email,
        }
    }

    pub fn into_data(self) -> (String, UserData) {
        (
            self.id,
            UserData {
                nombre: self.nombre,
                paterno: self.paterno,
                materno: self.materno,
                roll: self.roll,
                username: self.username,
                password: self.password,
                email: self.email,
            },
        )
    }
}
