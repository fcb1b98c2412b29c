use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Deserializer, Serialize};

use crate::contract::model::{User, UserData};

/// On-disk shape of a user. Field names are the collection's contract.
///
/// Fields are lenient on read: documents written by other clients may lack
/// some of them, carry a version key, or store `roll` as a double.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub paterno: String,
    #[serde(default)]
    pub materno: String,
    #[serde(
        default,
        deserialize_with = "lenient_roll",
        skip_serializing_if = "Option::is_none"
    )]
    pub roll: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub email: String,
}

fn lenient_roll<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Bson>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Bson::Int32(v)) => Some(i64::from(v)),
        Some(Bson::Int64(v)) => Some(v),
        Some(Bson::Double(v)) if v.fract() == 0.0 => Some(v as i64),
        _ => None,
    })
}

impl UserDocument {
    /// A document without `_id`, ready for insert or replacement.
    pub fn from_data(data: UserData) -> Self {
        Self {
            id: None,
            nombre: data.nombre,
            paterno: data.paterno,
            materno: data.materno,
            roll: data.roll,
            password: data.password,
            username: data.username,
            email: data.email,
        }
    }

    pub fn into_user(self) -> User {
        let id = self.id.map(|oid| oid.to_hex()).unwrap_or_default();
        User::from_data(
            id,
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

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn reads_documents_with_version_key_and_double_roll() {
        let oid = ObjectId::new();
        let raw = doc! {
            "_id": oid,
            "nombre": "Juan",
            "paterno": "Perez",
            "materno": "Perez",
            "roll": 2.0,
            "email": "a@a.com",
            "__v": 0,
        };

        let parsed: UserDocument = bson::from_document(raw).unwrap();
        let user = parsed.into_user();

        assert_eq!(user.id, oid.to_hex());
        assert_eq!(user.roll, Some(2));
        assert_eq!(user.username, None);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let parsed: UserDocument = bson::from_document(doc! { "email": "x@x.com" }).unwrap();
        assert_eq!(parsed.id, None);
        assert_eq!(parsed.nombre, "");
        assert_eq!(parsed.roll, None);
    }

    #[test]
    fn new_documents_leave_id_to_the_store() {
        let data = UserData {
            nombre: "Ana".into(),
            paterno: "Ruiz".into(),
            materno: "Diaz".into(),
            roll: Some(1),
            username: None,
            password: Some("pw".into()),
            email: "ana@x.com".into(),
        };

        let encoded = bson::to_document(&UserDocument::from_data(data)).unwrap();

        assert!(!encoded.contains_key("_id"));
        assert!(!encoded.contains_key("username"));
        assert_eq!(encoded.get_i64("roll").unwrap(), 1);
        assert_eq!(encoded.get_str("password").unwrap(), "pw");
    }
}
