use crate::contract::model::UserData;

/// Fields that must be present and non-blank on create and update.
pub const REQUIRED_FIELDS: [&str; 4] = ["nombre", "paterno", "materno", "email"];

/// Every required field that is empty or whitespace only, in declaration order.
pub fn missing_required_fields(data: &UserData) -> Vec<&'static str> {
    let values = [&data.nombre, &data.paterno, &data.materno, &data.email];
    REQUIRED_FIELDS
        .iter()
        .zip(values)
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}
