use async_trait::async_trait;

use crate::contract::model::{User, UserData};

/// Public API of the usuarios module for in-process callers.
///
/// Failures carry a [`UsuariosError`](crate::contract::error::UsuariosError)
/// inside the `anyhow::Error`.
#[async_trait]
pub trait UsuariosApi: Send + Sync {
    async fn list_users(&self) -> anyhow::Result<Vec<User>>;

    /// All users registered with `email`; empty when none.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Vec<User>>;

    async fn get_user(&self, id: &str) -> anyhow::Result<User>;

    async fn create_user(&self, data: UserData) -> anyhow::Result<User>;

    /// Replace every field of the user and return the stored result.
    async fn update_user(&self, id: &str, data: UserData) -> anyhow::Result<User>;

    /// Remove the user and return what was deleted.
    async fn delete_user(&self, id: &str) -> anyhow::Result<User>;
}
