use std::collections::BTreeMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::contract::model::{User, UserData};
use crate::domain::repo::{RepoError, UsersRepository};

/// Process-local repository with the same contract as the Mongo adapter,
/// including store-style ids and the unique email constraint.
///
/// Backs `--mock` runs and the router tests.
#[derive(Default)]
pub struct InMemoryUsersRepository {
    // ObjectIds grow monotonically, so key order is insertion order.
    users: RwLock<BTreeMap<String, User>>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn canonical_id(id: &str) -> Result<String, RepoError> {
    ObjectId::parse_str(id.trim())
        .map(|oid| oid.to_hex())
        .map_err(|_| RepoError::InvalidId(id.to_string()))
}

fn email_taken(users: &BTreeMap<String, User>, email: &str, except: Option<&str>) -> bool {
    users
        .values()
        .any(|u| u.email == email && Some(u.id.as_str()) != except)
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.email == email)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError> {
        let key = canonical_id(id)?;
        Ok(self.users.read().await.get(&key).cloned())
    }

    async fn insert(&self, data: UserData) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if email_taken(&users, &data.email, None) {
            return Err(RepoError::DuplicateEmail(data.email));
        }

        let user = User::from_data(ObjectId::new().to_hex(), data);
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn replace(&self, id: &str, data: UserData) -> Result<Option<User>, RepoError> {
        let key = canonical_id(id)?;
        let mut users = self.users.write().await;
        if !users.contains_key(&key) {
            return Ok(None);
        }
        if email_taken(&users, &data.email, Some(&key)) {
            return Err(RepoError::DuplicateEmail(data.email));
        }

        let user = User::from_data(key.clone(), data);
        users.insert(key, user.clone());
        Ok(Some(user))
    }

    async fn delete(&self, id: &str) -> Result<Option<User>, RepoError> {
        let key = canonical_id(id)?;
        Ok(self.users.write().await.remove(&key))
    }
}
