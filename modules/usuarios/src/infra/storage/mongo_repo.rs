use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use store::StoreHandle;

use crate::contract::model::{User, UserData};
use crate::domain::repo::{RepoError, UsersRepository};
use crate::infra::storage::document::UserDocument;

/// Server error code for unique index violations.
const DUPLICATE_KEY: i32 = 11000;
const EMAIL_INDEX: &str = "email_unique";

/// Repository backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoUsersRepository {
    coll: Collection<UserDocument>,
}

impl MongoUsersRepository {
    pub fn new(store: &StoreHandle, collection: &str) -> Self {
        Self {
            coll: store.collection::<UserDocument>(collection),
        }
    }

    pub fn from_collection(coll: Collection<UserDocument>) -> Self {
        Self { coll }
    }

    /// Create the unique `email` index if it does not exist yet.
    pub async fn ensure_indexes(&self) -> Result<(), RepoError> {
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name(EMAIL_INDEX.to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.coll
            .create_index(model)
            .await
            .map_err(|e| RepoError::Unavailable(e.to_string()))?;
        tracing::debug!(collection = %self.coll.name(), index = EMAIL_INDEX, "index ensured");
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<ObjectId, RepoError> {
    ObjectId::parse_str(id.trim()).map_err(|_| RepoError::InvalidId(id.to_string()))
}

fn by_id(oid: ObjectId) -> Document {
    doc! { "_id": oid }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == DUPLICATE_KEY,
        ErrorKind::Command(ce) => ce.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// Map a driver error from a write that may collide on `email`.
fn write_error(err: MongoError, email: &str) -> RepoError {
    if is_duplicate_key(&err) {
        RepoError::DuplicateEmail(email.to_string())
    } else {
        RepoError::Unavailable(err.to_string())
    }
}

fn read_error(err: MongoError) -> RepoError {
    RepoError::Unavailable(err.to_string())
}

#[async_trait]
impl UsersRepository for MongoUsersRepository {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let docs: Vec<UserDocument> = self
            .coll
            .find(doc! {})
            .await
            .map_err(read_error)?
            .try_collect()
            .await
            .map_err(read_error)?;
        Ok(docs.into_iter().map(UserDocument::into_user).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, RepoError> {
        let docs: Vec<UserDocument> = self
            .coll
            .find(doc! { "email": email })
            .await
            .map_err(read_error)?
            .try_collect()
            .await
            .map_err(read_error)?;
        Ok(docs.into_iter().map(UserDocument::into_user).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError> {
        let oid = parse_id(id)?;
        let found = self.coll.find_one(by_id(oid)).await.map_err(read_error)?;
        Ok(found.map(UserDocument::into_user))
    }

    async fn insert(&self, data: UserData) -> Result<User, RepoError> {
        let email = data.email.clone();
        let mut document = UserDocument::from_data(data);

        let res = self
            .coll
            .insert_one(&document)
            .await
            .map_err(|e| write_error(e, &email))?;

        let oid = res.inserted_id.as_object_id().ok_or_else(|| {
            RepoError::Unavailable(format!("unexpected inserted id {}", res.inserted_id))
        })?;
        document.id = Some(oid);
        Ok(document.into_user())
    }

    async fn replace(&self, id: &str, data: UserData) -> Result<Option<User>, RepoError> {
        let oid = parse_id(id)?;
        let email = data.email.clone();

        let updated = self
            .coll
            .find_one_and_replace(by_id(oid), UserDocument::from_data(data))
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| write_error(e, &email))?;
        Ok(updated.map(UserDocument::into_user))
    }

    async fn delete(&self, id: &str) -> Result<Option<User>, RepoError> {
        let oid = parse_id(id)?;
        let removed = self
            .coll
            .find_one_and_delete(by_id(oid))
            .await
            .map_err(read_error)?;
        Ok(removed.map(UserDocument::into_user))
    }
}
