#![cfg(feature = "integration")]

mod common;

use anyhow::Result;
use usuarios::{
    contract::model::UserData,
    domain::repo::{RepoError, UsersRepository},
    infra::storage::MongoUsersRepository,
};

fn data(email: &str) -> UserData {
    UserData {
        nombre: "Juan".into(),
        paterno: "Perez".into(),
        materno: "Perez".into(),
        roll: Some(1),
        username: Some("u1".into()),
        password: Some("x".into()),
        email: email.into(),
    }
}

async fn repo(collection: &str) -> Result<(common::StoreUnderTest, MongoUsersRepository)> {
    let env = common::bring_up_mongo().await?;
    let repo = MongoUsersRepository::new(&env.store, collection);
    repo.ensure_indexes().await?;
    Ok((env, repo))
}

#[tokio::test]
async fn mongo_crud_round_trip() -> Result<()> {
    let (_env, repo) = repo("crud").await?;

    let created = repo.insert(data("a@a.com")).await?;
    assert_eq!(created.id.len(), 24);
    assert_eq!(repo.find_by_id(&created.id).await?, Some(created.clone()));

    let listed = repo.list().await?;
    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(repo.find_by_email("a@a.com").await?.len(), 1);
    assert!(repo.find_by_email("none@x.com").await?.is_empty());

    let mut changed = data("a@a.com");
    changed.nombre = "Juan Pablo".into();
    changed.username = None;
    let updated = repo.replace(&created.id, changed).await?.expect("updated");
    assert_eq!(updated.nombre, "Juan Pablo");
    assert_eq!(updated.username, None);

    let removed = repo.delete(&created.id).await?.expect("removed");
    assert_eq!(removed.id, created.id);
    assert_eq!(repo.find_by_id(&created.id).await?, None);
    assert_eq!(repo.delete(&created.id).await?, None);
    Ok(())
}

#[tokio::test]
async fn mongo_unique_email_index_rejects_duplicates() -> Result<()> {
    let (_env, repo) = repo("dup").await?;

    repo.insert(data("a@a.com")).await?;
    let other = repo.insert(data("b@b.com")).await?;

    assert_eq!(
        repo.insert(data("a@a.com")).await,
        Err(RepoError::DuplicateEmail("a@a.com".into()))
    );
    assert_eq!(
        repo.replace(&other.id, data("a@a.com")).await,
        Err(RepoError::DuplicateEmail("a@a.com".into()))
    );
    // Creating the index twice is a no-op
    repo.ensure_indexes().await?;
    Ok(())
}

#[tokio::test]
async fn mongo_malformed_ids_never_hit_the_server() -> Result<()> {
    let (_env, repo) = repo("ids").await?;

    assert_eq!(
        repo.find_by_id("nope").await,
        Err(RepoError::InvalidId("nope".into()))
    );
    assert!(matches!(
        repo.replace("nope", data("a@a.com")).await,
        Err(RepoError::InvalidId(_))
    ));
    Ok(())
}

#[tokio::test]
async fn store_handle_reports_connectivity() -> Result<()> {
    let env = common::bring_up_mongo().await?;
    assert!(env.store.is_connected().await);
    assert!(env.store.was_connected());
    assert!(!env.store.dsn().is_empty());
    env.store.clone().close().await;
    Ok(())
}
