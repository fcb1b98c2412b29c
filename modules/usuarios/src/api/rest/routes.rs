use axum::{routing::get, Extension, Router};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the `/usuarios` endpoints on `router`.
///
/// Update and delete take the id from the JSON body, so the collection path
/// carries four methods and the item path only serves reads.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let collection = get(handlers::list_users)
        .post(handlers::create_user)
        .put(handlers::update_user)
        .delete(handlers::delete_user);

    router
        .route("/usuarios", collection.clone())
        // Clients also call the collection with a trailing slash
        .route("/usuarios/", collection)
        .route("/usuarios/{id}", get(handlers::get_user))
        .layer(Extension(service))
}
