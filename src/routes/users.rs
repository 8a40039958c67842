use super::with_store;
use crate::db::SharedStore;
use crate::errors::ApiError;
use crate::models::User;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserResponse {
    pub user: User,
}

pub async fn list_users(store: web::Data<SharedStore>) -> Result<HttpResponse, ApiError> {
    let users = with_store(&store, |store| store.fetch_users()).await?;
    Ok(HttpResponse::Ok().json(UserListResponse { users }))
}

pub async fn get_user(
    store: web::Data<SharedStore>,
    path: web::Path<(String,)>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner().0;
    let lookup = username.clone();
    match with_store(&store, move |store| store.fetch_user(&lookup)).await? {
        Some(user) => Ok(HttpResponse::Ok().json(UserResponse { user })),
        None => Err(ApiError::UserNotFound(username)),
    }
}
