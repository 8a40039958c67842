//! Query extractor

use crate::errors::ApiError;
use actix_web::{dev, Error, FromRequest, HttpRequest};
use futures::future::{err, ok, Ready};
use serde::de;
use std::ops;

/// Query extractor backed by `serde_qs`. A query string that does not decode
/// into `T` is rejected with [`ApiError::InvalidQuery`].
pub struct Query<T>(pub T);

impl<T> Query<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> ops::Deref for Query<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> FromRequest for Query<T>
where
    T: de::DeserializeOwned,
{
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;
    type Config = ();

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        match serde_qs::from_str::<T>(req.query_string()) {
            Ok(val) => ok(Query(val)),
            Err(e) => err(ApiError::InvalidQuery(e.to_string()).into()),
        }
    }
}
