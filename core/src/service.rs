//! Block and mute operations.
//!
//! # Design
//! Both resource groups expose the same four operations and differ only in
//! the URL prefix, so one `RelationshipService` serves both. Each operation
//! comes in three forms:
//! - `build_*` produces the `HttpRequest` without I/O,
//! - `parse_*` decodes an `HttpResponse` without I/O,
//! - the plain method (`create`, `ids`, ...) runs both around exactly one
//!   `Transport::execute` call.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::client::Shared;
use crate::cursor::{CursoredIds, CursoredUsers, Pages};
use crate::error::{relevant_error, ApiError, Error};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::params::{CreateParams, CursorParams, DestroyParams, IdsParams, ListParams, QueryParams};
use crate::types::User;

pub const BLOCKS_PREFIX: &str = "blocks/";
pub const MUTES_PREFIX: &str = "mutes/users/";

/// A decoded result together with the response it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    pub data: T,
    pub response: HttpResponse,
}

impl<T> Reply<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Operations under one URL prefix (`blocks/` or `mutes/users/`).
#[derive(Clone)]
pub struct RelationshipService {
    shared: Arc<Shared>,
    prefix: &'static str,
}

impl RelationshipService {
    pub(crate) fn new(shared: Arc<Shared>, prefix: &'static str) -> Self {
        Self { shared, prefix }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn build_create(&self, params: &CreateParams) -> Result<HttpRequest, Error> {
        self.build(HttpMethod::Post, "create.json", params)
    }

    pub fn build_destroy(&self, params: &DestroyParams) -> Result<HttpRequest, Error> {
        self.build(HttpMethod::Post, "destroy.json", params)
    }

    pub fn build_ids(&self, params: &IdsParams) -> Result<HttpRequest, Error> {
        self.build(HttpMethod::Get, "ids.json", params)
    }

    pub fn build_list(&self, params: &ListParams) -> Result<HttpRequest, Error> {
        self.build(HttpMethod::Get, "list.json", params)
    }

    /// Decode a create/destroy response.
    pub fn parse_user(&self, response: &HttpResponse) -> Result<User, Error> {
        parse(response)
    }

    pub fn parse_ids(&self, response: &HttpResponse) -> Result<CursoredIds, Error> {
        parse(response)
    }

    pub fn parse_users(&self, response: &HttpResponse) -> Result<CursoredUsers, Error> {
        parse(response)
    }

    /// Block or mute a user; returns the affected user.
    pub fn create(&self, params: &CreateParams) -> Result<Reply<User>, Error> {
        self.call(self.build_create(params)?)
    }

    /// Undo a block or mute; returns the affected user.
    pub fn destroy(&self, params: &DestroyParams) -> Result<Reply<User>, Error> {
        self.call(self.build_destroy(params)?)
    }

    /// One page of blocked or muted user ids.
    pub fn ids(&self, params: &IdsParams) -> Result<Reply<CursoredIds>, Error> {
        self.call(self.build_ids(params)?)
    }

    /// One page of blocked or muted users.
    pub fn list(&self, params: &ListParams) -> Result<Reply<CursoredUsers>, Error> {
        self.call(self.build_list(params)?)
    }

    /// Every page of `ids`, starting at `params.cursor` (first page if unset).
    pub fn ids_pages(
        &self,
        params: &IdsParams,
    ) -> Pages<CursoredIds, impl FnMut(i64) -> Result<CursoredIds, Error> + '_> {
        let params = params.clone();
        Pages::new(params.cursor(), move |cursor| {
            self.ids(&params.with_cursor(cursor)).map(Reply::into_data)
        })
    }

    /// Every page of `list`, starting at `params.cursor` (first page if unset).
    pub fn list_pages(
        &self,
        params: &ListParams,
    ) -> Pages<CursoredUsers, impl FnMut(i64) -> Result<CursoredUsers, Error> + '_> {
        let params = params.clone();
        Pages::new(params.cursor(), move |cursor| {
            self.list(&params.with_cursor(cursor)).map(Reply::into_data)
        })
    }

    fn build(&self, method: HttpMethod, endpoint: &str, params: &impl QueryParams) -> Result<HttpRequest, Error> {
        let config = &self.shared.config;
        let mut url = config.base_url().join(self.prefix)?.join(endpoint)?;
        let pairs = params.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(HttpRequest {
            method,
            url: String::from(url),
            headers: config.default_headers(),
            body: None,
        })
    }

    fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<Reply<T>, Error> {
        log::debug!("{} {}", request.method, request.url);
        let response = self.shared.transport.execute(&request)?;
        log::debug!("{} {} -> {}", request.method, request.path(), response.status);

        match parse(&response) {
            Ok(data) => Ok(Reply { data, response }),
            Err(err) => {
                if let Error::Api(api) = &err {
                    log::warn!("{} {} failed: {api}", request.method, request.path());
                }
                Err(err)
            }
        }
    }
}

/// Decode `response` into `T`, or into the most relevant error.
///
/// A non-2xx status is the generic error; a structured error body found in
/// it replaces that error.
pub fn parse<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, Error> {
    let (status_error, api_error) = if response.is_success() {
        (None, ApiError::default())
    } else {
        let status_error = Error::Http {
            status: response.status,
            body: response.body.clone(),
        };
        (Some(status_error), ApiError::from_body(&response.body))
    };
    if let Some(err) = relevant_error(status_error, api_error) {
        return Err(err);
    }
    serde_json::from_str(&response.body).map_err(|e| Error::Deserialization(e.to_string()))
}
