//! Cursored collections and page iteration.
//!
//! # Design
//! Twitter pages collections with opaque 64-bit cursors. `-1` asks for the
//! first page and `0` in `next_cursor`/`previous_cursor` means there is no
//! page in that direction. Each cursor is also returned as a string; both
//! forms are kept untouched.
//!
//! `Pages` walks a collection forward by calling a fetch closure once per
//! page, so it works with any service call that takes a cursor.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::User;

/// Cursor that requests the first page.
pub const FIRST_PAGE: i64 = -1;

/// Cursor value meaning "no further page".
pub const NO_MORE_PAGES: i64 = 0;

/// A cursored collection of user ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursoredIds {
    pub ids: Vec<u64>,
    pub next_cursor: i64,
    pub next_cursor_str: String,
    pub previous_cursor: i64,
    pub previous_cursor_str: String,
}

/// A cursored collection of users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursoredUsers {
    pub users: Vec<User>,
    pub next_cursor: i64,
    pub next_cursor_str: String,
    pub previous_cursor: i64,
    pub previous_cursor_str: String,
}

/// A page of a cursored collection.
pub trait Cursored {
    type Item;

    fn next_cursor(&self) -> i64;
    fn previous_cursor(&self) -> i64;
    fn items(&self) -> &[Self::Item];
    fn into_items(self) -> Vec<Self::Item>;

    fn has_next(&self) -> bool {
        self.next_cursor() != NO_MORE_PAGES
    }

    fn has_previous(&self) -> bool {
        self.previous_cursor() != NO_MORE_PAGES
    }
}

impl Cursored for CursoredIds {
    type Item = u64;

    fn next_cursor(&self) -> i64 {
        self.next_cursor
    }

    fn previous_cursor(&self) -> i64 {
        self.previous_cursor
    }

    fn items(&self) -> &[u64] {
        &self.ids
    }

    fn into_items(self) -> Vec<u64> {
        self.ids
    }
}

impl Cursored for CursoredUsers {
    type Item = User;

    fn next_cursor(&self) -> i64 {
        self.next_cursor
    }

    fn previous_cursor(&self) -> i64 {
        self.previous_cursor
    }

    fn items(&self) -> &[User] {
        &self.users
    }

    fn into_items(self) -> Vec<User> {
        self.users
    }
}

/// Forward iterator over the pages of a cursored collection.
///
/// Yields one `Result` per fetched page. Iteration ends after the page whose
/// `next_cursor` is `0`, or right after the first error.
pub struct Pages<P, F> {
    fetch: F,
    cursor: Option<i64>,
    _page: std::marker::PhantomData<fn() -> P>,
}

impl<P, F> Pages<P, F>
where
    P: Cursored,
    F: FnMut(i64) -> Result<P, Error>,
{
    /// Start at `cursor`, or at the first page when `None` or `0`.
    pub fn new(cursor: Option<i64>, fetch: F) -> Self {
        let cursor = match cursor {
            None | Some(NO_MORE_PAGES) => FIRST_PAGE,
            Some(cursor) => cursor,
        };
        Self {
            fetch,
            cursor: Some(cursor),
            _page: std::marker::PhantomData,
        }
    }

    /// Drain every remaining page into one list of items.
    pub fn collect_items(self) -> Result<Vec<P::Item>, Error> {
        let mut items = Vec::new();
        for page in self {
            items.extend(page?.into_items());
        }
        Ok(items)
    }
}

impl<P, F> Iterator for Pages<P, F>
where
    P: Cursored,
    F: FnMut(i64) -> Result<P, Error>,
{
    type Item = Result<P, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.take()?;
        match (self.fetch)(cursor) {
            Ok(page) => {
                // A server echoing the cursor back would repeat this page forever.
                if page.has_next() && page.next_cursor() != cursor {
                    self.cursor = Some(page.next_cursor());
                }
                Some(Ok(page))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

impl<P, F> std::iter::FusedIterator for Pages<P, F>
where
    P: Cursored,
    F: FnMut(i64) -> Result<P, Error>,
{
}
