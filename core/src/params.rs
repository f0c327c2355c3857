//! Request parameters.
//!
//! Every field is optional; `None` lets the server apply its default. Zero
//! values (empty screen name, id 0, cursor 0, count 0) are treated like
//! `None` and never reach the query string.

/// Parameters that turn into URL query pairs.
pub trait QueryParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Target of a create or destroy call.
///
/// `screen_name` and `user_id` identify the same account in two ways; the
/// server expects one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetParams {
    pub screen_name: Option<String>,
    pub user_id: Option<u64>,
    /// Whether the returned user's status includes entities.
    pub include_entities: Option<bool>,
    pub skip_status: Option<bool>,
}

pub type CreateParams = TargetParams;
pub type DestroyParams = TargetParams;

impl TargetParams {
    pub fn screen_name(screen_name: impl Into<String>) -> Self {
        Self {
            screen_name: Some(screen_name.into()),
            ..Default::default()
        }
    }

    pub fn user_id(user_id: u64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }
}

impl QueryParams for TargetParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_str(&mut pairs, "screen_name", self.screen_name.as_deref());
        push_nonzero(&mut pairs, "user_id", self.user_id.map(i128::from));
        push_bool(&mut pairs, "include_entities", self.include_entities);
        push_bool(&mut pairs, "skip_status", self.skip_status);
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdsParams {
    pub cursor: Option<i64>,
    pub count: Option<u32>,
}

impl QueryParams for IdsParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_nonzero(&mut pairs, "cursor", self.cursor.map(i128::from));
        push_nonzero(&mut pairs, "count", self.count.map(i128::from));
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub cursor: Option<i64>,
    pub count: Option<u32>,
    pub skip_status: Option<bool>,
    pub include_user_entities: Option<bool>,
}

impl QueryParams for ListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_nonzero(&mut pairs, "cursor", self.cursor.map(i128::from));
        push_nonzero(&mut pairs, "count", self.count.map(i128::from));
        push_bool(&mut pairs, "skip_status", self.skip_status);
        push_bool(&mut pairs, "include_user_entities", self.include_user_entities);
        pairs
    }
}

/// Params whose page position can be moved, for `Pages`.
pub trait CursorParams: Clone {
    fn cursor(&self) -> Option<i64>;
    fn with_cursor(&self, cursor: i64) -> Self;
}

impl CursorParams for IdsParams {
    fn cursor(&self) -> Option<i64> {
        self.cursor
    }

    fn with_cursor(&self, cursor: i64) -> Self {
        Self {
            cursor: Some(cursor),
            ..self.clone()
        }
    }
}

impl CursorParams for ListParams {
    fn cursor(&self) -> Option<i64> {
        self.cursor
    }

    fn with_cursor(&self, cursor: i64) -> Self {
        Self {
            cursor: Some(cursor),
            ..self.clone()
        }
    }
}

fn push_str(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_string()));
    }
}

fn push_nonzero(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<i128>) {
    if let Some(value) = value.filter(|v| *v != 0) {
        pairs.push((key, value.to_string()));
    }
}

fn push_bool(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<bool>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}
