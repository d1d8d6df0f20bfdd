//! Pagination parameters for CRM list endpoints.
//!
//! Query values are parsed leniently: anything unparseable falls back to the
//! default instead of rejecting the request.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Default starting offset.
pub const DEFAULT_OFFSET: u32 = 0;

/// Default number of records per page when not specified in the request.
pub const DEFAULT_MAX_SIZE: u32 = 20;

/// Maximum page size the CRM accepts.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Default sort column.
pub const DEFAULT_ORDER_BY: &str = "createdAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Anything other than `asc`/`desc` (case-insensitive) is `desc`
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    pub offset: u32,
    pub max_size: u32,
    pub order_by: String,
    pub order: SortOrder,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            max_size: DEFAULT_MAX_SIZE,
            order_by: DEFAULT_ORDER_BY.to_string(),
            order: SortOrder::Desc,
        }
    }
}

impl PaginationQuery {
    /// Parse from raw query-string parameters (`offset`, `maxSize`, `orderBy`, `order`)
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let offset = params
            .get("offset")
            .and_then(|v| parse_integer(v))
            .filter(|v| *v >= 0)
            .map(|v| v.min(u32::MAX as i64) as u32)
            .unwrap_or(defaults.offset);

        let max_size = params
            .get("maxSize")
            .and_then(|v| parse_integer(v))
            .filter(|v| *v > 0)
            .map(|v| v.min(MAX_PAGE_SIZE as i64) as u32)
            .unwrap_or(defaults.max_size);

        let order_by = params
            .get("orderBy")
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or(defaults.order_by);

        let order = params
            .get("order")
            .map(|v| SortOrder::parse_lenient(v))
            .unwrap_or(defaults.order);

        Self { offset, max_size, order_by, order }
    }

    /// Query pairs in the CRM's wire naming
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("offset", self.offset.to_string()),
            ("maxSize", self.max_size.to_string()),
            ("orderBy", self.order_by.clone()),
            ("order", self.order.as_str().to_string()),
        ]
    }
}

/// Leading-integer parse: `"12abc"` is 12, `"abc"` is None.
fn parse_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let n: i64 = digits[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}
