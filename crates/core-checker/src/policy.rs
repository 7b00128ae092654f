use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::unwrap_used)]
static ORDER_BY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)order\s+by").unwrap());

/// How result rows are compared, derived from the reference query text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonPolicy {
    pub order_sensitive: bool,
}

impl ComparisonPolicy {
    #[must_use]
    pub const fn ordered() -> Self {
        Self {
            order_sensitive: true,
        }
    }

    #[must_use]
    pub const fn unordered() -> Self {
        Self {
            order_sensitive: false,
        }
    }

    /// Row order matters only when the reference query sorts explicitly.
    #[must_use]
    pub fn from_reference_query(query: &str) -> Self {
        Self {
            order_sensitive: ORDER_BY.is_match(query),
        }
    }
}
