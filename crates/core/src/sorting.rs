//! Sort allow-lists for list endpoints.
//!
//! Each sortable entity has an enum whose variants map to a fixed column
//! name. Only those column names, plus `ASC` / `DESC`, are ever interpolated
//! into SQL. Unknown `sort_by` / `sort_order` tokens resolve to the entity's
//! default instead of failing the request.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SortOrder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive parse of `asc` / `desc`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// SQL keyword.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// SortField
// ---------------------------------------------------------------------------

/// An allow-listed sort key for one table.
pub trait SortField: Copy + Sized + 'static {
    /// Field used when `sort_by` is absent or not allow-listed.
    const DEFAULT: Self;
    /// Direction used when `sort_order` is absent or invalid.
    const DEFAULT_ORDER: SortOrder;
    /// Primary key column, appended to every ORDER BY as a tiebreaker.
    const PRIMARY_KEY: &'static str;

    /// Map a request token to a variant. `None` if not allow-listed.
    fn parse(raw: &str) -> Option<Self>;

    /// The fixed column name this variant sorts by.
    fn column(self) -> &'static str;
}

/// A resolved sort: allow-listed field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F: SortField> {
    pub field: F,
    pub order: SortOrder,
}

impl<F: SortField> Default for Sort<F> {
    fn default() -> Self {
        Self {
            field: F::DEFAULT,
            order: F::DEFAULT_ORDER,
        }
    }
}

impl<F: SortField> Sort<F> {
    /// Resolve raw request tokens, ignoring anything not allow-listed.
    pub fn resolve(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        let field = sort_by.and_then(F::parse).unwrap_or(F::DEFAULT);
        let order = sort_order
            .and_then(SortOrder::parse)
            .unwrap_or(F::DEFAULT_ORDER);
        Self { field, order }
    }

    /// Render `ORDER BY <column> <dir>, <pk> <dir>`.
    pub fn order_by_clause(&self) -> String {
        let dir = self.order.as_sql();
        let column = self.field.column();
        if column == F::PRIMARY_KEY {
            format!("ORDER BY {column} {dir}")
        } else {
            format!("ORDER BY {column} {dir}, {} {dir}", F::PRIMARY_KEY)
        }
    }
}

// ---------------------------------------------------------------------------
// Per-entity allow-lists
// ---------------------------------------------------------------------------

/// Sortable columns of `events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSortField {
    Name,
    EventDate,
    CategoryId,
}

impl SortField for EventSortField {
    const DEFAULT: Self = Self::EventDate;
    const DEFAULT_ORDER: SortOrder = SortOrder::Asc;
    const PRIMARY_KEY: &'static str = "event_id";

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "name" => Some(Self::Name),
            "event_date" => Some(Self::EventDate),
            "category_id" => Some(Self::CategoryId),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::EventDate => "event_date",
            Self::CategoryId => "category_id",
        }
    }
}

/// Sortable columns of `event_categories`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySortField {
    Name,
    CategoryId,
}

impl SortField for CategorySortField {
    const DEFAULT: Self = Self::Name;
    const DEFAULT_ORDER: SortOrder = SortOrder::Asc;
    const PRIMARY_KEY: &'static str = "category_id";

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "name" => Some(Self::Name),
            "category_id" => Some(Self::CategoryId),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CategoryId => "category_id",
        }
    }
}

/// Sortable columns of `reviews`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSortField {
    CreatedAt,
    Rating,
    EventId,
    UserId,
}

impl SortField for ReviewSortField {
    const DEFAULT: Self = Self::CreatedAt;
    const DEFAULT_ORDER: SortOrder = SortOrder::Desc;
    const PRIMARY_KEY: &'static str = "review_id";

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "created_at" => Some(Self::CreatedAt),
            "rating" => Some(Self::Rating),
            "event_id" => Some(Self::EventId),
            "user_id" => Some(Self::UserId),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Rating => "rating",
            Self::EventId => "event_id",
            Self::UserId => "user_id",
        }
    }
}

/// Sortable columns of `users` (admin table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortField {
    Username,
    CreatedAt,
}

impl SortField for UserSortField {
    const DEFAULT: Self = Self::CreatedAt;
    const DEFAULT_ORDER: SortOrder = SortOrder::Desc;
    const PRIMARY_KEY: &'static str = "user_id";

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "username" => Some(Self::Username),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::CreatedAt => "created_at",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
