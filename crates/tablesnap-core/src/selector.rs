use crate::record::Value;

/// Which rows of an entity type an operation reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selector {
    /// Every row.
    #[default]
    All,
    /// Rows with exactly these identifiers, in this order.
    ById(Vec<i64>),
    /// Rows matching the given query options.
    ByFilter(FindOptions),
}

impl Selector {
    /// `All` when `limit` is `None`, otherwise a filter capped at `limit` rows.
    pub fn limited(limit: Option<u64>) -> Self {
        match limit {
            Some(n) => Selector::ByFilter(FindOptions::new().limit(n)),
            None => Selector::All,
        }
    }
}

impl From<Vec<i64>> for Selector {
    fn from(ids: Vec<i64>) -> Self {
        Selector::ById(ids)
    }
}

impl From<FindOptions> for Selector {
    fn from(options: FindOptions) -> Self {
        Selector::ByFilter(options)
    }
}

/// Equality filter on a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub order: Order,
}

/// Query options handed to the data-access layer as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub conditions: Vec<Condition>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.order_by = Some(OrderBy {
            column: column.into(),
            order,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}
