use serde_json::{Map, Value};

/// Ordered logical field name -> new value. Iteration follows insertion order.
pub type UpdateRequest = Map<String, Value>;

/// Ordered filter key -> filter value.
pub type FilterRequest = Map<String, Value>;

/// Logical field names that are stored under a different column name.
/// Fields without an entry are stored under their own name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnAliasMap {
    aliases: &'static [(&'static str, &'static str)],
}

impl ColumnAliasMap {
    pub const EMPTY: ColumnAliasMap = ColumnAliasMap { aliases: &[] };

    pub const fn new(aliases: &'static [(&'static str, &'static str)]) -> Self {
        Self { aliases }
    }

    /// Storage column for `field`. An entry is used whenever present, even an empty one.
    pub fn column_for<'a>(&self, field: &'a str) -> &'a str {
        match self.aliases.iter().find(|(logical, _)| *logical == field) {
            Some(&(_, column)) => column,
            None => field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// `"col" ILIKE $i`, value wrapped in `%...%`
    ILike,
    /// `"col" >= $i`
    Gte,
    /// `"col" <= $i`
    Lte,
    /// `"col" > 0` when the filter value is truthy; binds nothing
    Positive,
}

impl FilterOp {
    pub fn consumes_param(&self) -> bool {
        !matches!(self, FilterOp::Positive)
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::ILike => "ILIKE",
            FilterOp::Gte => ">=",
            FilterOp::Lte => "<=",
            FilterOp::Positive => ">",
        }
    }
}

/// One recognized filter key of an entity.
#[derive(Debug, Clone, Copy)]
pub struct FilterRule {
    pub key: &'static str,
    pub column: &'static str,
    pub op: FilterOp,
}

impl FilterRule {
    pub const fn new(key: &'static str, column: &'static str, op: FilterOp) -> Self {
        Self { key, column, op }
    }
}

/// Fixed per-entity table of recognized filter keys.
#[derive(Debug, Clone, Copy)]
pub struct FilterKeySpec {
    rules: &'static [FilterRule],
}

impl FilterKeySpec {
    pub const fn new(rules: &'static [FilterRule]) -> Self {
        Self { rules }
    }

    pub fn rule(&self, key: &str) -> Option<&FilterRule> {
        self.rules.iter().find(|r| r.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.key)
    }
}

/// Clause text plus the values bound to its placeholders, `$i` -> `params[i - 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledClause {
    pub sql: String,
    pub params: Vec<Value>,
}

impl CompiledClause {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Placeholder index a caller should use for the next value it appends.
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }

    /// `WHERE <sql>`, or nothing at all for an empty clause.
    pub fn where_sql(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.sql)
        }
    }
}

/// Collects bound values and hands out their placeholders in order.
#[derive(Debug, Default)]
pub(crate) struct ParamList {
    values: Vec<Value>,
}

impl ParamList {
    pub(crate) fn param(&mut self, value: Value) -> String {
        self.values.push(value);
        format!("${}", self.values.len())
    }

    pub(crate) fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Quote SQL identifier to prevent injection
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
