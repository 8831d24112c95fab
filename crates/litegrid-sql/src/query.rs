use super::{literal, Comma, Formatter, Ident, Period, ToSql};

/// Relation operator of a filter term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Substring match (`LIKE`)
    Contains,
    /// Negated substring match (`NOT LIKE`)
    NotContains,
    Eq,
    Ne,
    Gt,
    Lt,
    IsNull,
    NotNull,
}

impl FilterOp {
    /// The null-check relations take no operand.
    pub fn needs_operand(self) -> bool {
        !matches!(self, FilterOp::IsNull | FilterOp::NotNull)
    }
}

/// Combinator applied between all filter terms of a specification. Chosen
/// once for the whole term set, never per term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicOp {
    #[default]
    And,
    Or,
}

impl LogicOp {
    fn sql_word(self) -> &'static str {
        match self {
            LogicOp::And => " AND ",
            LogicOp::Or => " OR ",
        }
    }
}

/// Collation mode of an order term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Collation {
    #[default]
    Binary,
    /// Case-insensitive
    NoCase,
    /// Trailing whitespace trimmed
    Rtrim,
}

impl Collation {
    pub fn sql_name(self) -> &'static str {
        match self {
            Collation::Binary => "BINARY",
            Collation::NoCase => "NOCASE",
            Collation::Rtrim => "RTRIM",
        }
    }
}

/// Sort direction of an order term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn sql_name(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One filter term: column, relation, operand text. The operand is unused
/// for the null-check relations.
#[derive(Debug, Clone)]
pub struct FilterTerm {
    pub column: String,
    pub op: FilterOp,
    pub operand: String,
}

/// One order term. Terms compose left to right; the first term is the
/// primary sort key.
#[derive(Debug, Clone)]
pub struct OrderTerm {
    pub column: String,
    pub collation: Collation,
    pub direction: Direction,
}

/// A structured description of a SELECT statement: target table, selected
/// columns, filter terms and ordering.
///
/// Column names in `columns`, `filters` and `orders` must be drawn from the
/// target table's column set; when the target table changes, all three must
/// be invalidated and rebuilt by the caller.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub schema: String,
    pub table: String,

    /// Selected column names; empty selects all columns.
    pub columns: Vec<String>,

    pub filters: Vec<FilterTerm>,

    /// Single combinator applied between all filter terms.
    pub logic: LogicOp,

    pub orders: Vec<OrderTerm>,
}

impl QuerySpec {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            columns: Vec::new(),
            filters: Vec::new(),
            logic: LogicOp::default(),
            orders: Vec::new(),
        }
    }

    /// Render the specification as a complete SELECT statement.
    ///
    /// Deterministic, no execution side effect. All identifiers and literals
    /// are quoted/escaped on the way in.
    pub fn to_sql(&self) -> String {
        let mut ret = String::new();
        let f = &mut Formatter { dst: &mut ret };

        fmt!(f, "SELECT\n");

        if self.columns.is_empty() {
            fmt!(f, "* ");
        } else {
            Comma(self.columns.iter().map(Ident)).to_sql(f);
        }

        fmt!(f, "\nFROM ");
        Period([&self.schema, &self.table].map(Ident)).to_sql(f);

        if !self.filters.is_empty() {
            fmt!(f, "\nWHERE ");
            let mut s = "";
            for term in &self.filters {
                fmt!(f, s);
                term.to_sql(f);
                s = self.logic.sql_word();
            }
        }

        if !self.orders.is_empty() {
            fmt!(f, "\nORDER BY ");
            Comma(self.orders.iter()).to_sql(f);
        }

        ret.push(';');
        ret
    }
}

impl ToSql for &FilterTerm {
    fn to_sql(self, f: &mut Formatter<'_>) {
        Ident(&self.column).to_sql(f);
        match self.op {
            FilterOp::Contains | FilterOp::NotContains => {
                let test = match self.op {
                    FilterOp::Contains => " LIKE ",
                    _ => " NOT LIKE ",
                };
                f.dst.push_str(test);
                f.dst.push_str(&literal::like_pattern(&self.operand));
                f.dst.push_str(" ESCAPE '\\'");
            }
            FilterOp::Eq | FilterOp::Ne | FilterOp::Gt | FilterOp::Lt => {
                let relation = match self.op {
                    FilterOp::Eq => " = ",
                    FilterOp::Ne => " <> ",
                    FilterOp::Gt => " > ",
                    _ => " < ",
                };
                f.dst.push_str(relation);
                f.dst.push_str(&literal::quote(&self.operand));
            }
            FilterOp::IsNull => f.dst.push_str(" ISNULL"),
            FilterOp::NotNull => f.dst.push_str(" NOTNULL"),
        }
    }
}

impl ToSql for &OrderTerm {
    fn to_sql(self, f: &mut Formatter<'_>) {
        Ident(&self.column).to_sql(f);
        f.dst.push_str(" COLLATE ");
        f.dst.push_str(self.collation.sql_name());
        f.dst.push(' ');
        f.dst.push_str(self.direction.sql_name());
    }
}
