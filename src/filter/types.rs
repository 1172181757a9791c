use std::fmt;

use super::error::FilterError;

/// Comparison operators understood by the backend filter language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// `=` exact match
    Eq,
    /// `~` substring match
    Contains,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Contains => "~",
        }
    }
}

/// Dotted field path such as `title` or `type.resource_type`.
///
/// Every segment must start with a letter or underscore and contain only
/// alphanumerics and underscores, so a path can never carry operators or
/// quotes into the rendered expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, FilterError> {
        if path.is_empty() {
            return Err(FilterError::InvalidField("Field name cannot be empty".to_string()));
        }
        for segment in path.split('.') {
            let mut chars = segment.chars();
            let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
            if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(FilterError::InvalidField(format!("Invalid field name format: {}", path)));
            }
        }
        Ok(Self(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single-quoted string literal. Holds the raw value; escaping happens on render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal(String);

impl Literal {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Quotes become `\'`. The filter language has no other escape, so a
    /// trailing backslash would swallow the closing quote and is dropped.
    pub fn escaped(&self) -> String {
        self.0.trim_end_matches('\\').replace('\'', "\\'")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.escaped())
    }
}

/// Boolean filter expression tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpr {
    Compare {
        field: FieldPath,
        op: FilterOp,
        value: Literal,
    },
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
}

impl FilterExpr {
    pub fn compare(field: &str, op: FilterOp, value: impl Into<String>) -> Result<Self, FilterError> {
        Ok(FilterExpr::Compare {
            field: FieldPath::parse(field)?,
            op,
            value: Literal::new(value),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn prefix(&self) -> &'static str {
        match self {
            SortDirection::Asc => "",
            SortDirection::Desc => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub column: FieldPath,
    pub sort: SortDirection,
}
