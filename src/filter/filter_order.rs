use super::error::FilterError;
use super::types::{FieldPath, FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Parse a sort string such as `-created,title` or `+title`.
    ///
    /// Empty segments are skipped. A segment that is not an optionally
    /// signed field path is rejected.
    pub fn validate_and_parse(sort: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let mut out = Vec::new();
        for part in sort.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let (sort, column) = match trimmed.strip_prefix('-') {
                Some(rest) => (SortDirection::Desc, rest),
                None => (SortDirection::Asc, trimmed.strip_prefix('+').unwrap_or(trimmed)),
            };
            let column = FieldPath::parse(column)
                .map_err(|_| FilterError::InvalidSort(format!("Invalid sort field: {}", trimmed)))?;
            out.push(FilterOrderInfo { column, sort });
        }
        Ok(out)
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        infos
            .iter()
            .map(|i| format!("{}{}", i.sort.prefix(), i.column))
            .collect::<Vec<_>>()
            .join(",")
    }
}
