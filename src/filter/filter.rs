use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FieldPath, FilterExpr, FilterOp, FilterOrderInfo};

/// Page size used for resource listings
pub const DEFAULT_PER_PAGE: u32 = 30;
/// Newest first
pub const DEFAULT_SORT: &str = "-created";
/// Type filter sentinel meaning "every type"
pub const ALL_TYPES: &str = "all";

const SEARCH_FIELDS: [&str; 3] = ["title", "description", "tags"];
const TYPE_LABEL_FIELD: &str = "type.resource_type";
const TYPE_RELATION: &str = "type";

/// List query for a backend collection: paging, sort, relation expansion
/// and an optional filter expression.
#[derive(Debug, Clone)]
pub struct Filter {
    page: u32,
    per_page: u32,
    order: Vec<FilterOrderInfo>,
    expand: Vec<FieldPath>,
    clauses: Vec<FilterExpr>,
}

impl Filter {
    pub fn new(page: u32) -> Result<Self, FilterError> {
        if page == 0 {
            return Err(FilterError::InvalidPage("Page numbers start at 1".to_string()));
        }
        Ok(Self {
            page,
            per_page: DEFAULT_PER_PAGE,
            order: vec![],
            expand: vec![],
            clauses: vec![],
        })
    }

    /// Listing query for the resources collection.
    ///
    /// A blank `sort` falls back to [`DEFAULT_SORT`]; a blank `type_filter`
    /// or [`ALL_TYPES`] adds no type clause.
    pub fn resources(page: u32, search: &str, type_filter: &str, sort: &str) -> Result<Self, FilterError> {
        let mut filter = Self::new(page)?;
        filter.sort(sort)?.expand(TYPE_RELATION)?.search(search)?.type_label(type_filter)?;
        Ok(filter)
    }

    pub fn sort(&mut self, sort: &str) -> Result<&mut Self, FilterError> {
        let mut order = FilterOrder::validate_and_parse(sort)?;
        if order.is_empty() {
            order = FilterOrder::validate_and_parse(DEFAULT_SORT)?;
        }
        self.order = order;
        Ok(self)
    }

    pub fn expand(&mut self, relation: &str) -> Result<&mut Self, FilterError> {
        self.expand.push(FieldPath::parse(relation)?);
        Ok(self)
    }

    /// Substring match of `term` against title, description and tags
    pub fn search(&mut self, term: &str) -> Result<&mut Self, FilterError> {
        if term.is_empty() {
            return Ok(self);
        }
        let any = SEARCH_FIELDS
            .iter()
            .map(|field| FilterExpr::compare(field, FilterOp::Contains, term))
            .collect::<Result<Vec<_>, _>>()?;
        self.clauses.push(FilterExpr::Or(any));
        Ok(self)
    }

    /// Exact match on the expanded type label
    pub fn type_label(&mut self, label: &str) -> Result<&mut Self, FilterError> {
        if label.is_empty() || label == ALL_TYPES {
            return Ok(self);
        }
        self.clauses.push(FilterExpr::compare(TYPE_LABEL_FIELD, FilterOp::Eq, label)?);
        Ok(self)
    }

    pub fn to_filter_expression(&self) -> Option<String> {
        match self.clauses.len() {
            0 => None,
            1 => Some(FilterWhere::generate(&self.clauses[0])),
            _ => Some(FilterWhere::generate(&FilterExpr::And(self.clauses.clone()))),
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", &self.page.to_string());
        query.append_pair("perPage", &self.per_page.to_string());
        if !self.order.is_empty() {
            query.append_pair("sort", &FilterOrder::generate(&self.order));
        }
        if !self.expand.is_empty() {
            let expand = self.expand.iter().map(FieldPath::as_str).collect::<Vec<_>>().join(",");
            query.append_pair("expand", &expand);
        }
        if let Some(filter) = self.to_filter_expression() {
            query.append_pair("filter", &filter);
        }
        query.finish()
    }
}
