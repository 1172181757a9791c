use super::types::FilterExpr;

pub struct FilterWhere;

impl FilterWhere {
    /// Render an expression in the backend filter syntax.
    ///
    /// `Or` groups are always parenthesized. `And` joins its children with
    /// `&&` and is parenthesized only when nested inside another group.
    pub fn generate(expr: &FilterExpr) -> String {
        Self::render(expr, false)
    }

    fn render(expr: &FilterExpr, nested: bool) -> String {
        match expr {
            FilterExpr::Compare { field, op, value } => format!("{}{}{}", field, op.as_str(), value),
            FilterExpr::Or(parts) => {
                let inner: Vec<String> = parts.iter().map(|p| Self::render(p, true)).collect();
                format!("({})", inner.join(" || "))
            }
            FilterExpr::And(parts) => {
                let joined = parts.iter().map(|p| Self::render(p, true)).collect::<Vec<_>>().join(" && ");
                if nested && parts.len() > 1 {
                    format!("({})", joined)
                } else {
                    joined
                }
            }
        }
    }
}
