// src/api/query.rs
// JSON:API query string builder (filter/sort/page/include)

/// Accumulates `filter[x]`, `sort`, `page[size]` and `include` parameters in
/// insertion order. reqwest handles percent-encoding when the request is
/// built.
#[derive(Debug, Clone, Default)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// `filter[field]=value`
    pub fn filter(mut self, field: &str, value: impl Into<String>) -> Self {
        self.params.push((format!("filter[{}]", field), value.into()));
        self
    }

    /// `sort=order`; prefix a field with `-` for descending
    pub fn sort(mut self, order: &str) -> Self {
        self.params.push(("sort".to_string(), order.to_string()));
        self
    }

    /// `page[size]=size`
    pub fn page_size(mut self, size: u32) -> Self {
        self.params.push(("page[size]".to_string(), size.to_string()));
        self
    }

    /// `page[number]=number`, 1-based
    pub fn page_number(mut self, number: u32) -> Self {
        self.params
            .push(("page[number]".to_string(), number.to_string()));
        self
    }

    /// `include=rels`, comma-separated relationship names
    pub fn include(mut self, rels: &str) -> Self {
        self.params.push(("include".to_string(), rels.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        let query = Query::new();
        assert!(query.is_empty());
        assert!(query.params().is_empty());
    }

    #[test]
    fn test_filter_wraps_field_name() {
        let query = Query::new().filter("assignee_id", "561888");
        assert_eq!(
            query.params(),
            &[("filter[assignee_id]".to_string(), "561888".to_string())]
        );
    }

    #[test]
    fn test_builder_preserves_order() {
        let query = Query::new()
            .filter("status", "1")
            .sort("-last_activity_at")
            .page_size(10)
            .include("project");
        let keys: Vec<&str> = query.params().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["filter[status]", "sort", "page[size]", "include"]
        );
    }

    #[test]
    fn test_page_params_render_numbers() {
        let query = Query::new().page_size(30).page_number(2);
        assert_eq!(
            query.params(),
            &[
                ("page[size]".to_string(), "30".to_string()),
                ("page[number]".to_string(), "2".to_string()),
            ]
        );
    }
}
