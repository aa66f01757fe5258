use serde::{Deserialize, Serialize};

use crate::domain::{ExhibitionRecord, SortSpec, EXHIBITION_FIELDS};

pub const PAGE_SIZE: u32 = 30;

/// A single page request against the exhibitions index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub page: u32,
    pub limit: u32,
    pub fields: Vec<String>,
    pub q: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
}

impl SearchRequest {
    pub fn new(page: u32, q: impl Into<String>, sort: Option<SortSpec>) -> Self {
        Self {
            page,
            limit: PAGE_SIZE,
            fields: EXHIBITION_FIELDS.iter().map(|f| f.to_string()).collect(),
            q: q.into(),
            sort,
        }
    }

    /// The plain listing endpoint can serve requests with no text and no sort.
    pub fn needs_search_endpoint(&self) -> bool {
        !self.q.is_empty() || self.sort.is_some()
    }

    /// `sort[<field>][order]=<dir>` in the index's bracket syntax.
    pub fn sort_clause(&self) -> Option<(String, String)> {
        self.sort.map(|spec| {
            (
                format!("sort[{}][order]", spec.field.sortable_name()),
                spec.direction.as_str().to_string(),
            )
        })
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("page".to_string(), self.page.to_string()),
            ("fields".to_string(), self.fields.join(",")),
        ];
        if self.needs_search_endpoint() {
            pairs.push(("q".to_string(), self.q.clone()));
        }
        if let Some(clause) = self.sort_clause() {
            pairs.push(clause);
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<ExhibitionRecord>,
    pub pagination: PaginationInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SortDirection, SortField};

    #[test]
    fn listing_request_has_no_q_or_sort() {
        let request = SearchRequest::new(3, "", None);
        assert!(!request.needs_search_endpoint());
        assert_eq!(
            request.query_pairs(),
            vec![
                ("limit".to_string(), "30".to_string()),
                ("page".to_string(), "3".to_string()),
                (
                    "fields".to_string(),
                    "title,is_featured,description,gallery_title,type,status".to_string()
                ),
            ]
        );
    }

    #[test]
    fn sorted_request_carries_suffixed_clause() {
        let request = SearchRequest::new(
            1,
            "",
            Some(SortSpec {
                field: SortField::Title,
                direction: SortDirection::Desc,
            }),
        );
        assert!(request.needs_search_endpoint());
        let pairs = request.query_pairs();
        assert!(pairs.contains(&("q".to_string(), String::new())));
        assert!(pairs.contains(&("sort[title.keyword][order]".to_string(), "desc".to_string())));
    }

    #[test]
    fn decodes_search_payload() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"pagination":{"total":1,"limit":30,"total_pages":7,"current_page":1},
                "data":[{"title":"Monet","is_featured":false,"description":null,
                         "gallery_title":null,"type":null,"status":"Closed"}]}"#,
        )
        .expect("decode");

        assert_eq!(response.pagination.total_pages, 7);
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].title.as_deref(), Some("Monet"));
    }
}
