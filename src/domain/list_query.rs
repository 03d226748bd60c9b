//! Query state of one paginated listing and its wire representation.

use crate::domain::types::{PageNumber, PageSize, SortSpec};

pub const PAGE_PARAM: &str = "page";
pub const SIZE_PARAM: &str = "size";
pub const SORT_PARAM: &str = "sort";
pub const KEYWORD_PARAM: &str = "keyword";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: PageNumber,
    pub size: PageSize,
    pub sort: SortSpec,
    pub keyword: Option<String>,
}

impl ListQuery {
    pub fn new(sort: SortSpec) -> Self {
        Self {
            page: PageNumber::FIRST,
            size: PageSize::default(),
            sort,
            keyword: None,
        }
    }

    pub fn page(mut self, page: PageNumber) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: PageSize) -> Self {
        self.size = size;
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Query parameters sent to a list endpoint.
    ///
    /// The backend pages from zero, so `page` is shifted down by one. A
    /// non-empty keyword is sent exactly as typed.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            (PAGE_PARAM.to_string(), self.page.offset().to_string()),
            (SIZE_PARAM.to_string(), self.size.to_string()),
            (SORT_PARAM.to_string(), self.sort.to_string()),
        ];

        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.is_empty()) {
            params.push((KEYWORD_PARAM.to_string(), keyword.to_string()));
        }

        params
    }
}
