use serde::Serialize;

use crate::types::{EventId, TeamPage};

/// Rows per page of the admin team list.
pub const PAGE_SIZE: u32 = 10;

/// The four independent, conjunctive list filters.
///
/// `None` means "no constraint". Empty or whitespace-only text never
/// becomes a constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub department: Option<String>,
    /// Tri-state: unset, only verified, only unverified.
    pub verified: Option<bool>,
    pub event: Option<EventId>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Normalizes user text: blank input clears the field.
    pub fn text(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Snapshot of filters plus the page cursor, sent as one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamQuery {
    pub filters: FilterCriteria,
    pub page: u32,
    pub limit: u32,
}

impl TeamQuery {
    pub fn new(filters: FilterCriteria, page: u32) -> Self {
        Self {
            filters,
            page: page.max(1),
            limit: PAGE_SIZE,
        }
    }

    /// Query parameters in wire order. Unset filters are omitted entirely;
    /// `verified=false` is kept.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);

        if let Some(search) = FilterCriteria::text(self.filters.search.clone()) {
            pairs.push(("search", search));
        }
        if let Some(department) = FilterCriteria::text(self.filters.department.clone()) {
            pairs.push(("department", department));
        }
        if let Some(verified) = self.filters.verified {
            pairs.push(("verified", verified.to_string()));
        }
        if let Some(event) = self.filters.event {
            pairs.push(("event_id", event.as_str().to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));

        pairs
    }

    /// URL-encoded form of [`Self::to_pairs`].
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_pairs())
            .finish()
    }
}

/// Cursor plus the server-reported totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PAGE_SIZE,
            total: 0,
            total_pages: 0,
        }
    }
}

impl Pagination {
    /// Take totals from the server verbatim; the cursor is ours.
    pub fn absorb(&mut self, page: &TeamPage) {
        self.total = page.total;
        self.total_pages = page.total_pages;
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// The cursor points beyond a non-empty list.
    pub fn past_end(&self) -> bool {
        self.total_pages > 0 && self.page > self.total_pages
    }

    /// Range of 1-based row numbers shown on this page, if any.
    pub fn showing(&self, rows: usize) -> Option<(u64, u64)> {
        if rows == 0 {
            return None;
        }
        let first = u64::from(self.page - 1) * u64::from(self.limit) + 1;
        Some((first, first + rows as u64 - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(filters: FilterCriteria, page: u32) -> TeamQuery {
        TeamQuery::new(filters, page)
    }

    #[test]
    fn test_encode_unverified_event_page_two() {
        let filters = FilterCriteria {
            verified: Some(false),
            event: Some(EventId::ComicStrip),
            ..Default::default()
        };
        assert_eq!(
            query(filters, 2).encode(),
            "verified=false&event_id=comic_strip&page=2&limit=10"
        );
    }

    #[test]
    fn test_unset_filters_are_omitted() {
        assert_eq!(query(FilterCriteria::default(), 1).encode(), "page=1&limit=10");
    }

    #[test]
    fn test_blank_text_is_omitted() {
        let filters = FilterCriteria {
            search: Some("   ".to_string()),
            department: Some(String::new()),
            ..Default::default()
        };
        let keys: Vec<_> = query(filters, 1).to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["page", "limit"]);
    }

    #[test]
    fn test_every_filter_combination_includes_exactly_the_set_fields() {
        let searches = [None, Some("ink".to_string())];
        let departments = [None, Some("CSE".to_string())];
        let verified = [None, Some(true), Some(false)];
        let events = [None, Some(EventId::ComicStrip), Some(EventId::AiBlitz)];

        for search in &searches {
            for department in &departments {
                for v in verified {
                    for event in events {
                        let filters = FilterCriteria {
                            search: search.clone(),
                            department: department.clone(),
                            verified: v,
                            event,
                        };
                        let pairs = query(filters, 3).to_pairs();
                        let keys: Vec<_> = pairs.iter().map(|(k, _)| *k).collect();

                        assert_eq!(keys.contains(&"search"), search.is_some());
                        assert_eq!(keys.contains(&"department"), department.is_some());
                        assert_eq!(keys.contains(&"verified"), v.is_some());
                        assert_eq!(keys.contains(&"event_id"), event.is_some());
                        assert_eq!(&keys[keys.len() - 2..], &["page", "limit"]);

                        if let Some(v) = v {
                            assert!(pairs.contains(&("verified", v.to_string())));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_search_is_url_encoded() {
        let filters = FilterCriteria {
            search: Some("pixel & ink".to_string()),
            ..Default::default()
        };
        assert_eq!(query(filters, 1).encode(), "search=pixel+%26+ink&page=1&limit=10");
    }

    #[test]
    fn test_prev_next_disabled_exactly_at_bounds() {
        let mut p = Pagination {
            total: 25,
            total_pages: 3,
            ..Default::default()
        };
        assert!(!p.has_prev());
        assert!(p.has_next());

        p.page = 2;
        assert!(p.has_prev());
        assert!(p.has_next());

        p.page = 3;
        assert!(p.has_prev());
        assert!(!p.has_next());
    }

    #[test]
    fn test_single_empty_page_disables_both() {
        let p = Pagination::default();
        assert!(!p.has_prev());
        assert!(!p.has_next());
        assert_eq!(p.showing(0), None);
    }

    #[test]
    fn test_showing_range() {
        let p = Pagination {
            page: 3,
            total: 25,
            total_pages: 3,
            ..Default::default()
        };
        assert_eq!(p.showing(5), Some((21, 25)));
    }

    #[test]
    fn test_past_end_only_for_non_empty_lists() {
        let mut p = Pagination {
            page: 3,
            total: 20,
            total_pages: 2,
            ..Default::default()
        };
        assert!(p.past_end());
        p.page = 2;
        assert!(!p.past_end());
        assert!(!Pagination::default().past_end());
    }
}
