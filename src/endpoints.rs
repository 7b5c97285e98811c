//! Static endpoint descriptor table.
//!
//! Each query kind maps to an upstream base URL and the shape its response
//! body comes in. The table is data: adding a query variant means adding a
//! row here, not another branch in the normalizer's control flow.

use crate::common::constants::{
    COLLECTION_BASE_URL, LOOKUP_BASE_URL, SEARCH_BASE_URL, STOREFRONT_PAGE_BASE_URL,
};
use crate::common::types::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Search,
    Collection,
    Developer,
    Similar,
    Details,
    BatchDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{"bubbles": [{"results": [...]}]}` from the MZStore search service.
    SearchBubbles,
    /// `{"feed": {"entry": [...]}}` from the RSS feed generator.
    Feed,
    /// `{"resultCount": n, "results": [...]}` from the lookup service.
    LookupResults,
    /// HTML page with a JSON id array embedded in a script payload.
    EmbeddedJson,
}

#[derive(Debug)]
pub struct Endpoint {
    pub kind: QueryKind,
    pub base: &'static str,
    pub shape: ResponseShape,
}

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        kind: QueryKind::Search,
        base: SEARCH_BASE_URL,
        shape: ResponseShape::SearchBubbles,
    },
    Endpoint {
        kind: QueryKind::Collection,
        base: COLLECTION_BASE_URL,
        shape: ResponseShape::Feed,
    },
    Endpoint {
        kind: QueryKind::Developer,
        base: LOOKUP_BASE_URL,
        shape: ResponseShape::LookupResults,
    },
    Endpoint {
        kind: QueryKind::Similar,
        base: STOREFRONT_PAGE_BASE_URL,
        shape: ResponseShape::EmbeddedJson,
    },
    Endpoint {
        kind: QueryKind::Details,
        base: LOOKUP_BASE_URL,
        shape: ResponseShape::LookupResults,
    },
    Endpoint {
        kind: QueryKind::BatchDetails,
        base: LOOKUP_BASE_URL,
        shape: ResponseShape::LookupResults,
    },
];

impl Query {
    pub fn kind(&self) -> QueryKind {
        match self {
            Query::Search { .. } => QueryKind::Search,
            Query::Collection { .. } => QueryKind::Collection,
            Query::Developer { .. } => QueryKind::Developer,
            Query::Similar { .. } => QueryKind::Similar,
            Query::Details { .. } => QueryKind::Details,
            Query::BatchDetails { .. } => QueryKind::BatchDetails,
        }
    }
}

/// Row for a query kind. The table is total over `QueryKind`, which the
/// tests pin down.
pub fn descriptor(kind: QueryKind) -> &'static Endpoint {
    ENDPOINTS
        .iter()
        .find(|endpoint| endpoint.kind == kind)
        .expect("endpoint table covers every query kind")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [QueryKind; 6] = [
        QueryKind::Search,
        QueryKind::Collection,
        QueryKind::Developer,
        QueryKind::Similar,
        QueryKind::Details,
        QueryKind::BatchDetails,
    ];

    #[test]
    fn table_covers_every_kind() {
        for kind in ALL_KINDS {
            let endpoint = descriptor(kind);
            assert_eq!(endpoint.kind, kind);
            assert!(endpoint.base.starts_with("http"));
        }
    }

    #[test]
    fn lookup_kinds_share_base_and_shape() {
        for kind in [QueryKind::Developer, QueryKind::Details, QueryKind::BatchDetails] {
            let endpoint = descriptor(kind);
            assert_eq!(endpoint.base, LOOKUP_BASE_URL);
            assert_eq!(endpoint.shape, ResponseShape::LookupResults);
        }
    }
}
