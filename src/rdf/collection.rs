//! Collection-level projection
//!
//! A list response becomes a synthetic `<path>#list` resource that
//! `dcterms:hasPart` every item, plus an LDP paging description when the
//! list is paginated.

use super::graph::RdfGraph;
use super::mapping::ResourceMapping;
use super::namespace::{DCTERMS, LDP};
use super::projection::{ProjectedRecord, ProjectionContext, ProjectionResult, Projector};
use super::record::SerializedRecord;
use super::types::{NamedNode, RdfPredicate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pagination metadata reported alongside a list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl PageMeta {
    /// Next page link; an empty cursor counts as absent
    pub fn next_link(&self) -> Option<&str> {
        non_empty(&self.next)
    }

    /// Previous page link; an empty cursor counts as absent
    pub fn previous_link(&self) -> Option<&str> {
        non_empty(&self.previous)
    }

    /// True when there is a next or a previous page
    pub fn is_paginated(&self) -> bool {
        self.next_link().is_some() || self.previous_link().is_some()
    }
}

fn non_empty(cursor: &Option<String>) -> Option<&str> {
    cursor.as_deref().filter(|s| !s.is_empty())
}

/// A serialized list response: `{"meta": {...}, "objects": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionEnvelope {
    #[serde(default)]
    pub meta: Option<PageMeta>,
    #[serde(default)]
    pub objects: Vec<SerializedRecord>,
}

impl CollectionEnvelope {
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }
}

/// The request a list was served for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRequest {
    /// Path without query string, e.g. `/api/v1/entry/`
    pub path: String,
    /// Raw query string without the leading `?`
    pub query: Option<String>,
}

impl CollectionRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Path plus query string
    pub fn full_path(&self) -> String {
        match &self.query {
            Some(q) if !q.is_empty() => format!("{}?{}", self.path, q),
            _ => self.path.clone(),
        }
    }
}

/// Aggregate graph for a list response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionProjection {
    /// The synthetic `<path>#list` resource
    pub list: NamedNode,
    /// The `ldp:Page` resource, when paginated
    pub page: Option<NamedNode>,
    /// `hasPart` links and the paging description
    pub graph: RdfGraph,
    /// Per-item projections the links were derived from
    pub items: Vec<ProjectedRecord>,
}

impl CollectionProjection {
    /// Aggregate graph plus every item graph
    pub fn merged_graph(&self) -> RdfGraph {
        let mut merged = self.graph.clone();
        for item in &self.items {
            merged.extend(&item.graph);
        }
        merged
    }
}

impl Projector {
    /// Build the aggregate graph for already projected items
    pub fn project_collection(
        &self,
        mapping: &ResourceMapping,
        items: Vec<ProjectedRecord>,
        meta: Option<&PageMeta>,
        request: &CollectionRequest,
    ) -> ProjectionResult<CollectionProjection> {
        let ctx = ProjectionContext::new(mapping, self.config())?;
        let mut graph = RdfGraph::new();
        graph.bind("dcterms", DCTERMS);
        graph.bind("ldp", LDP);
        ctx.bind_prefixes(&mut graph);

        let rdf_type = ctx.expand(mapping.rdf_type())?;
        let list = ctx.iri(&format!("{}#list", request.path))?;
        let has_part: RdfPredicate = NamedNode::vocabulary(DCTERMS, "hasPart").into();

        for item in &items {
            for subject in item.graph.typed_subjects(&rdf_type) {
                graph.add(list.clone(), has_part.clone(), subject.clone());
            }
        }

        let page = match meta {
            Some(meta) if meta.is_paginated() => {
                let page = ctx.iri(&request.full_path())?;
                let next = match meta.next_link() {
                    Some(next) => ctx.iri(next)?,
                    None => NamedNode::rdf_nil(),
                };
                graph.add(
                    page.clone(),
                    NamedNode::rdf_type().into(),
                    NamedNode::vocabulary(LDP, "Page"),
                );
                graph.add(page.clone(), NamedNode::vocabulary(LDP, "nextPage").into(), next);
                graph.add(page.clone(), NamedNode::vocabulary(LDP, "pageOf").into(), list.clone());
                Some(page)
            }
            _ => None,
        };

        debug!(
            "Projected collection {} with {} items",
            list.as_str(),
            items.len()
        );
        Ok(CollectionProjection {
            list,
            page,
            graph,
            items,
        })
    }

    /// Project every record of a list response, then the list itself
    pub fn project_envelope(
        &self,
        mapping: &ResourceMapping,
        envelope: &CollectionEnvelope,
        request: &CollectionRequest,
    ) -> ProjectionResult<CollectionProjection> {
        let items = envelope
            .objects
            .iter()
            .map(|record| self.project(mapping, record))
            .collect::<ProjectionResult<Vec<_>>>()?;
        self.project_collection(mapping, items, envelope.meta.as_ref(), request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::mapping::MappingDeclaration;

    fn mapping() -> ResourceMapping {
        let decl = MappingDeclaration::new("sioc:Post")
            .prefix("sioc", "http://rdfs.org/sioc/ns#")
            .prefix("dcterms", "http://purl.org/dc/terms/")
            .fragment("#post")
            .field("title", "dcterms:title", "Literal");
        ResourceMapping::register("entry", decl).unwrap()
    }

    #[test]
    fn test_full_path() {
        let request = CollectionRequest::new("/api/v1/entry/").with_query("limit=2");
        assert_eq!(request.full_path(), "/api/v1/entry/?limit=2");
        assert_eq!(CollectionRequest::new("/api/v1/entry/").full_path(), "/api/v1/entry/");
    }

    #[test]
    fn test_previous_only_links_to_nil() {
        let meta = PageMeta {
            previous: Some("/api/v1/entry/?offset=0&limit=2".to_string()),
            ..PageMeta::default()
        };
        let request = CollectionRequest::new("/api/v1/entry/").with_query("offset=2&limit=2");
        let projection = Projector::default()
            .project_collection(&mapping(), Vec::new(), Some(&meta), &request)
            .unwrap();

        let page = projection.page.clone().unwrap();
        assert_eq!(page.as_str(), "http://localhost/api/v1/entry/?offset=2&limit=2");
        let next_page = RdfPredicate::from(NamedNode::vocabulary(LDP, "nextPage"));
        let next: Vec<_> = projection.graph.triples_with_predicate(&next_page).collect();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].object.as_named_node(), Some(&NamedNode::rdf_nil()));
    }

    #[test]
    fn test_empty_cursors_are_not_pages() {
        let meta = PageMeta {
            next: Some(String::new()),
            previous: Some(String::new()),
            ..PageMeta::default()
        };
        assert!(!meta.is_paginated());

        let request = CollectionRequest::new("/api/v1/entry/").with_query("limit=2");
        let projection = Projector::default()
            .project_collection(&mapping(), Vec::new(), Some(&meta), &request)
            .unwrap();
        assert!(projection.page.is_none());
        assert!(projection.graph.is_empty());
    }

    #[test]
    fn test_empty_next_links_to_nil() {
        let meta = PageMeta {
            next: Some(String::new()),
            previous: Some("/api/v1/entry/?offset=0&limit=2".to_string()),
            ..PageMeta::default()
        };
        let request = CollectionRequest::new("/api/v1/entry/").with_query("offset=2&limit=2");
        let projection = Projector::default()
            .project_collection(&mapping(), Vec::new(), Some(&meta), &request)
            .unwrap();

        let next_page = RdfPredicate::from(NamedNode::vocabulary(LDP, "nextPage"));
        let next: Vec<_> = projection.graph.triples_with_predicate(&next_page).collect();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].object.as_named_node(), Some(&NamedNode::rdf_nil()));
    }

    #[test]
    fn test_envelope_from_json() {
        let envelope = CollectionEnvelope::from_json(
            r#"{
                "meta": {"limit": 20, "next": null, "offset": 0, "previous": null, "total_count": 1},
                "objects": [{"resource_uri": "/api/v1/entry/1/", "title": "Hello"}]
            }"#,
        )
        .unwrap();
        assert_eq!(envelope.objects.len(), 1);
        assert_eq!(envelope.meta.as_ref().unwrap().total_count, Some(1));

        let projection = Projector::default()
            .project_envelope(&mapping(), &envelope, &CollectionRequest::new("/api/v1/entry/"))
            .unwrap();
        assert!(projection.page.is_none());
        assert_eq!(projection.graph.len(), 1);
        assert_eq!(projection.merged_graph().len(), 3);
    }
}
