//! Record → RDF graph projection
//!
//! Projects one serialized record through its `ResourceMapping`:
//!
//! - `(entity, rdf:type, type)` where `entity = resource_uri + fragment`
//! - one statement per mapped field value (one per element for sequences)
//! - an optional `(entity, owl:sameAs, alternate)` statement
//!
//! Relative URIs are resolved against the configured base IRI.

use super::graph::RdfGraph;
use super::mapping::ResourceMapping;
use super::namespace::{NamespaceManager, PrefixError, OWL, RDF};
use super::record::{nested_resource_uri, scalar_text, SerializedRecord};
use super::types::{Literal, NamedNode, RdfObject, RdfPredicate};
use crate::config::RdfConfig;
use chrono::{DateTime, NaiveDateTime};
use oxiri::Iri;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Projection errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// Qualified name could not be resolved against the mapping's prefixes
    #[error("Configuration error in mapping '{mapping}': {source}")]
    Prefix {
        mapping: String,
        #[source]
        source: PrefixError,
    },

    /// Resolved URI is not a valid IRI
    #[error("Invalid IRI '{iri}': {reason}")]
    InvalidIri { iri: String, reason: String },

    /// Value of a reference field is neither a URI nor a nested record
    #[error("Field '{field}' cannot be rendered as a reference: {value}")]
    InvalidReference { field: String, value: String },
}

pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Conversion applied to one field value. The field name is passed
/// explicitly so errors can name it.
pub(crate) type Converter =
    fn(&ProjectionContext, &str, &Value, &str) -> ProjectionResult<Vec<RdfObject>>;

/// Per-projection state: base IRI and the mapping's namespaces.
///
/// Built fresh for every record or collection and dropped afterwards.
#[derive(Debug, Clone)]
pub struct ProjectionContext {
    mapping: String,
    base: Iri<String>,
    namespaces: NamespaceManager,
}

impl ProjectionContext {
    pub fn new(mapping: &ResourceMapping, config: &RdfConfig) -> ProjectionResult<Self> {
        let base = Iri::parse(config.base_iri.clone()).map_err(|e| ProjectionError::InvalidIri {
            iri: config.base_iri.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            mapping: mapping.name().to_string(),
            base,
            namespaces: NamespaceManager::from_prefixes(mapping.prefixes()),
        })
    }

    /// Resolve a qualified name to an IRI
    pub fn expand(&self, qname: &str) -> ProjectionResult<NamedNode> {
        let iri = self
            .namespaces
            .expand(qname)
            .map_err(|source| ProjectionError::Prefix {
                mapping: self.mapping.clone(),
                source,
            })?;
        absolute(iri)
    }

    /// Resolve a possibly relative URI reference against the base IRI
    pub fn iri(&self, reference: &str) -> ProjectionResult<NamedNode> {
        let resolved = self
            .base
            .resolve(reference)
            .map_err(|e| ProjectionError::InvalidIri {
                iri: reference.to_string(),
                reason: e.to_string(),
            })?;
        absolute(resolved.into_inner())
    }

    /// Bind `rdf` and the mapping's prefixes on a graph
    pub fn bind_prefixes(&self, graph: &mut RdfGraph) {
        graph.bind("rdf", RDF);
        for ns in self.namespaces.prefixes() {
            graph.bind(ns.prefix, ns.iri);
        }
    }
}

fn absolute(iri: String) -> ProjectionResult<NamedNode> {
    NamedNode::new(iri.clone()).map_err(|e| ProjectionError::InvalidIri {
        iri,
        reason: e.to_string(),
    })
}

/// A record's graph together with its primary subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRecord {
    pub subject: NamedNode,
    pub graph: RdfGraph,
}

/// Projects records according to their registered mappings
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: RdfConfig,
}

impl Projector {
    /// Create a projector with the given configuration
    pub fn new(config: RdfConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RdfConfig {
        &self.config
    }

    /// Project one record into its RDF graph
    pub fn project(
        &self,
        mapping: &ResourceMapping,
        record: &SerializedRecord,
    ) -> ProjectionResult<ProjectedRecord> {
        let ctx = ProjectionContext::new(mapping, &self.config)?;
        let mut graph = RdfGraph::new();
        ctx.bind_prefixes(&mut graph);

        let subject = ctx.iri(&format!("{}{}", record.resource_uri, mapping.fragment()))?;
        let rdf_type = ctx.expand(mapping.rdf_type())?;
        graph.add(subject.clone(), NamedNode::rdf_type().into(), rdf_type);

        for (field, value) in &record.fields {
            let Some(field_mapping) = mapping.field(field) else {
                continue;
            };
            let predicate = RdfPredicate::from(ctx.expand(&field_mapping.predicate.qname)?);
            let objects = (field_mapping.convert)(
                &ctx,
                field,
                value,
                &field_mapping.predicate.fragment,
            )?;
            for object in objects {
                graph.add(subject.clone(), predicate.clone(), object);
            }
        }

        if let Some(rule) = mapping.same_as() {
            match record.get(&rule.source_field) {
                Some(value) if !value.is_null() => {
                    let alternate = rule.format(&scalar_text(value));
                    let alternate = ctx.iri(&format!("{}{}", alternate, mapping.fragment()))?;
                    graph.bind("owl", OWL);
                    graph.add(subject.clone(), owl_same_as(), alternate);
                }
                _ => debug!(
                    "{}: no '{}' value, skipping owl:sameAs",
                    mapping.name(),
                    rule.source_field
                ),
            }
        }

        debug!(
            "Projected {} statements for {}",
            graph.len(),
            subject.as_str()
        );
        Ok(ProjectedRecord { subject, graph })
    }
}

fn owl_same_as() -> RdfPredicate {
    NamedNode::vocabulary(OWL, "sameAs").into()
}

fn elements(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn is_timestamp(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}

fn literal_for(value: &Value, fragment: &str) -> Option<Literal> {
    if value.is_null() {
        return None;
    }
    if !fragment.is_empty() {
        let text = nested_resource_uri(value)
            .map(str::to_string)
            .unwrap_or_else(|| scalar_text(value));
        return Some(Literal::new_simple_literal(format!("{}{}", text, fragment)));
    }
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(Literal::new_boolean(*b)),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() => Literal::new_double(f),
            _ => Literal::new_integer(n),
        }),
        Value::String(s) if s.contains('T') && is_timestamp(s) => {
            Some(Literal::new_date_time(s.clone()))
        }
        Value::String(s) => Some(Literal::new_simple_literal(s.clone())),
        Value::Object(_) => Some(Literal::new_simple_literal(
            nested_resource_uri(value)
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string()),
        )),
        Value::Array(_) => Some(Literal::new_simple_literal(value.to_string())),
    }
}

/// Literal kind: wrap each value, typed by its JSON type
pub(crate) fn literal_objects(
    _ctx: &ProjectionContext,
    _field: &str,
    value: &Value,
    fragment: &str,
) -> ProjectionResult<Vec<RdfObject>> {
    Ok(elements(value)
        .into_iter()
        .filter_map(|v| literal_for(v, fragment))
        .map(RdfObject::from)
        .collect())
}

/// Reference kind: each value is a URI, or a nested record whose
/// `resource_uri` is used
pub(crate) fn reference_objects(
    ctx: &ProjectionContext,
    field: &str,
    value: &Value,
    fragment: &str,
) -> ProjectionResult<Vec<RdfObject>> {
    let mut objects = Vec::new();
    for v in elements(value) {
        let uri = match v {
            Value::Null => continue,
            Value::String(s) => s.as_str(),
            Value::Object(_) => nested_resource_uri(v).ok_or_else(|| invalid_reference(field, v))?,
            _ => return Err(invalid_reference(field, v)),
        };
        objects.push(ctx.iri(&format!("{}{}", uri, fragment))?.into());
    }
    Ok(objects)
}

fn invalid_reference(field: &str, value: &Value) -> ProjectionError {
    ProjectionError::InvalidReference {
        field: field.to_string(),
        value: value.to_string(),
    }
}
