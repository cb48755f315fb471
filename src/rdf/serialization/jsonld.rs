//! JSON-LD output (Basic)

use super::{SerializeError, SerializeResult};
use crate::rdf::graph::RdfGraph;
use crate::rdf::types::RdfObject;
use indexmap::IndexMap;
use serde_json::{json, Map, Value};

/// JSON-LD serializer
pub struct JsonLdSerializerWrapper;

impl JsonLdSerializerWrapper {
    /// Serialize a graph as `{"@context": prefixes, "@graph": [nodes]}`.
    ///
    /// Nodes are grouped by subject; property keys are full IRIs, so the
    /// context only declares prefixes for readers.
    pub fn serialize(graph: &RdfGraph) -> SerializeResult<String> {
        let mut nodes: IndexMap<&str, IndexMap<&str, Vec<Value>>> = IndexMap::new();

        for triple in graph.iter() {
            let value = match &triple.object {
                RdfObject::NamedNode(n) => json!({ "@id": n.as_str() }),
                RdfObject::Literal(l) => {
                    if let Some(lang) = l.language() {
                        json!({ "@value": l.value(), "@language": lang })
                    } else if l.is_plain() {
                        json!({ "@value": l.value() })
                    } else {
                        json!({ "@value": l.value(), "@type": l.datatype_iri() })
                    }
                }
            };

            nodes
                .entry(triple.subject.as_str())
                .or_default()
                .entry(triple.predicate.as_str())
                .or_default()
                .push(value);
        }

        let mut context = Map::new();
        for ns in graph.prefixes() {
            context.insert(ns.prefix, Value::String(ns.iri));
        }

        let nodes: Vec<Value> = nodes
            .into_iter()
            .map(|(subject, props)| {
                let mut node = Map::new();
                node.insert("@id".to_string(), Value::String(subject.to_string()));
                for (predicate, objects) in props {
                    node.insert(predicate.to_string(), Value::Array(objects));
                }
                Value::Object(node)
            })
            .collect();

        serde_json::to_string_pretty(&json!({ "@context": context, "@graph": nodes }))
            .map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}
