//! Turtle and N-Triples output

use super::{rio_triple, SerializeError, SerializeResult};
use crate::rdf::graph::RdfGraph;
use crate::rdf::namespace::Namespace;
use crate::rdf::types::RdfObject;
use rio_api::formatter::TriplesFormatter;
use rio_turtle::{NTriplesFormatter, TurtleFormatter};
use std::io::Write;

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize a graph to Turtle.
    ///
    /// Bound prefixes that some statement uses are declared first. The
    /// statements themselves are not compacted and keep full IRIs.
    pub fn serialize(graph: &RdfGraph) -> SerializeResult<String> {
        let mut output = Vec::new();

        let prefixes = used_prefixes(graph);
        for ns in &prefixes {
            writeln!(output, "@prefix {}: <{}> .", ns.prefix, ns.iri)?;
        }
        if !prefixes.is_empty() {
            writeln!(output)?;
        }

        let mut formatter = TurtleFormatter::new(&mut output);
        for triple in graph.iter() {
            formatter
                .format(&rio_triple(triple))
                .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        }
        formatter
            .finish()
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

/// Bound prefixes whose IRI starts at least one IRI in the graph
fn used_prefixes(graph: &RdfGraph) -> Vec<Namespace> {
    graph
        .prefixes()
        .into_iter()
        .filter(|ns| {
            graph.iter().any(|t| {
                let object = match &t.object {
                    RdfObject::NamedNode(n) => n.as_str(),
                    RdfObject::Literal(l) => l.datatype_iri(),
                };
                [t.subject.as_str(), t.predicate.as_str(), object]
                    .iter()
                    .any(|iri| iri.starts_with(&ns.iri))
            })
        })
        .collect()
}

/// N-Triples serializer. Prefixes are not part of the syntax and are dropped.
pub struct NTriplesSerializerWrapper;

impl NTriplesSerializerWrapper {
    pub fn serialize(graph: &RdfGraph) -> SerializeResult<String> {
        let mut output = Vec::new();
        {
            // Each statement is written as it is formatted; nothing to flush
            let mut formatter = NTriplesFormatter::new(&mut output);
            for triple in graph.iter() {
                formatter
                    .format(&rio_triple(triple))
                    .map_err(|e| SerializeError::Serialize(e.to_string()))?;
            }
        }

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::types::{Literal, NamedNode, RdfPredicate};

    fn graph() -> RdfGraph {
        let mut graph = RdfGraph::new();
        graph.bind("dcterms", "http://purl.org/dc/terms/");
        graph.add(
            NamedNode::new("http://example.org/entry/1/#post").unwrap(),
            RdfPredicate::new("http://purl.org/dc/terms/title").unwrap(),
            Literal::new_simple_literal("Hello"),
        );
        graph
    }

    #[test]
    fn test_turtle_prefix_header() {
        let output = TurtleSerializerWrapper::serialize(&graph()).unwrap();
        assert!(output.starts_with("@prefix dcterms: <http://purl.org/dc/terms/> .\n\n"));
        assert!(output.contains("<http://example.org/entry/1/#post>"));
        assert!(output.contains("\"Hello\""));
    }

    #[test]
    fn test_unused_prefixes_are_not_declared() {
        let mut graph = graph();
        graph.bind("sioc", "http://rdfs.org/sioc/ns#");
        graph.bind("xsd", "http://www.w3.org/2001/XMLSchema#");

        let output = TurtleSerializerWrapper::serialize(&graph).unwrap();
        assert!(output.contains("@prefix dcterms:"));
        assert!(!output.contains("@prefix sioc:"));
        // Simple literals are xsd:string typed
        assert!(output.contains("@prefix xsd:"));
    }

    #[test]
    fn test_ntriples_one_line_per_triple() {
        let output = NTriplesSerializerWrapper::serialize(&graph()).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(!output.contains("@prefix"));
        assert!(output.trim_end().ends_with('.'));
    }

    #[test]
    fn test_empty_graph() {
        assert!(TurtleSerializerWrapper::serialize(&RdfGraph::new())
            .unwrap()
            .trim()
            .is_empty());
    }
}
