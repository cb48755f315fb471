//! RDF/XML output

use super::{rio_triple, SerializeError, SerializeResult};
use crate::rdf::graph::RdfGraph;
use rio_api::formatter::TriplesFormatter;
use rio_xml::RdfXmlFormatter;

/// RDF/XML serializer
pub struct RdfXmlSerializerWrapper;

impl RdfXmlSerializerWrapper {
    pub fn serialize(graph: &RdfGraph) -> SerializeResult<String> {
        let mut formatter = RdfXmlFormatter::new(Vec::new())?;
        for triple in graph.iter() {
            formatter
                .format(&rio_triple(triple))
                .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        }
        let output = formatter
            .finish()
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::types::{NamedNode, RdfPredicate};

    #[test]
    fn test_rdfxml_serialization() {
        let mut graph = RdfGraph::new();
        graph.add(
            NamedNode::new("http://example.org/entry/1/#post").unwrap(),
            RdfPredicate::new("http://rdfs.org/sioc/ns#has_creator").unwrap(),
            NamedNode::new("http://example.org/user/1/").unwrap(),
        );
        let xml = RdfXmlSerializerWrapper::serialize(&graph).unwrap();
        assert!(xml.contains("rdf:RDF"));
        assert!(xml.contains("http://example.org/entry/1/#post"));
        assert!(xml.contains("http://example.org/user/1/"));
    }
}
