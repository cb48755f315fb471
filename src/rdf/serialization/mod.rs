//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)
//! - RDF/XML
//! - JSON-LD
//!
//! Failed requests are rendered as plain text, never as RDF.

mod jsonld;
mod rdfxml;
mod turtle;

pub use jsonld::JsonLdSerializerWrapper;
pub use rdfxml::RdfXmlSerializerWrapper;
pub use turtle::{NTriplesSerializerWrapper, TurtleSerializerWrapper};

use super::graph::RdfGraph;
use super::types::{RdfObject, Triple};
use mime::Mime;
use rio_api::model;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
    /// RDF/XML format (.rdf)
    RdfXml,
    /// JSON-LD format (.jsonld)
    JsonLd,
}

impl RdfFormat {
    pub const ALL: [RdfFormat; 4] = [
        RdfFormat::Turtle,
        RdfFormat::NTriples,
        RdfFormat::RdfXml,
        RdfFormat::JsonLd,
    ];

    /// Content type advertised for this format
    pub fn media_type(self) -> &'static str {
        match self {
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::NTriples => "application/n-triples",
            RdfFormat::RdfXml => "application/rdf+xml",
            RdfFormat::JsonLd => "application/ld+json",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            RdfFormat::Turtle => "ttl",
            RdfFormat::NTriples => "nt",
            RdfFormat::RdfXml => "rdf",
            RdfFormat::JsonLd => "jsonld",
        }
    }

    /// Format for a media type, ignoring parameters
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let parsed: Mime = media_type.trim().parse().ok()?;
        Self::from_mime(&parsed)
    }

    fn from_mime(parsed: &Mime) -> Option<Self> {
        match parsed.essence_str() {
            "text/turtle" | "application/x-turtle" => Some(RdfFormat::Turtle),
            "application/n-triples" => Some(RdfFormat::NTriples),
            "application/rdf+xml" => Some(RdfFormat::RdfXml),
            "application/ld+json" => Some(RdfFormat::JsonLd),
            _ => None,
        }
    }

    /// Pick a format from an `Accept` header.
    ///
    /// The supported type with the highest `q` wins; ties keep header order.
    /// Wildcards select `default`. Returns `None` when nothing acceptable
    /// is supported.
    pub fn negotiate(accept: &str, default: RdfFormat) -> Option<Self> {
        let mut best: Option<(f32, RdfFormat)> = None;
        for part in accept.split(',') {
            let Ok(parsed) = part.trim().parse::<Mime>() else {
                continue;
            };
            let q = parsed
                .get_param("q")
                .and_then(|q| q.as_str().parse::<f32>().ok())
                .unwrap_or(1.0);
            if q <= 0.0 {
                continue;
            }
            let format = if parsed.type_() == mime::STAR {
                Some(default)
            } else if parsed.subtype() == mime::STAR {
                RdfFormat::ALL
                    .iter()
                    .copied()
                    .find(|f| f.media_type().starts_with(parsed.type_().as_str()))
            } else {
                Self::from_mime(&parsed)
            };
            if let Some(format) = format {
                if best.map_or(true, |(best_q, _)| q > best_q) {
                    best = Some((q, format));
                }
            }
        }
        best.map(|(_, format)| format)
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_extension())
    }
}

impl FromStr for RdfFormat {
    type Err = SerializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "ntriples" | "nt" => Ok(RdfFormat::NTriples),
            "rdfxml" | "rdf" | "xml" => Ok(RdfFormat::RdfXml),
            "jsonld" | "json-ld" => Ok(RdfFormat::JsonLd),
            other => Err(SerializeError::UnknownFormat(other.to_string())),
        }
    }
}

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unknown format name
    #[error("Unknown format: {0}")]
    UnknownFormat(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// What a response carries: a graph, or the error of a failed request
#[derive(Debug, Clone)]
pub enum Payload<'a> {
    Graph(&'a RdfGraph),
    Error { message: String, traceback: String },
}

/// Serialized response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub body: String,
    pub content_type: &'static str,
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize a graph to a string
    pub fn serialize(graph: &RdfGraph, format: RdfFormat) -> SerializeResult<String> {
        match format {
            RdfFormat::Turtle => TurtleSerializerWrapper::serialize(graph),
            RdfFormat::NTriples => NTriplesSerializerWrapper::serialize(graph),
            RdfFormat::RdfXml => RdfXmlSerializerWrapper::serialize(graph),
            RdfFormat::JsonLd => JsonLdSerializerWrapper::serialize(graph),
        }
    }

    /// Render a response payload; errors become `ERROR: <message><traceback>`
    pub fn render(payload: &Payload<'_>, format: RdfFormat) -> SerializeResult<Rendered> {
        match payload {
            Payload::Graph(graph) => Ok(Rendered {
                body: Self::serialize(graph, format)?,
                content_type: format.media_type(),
            }),
            Payload::Error { message, traceback } => Ok(Rendered {
                body: format!("ERROR: {}{}", message, traceback),
                content_type: "text/plain",
            }),
        }
    }

    /// Serialize a graph to a file
    pub fn serialize_file(
        graph: &RdfGraph,
        path: &std::path::Path,
        format: RdfFormat,
    ) -> SerializeResult<()> {
        std::fs::write(path, Self::serialize(graph, format)?)?;
        Ok(())
    }
}

/// Borrowed rio view of a triple
pub(crate) fn rio_triple(triple: &Triple) -> model::Triple<'_> {
    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::Literal(l) => {
            let literal = if let Some(language) = l.language() {
                model::Literal::LanguageTaggedString {
                    value: l.value(),
                    language,
                }
            } else if l.is_plain() {
                model::Literal::Simple { value: l.value() }
            } else {
                model::Literal::Typed {
                    value: l.value(),
                    datatype: model::NamedNode {
                        iri: l.datatype_iri(),
                    },
                }
            };
            model::Term::Literal(literal)
        }
    };
    model::Triple {
        subject: model::Subject::NamedNode(model::NamedNode {
            iri: triple.subject.as_str(),
        }),
        predicate: model::NamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    }
}
