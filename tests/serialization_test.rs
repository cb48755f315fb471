use rdfmodel::entry::entry_mapping;
use rdfmodel::rdf::{
    CollectionEnvelope, CollectionRequest, Payload, Projector, RdfFormat, RdfSerializer,
    ResourceMapping, SerializedRecord,
};
use rio_api::parser::TriplesParser;
use rio_turtle::{TurtleError, TurtleParser};

fn parse_turtle(input: &str) -> usize {
    let mut count = 0;
    let mut parser = TurtleParser::new(input.as_bytes(), None);
    parser
        .parse_all(&mut |_| -> Result<(), TurtleError> {
            count += 1;
            Ok(())
        })
        .unwrap();
    count
}

fn entry() -> SerializedRecord {
    SerializedRecord::new("/api/v1/entry/1/")
        .with_field("title", "Hello \"world\"")
        .with_field("slug", "hello-world")
        .with_field("body", "Line one\nLine two")
        .with_field("pub_date", "2013-02-10T12:30:00")
        .with_field("user", "/api/v1/user/1/")
}

#[test]
fn test_turtle_output_parses_back() {
    let mapping = ResourceMapping::register("entry", entry_mapping()).unwrap();
    let projected = Projector::default().project(&mapping, &entry()).unwrap();

    let turtle = RdfSerializer::serialize(&projected.graph, RdfFormat::Turtle).unwrap();
    assert!(turtle.contains("@prefix sioc: <http://rdfs.org/sioc/ns#> ."));
    assert!(turtle.contains("@prefix dcterms: <http://purl.org/dc/terms/> ."));
    assert!(turtle.contains("@prefix owl: <http://www.w3.org/2002/07/owl#> ."));
    assert!(turtle.contains("<http://localhost/posts/hello-world#post>"));
    assert_eq!(parse_turtle(&turtle), projected.graph.len());
}

#[test]
fn test_collection_turtle() {
    let mapping = ResourceMapping::register("entry", entry_mapping()).unwrap();
    let envelope = CollectionEnvelope::from_json(
        r#"{
            "meta": {"next": "/api/v1/entry/?offset=1&limit=1", "previous": null},
            "objects": [{"resource_uri": "/api/v1/entry/1/", "title": "Hello"}]
        }"#,
    )
    .unwrap();
    let projection = Projector::default()
        .project_envelope(
            &mapping,
            &envelope,
            &CollectionRequest::new("/api/v1/entry/").with_query("limit=1"),
        )
        .unwrap();

    let turtle = RdfSerializer::serialize(&projection.graph, RdfFormat::Turtle).unwrap();
    assert!(turtle.contains("@prefix ldp: <http://www.w3.org/ns/ldp#> ."));
    assert!(turtle.contains("<http://localhost/api/v1/entry/#list>"));
    // hasPart + Page type + nextPage + pageOf
    assert_eq!(parse_turtle(&turtle), 4);
}

#[test]
fn test_every_format_renders_graph() {
    let mapping = ResourceMapping::register("entry", entry_mapping()).unwrap();
    let projected = Projector::default().project(&mapping, &entry()).unwrap();

    for format in RdfFormat::ALL {
        let rendered = RdfSerializer::render(&Payload::Graph(&projected.graph), format).unwrap();
        assert_eq!(rendered.content_type, format.media_type());
        assert!(
            rendered.body.contains("http://localhost/api/v1/entry/1/#post"),
            "{} output lacks the entry subject",
            format
        );
    }
}

#[test]
fn test_error_payload_is_plain_text() {
    let rendered = RdfSerializer::render(
        &Payload::Error {
            message: "Sorry, this request could not be processed.".to_string(),
            traceback: "\nTraceback (most recent call last): ...".to_string(),
        },
        RdfFormat::Turtle,
    )
    .unwrap();
    assert_eq!(rendered.content_type, "text/plain");
    assert!(rendered.body.starts_with("ERROR: Sorry"));
    assert!(!rendered.body.contains("@prefix"));
}

#[test]
fn test_serialize_file() {
    let mapping = ResourceMapping::register("entry", entry_mapping()).unwrap();
    let projected = Projector::default().project(&mapping, &entry()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entry.nt");

    RdfSerializer::serialize_file(&projected.graph, &path, RdfFormat::NTriples).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), projected.graph.len());
}
