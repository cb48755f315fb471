use anyhow::Context;
use clap::Parser;
use rdfmodel::entry::{entry_mapping, RESOURCE_NAME};
use rdfmodel::{
    CollectionEnvelope, CollectionRequest, MappingRegistry, Payload, Projector, RdfConfig,
    RdfFormat, RdfSerializer, SerializedRecord,
};
use std::path::PathBuf;

const ENTRY_LIST: &str = r#"{
    "meta": {"limit": 2, "next": "/api/v1/entry/?offset=2&limit=2", "offset": 0, "previous": null, "total_count": 3},
    "objects": [
        {
            "resource_uri": "/api/v1/entry/1/",
            "title": "Hello world",
            "slug": "hello-world",
            "body": "First post.",
            "pub_date": "2013-02-10T12:30:00",
            "user": "/api/v1/user/1/"
        },
        {
            "resource_uri": "/api/v1/entry/2/",
            "title": "Linked data",
            "slug": "linked-data",
            "body": "Second post.",
            "pub_date": "2013-02-11T09:00:00",
            "user": {"resource_uri": "/api/v1/user/2/", "username": "bob"}
        }
    ]
}"#;

#[derive(Parser)]
#[command(name = "rdfmodel", version, about = "Project sample blog entries into RDF")]
struct Args {
    /// YAML or JSON file with `base_iri` and `default_format`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format, overriding the configured default
    #[arg(long)]
    format: Option<RdfFormat>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("rdfmodel v{}", rdfmodel::version());
    println!("==========================================");

    let config = match &args.config {
        Some(path) => RdfConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RdfConfig::default(),
    };
    let format = args.format.unwrap_or(config.default_format);

    let mut registry = MappingRegistry::new();
    registry.register(RESOURCE_NAME, entry_mapping())?;
    let mapping = registry
        .get(RESOURCE_NAME)
        .context("entry mapping not registered")?;
    let projector = Projector::new(config);

    println!("\n=== Single entry ({}) ===", format.media_type());
    let record = SerializedRecord::new("/api/v1/entry/1/")
        .with_field("title", "Hello world")
        .with_field("slug", "hello-world")
        .with_field("body", "First post.")
        .with_field("pub_date", "2013-02-10T12:30:00")
        .with_field("user", "/api/v1/user/1/");
    let projected = projector.project(mapping, &record)?;
    println!("{}", RdfSerializer::serialize(&projected.graph, format)?);

    println!("\n=== Entry list ===");
    let envelope = CollectionEnvelope::from_json(ENTRY_LIST)?;
    let request = CollectionRequest::new("/api/v1/entry/").with_query("offset=0&limit=2");
    let collection = projector.project_envelope(mapping, &envelope, &request)?;
    println!("{}", RdfSerializer::serialize(&collection.graph, format)?);

    println!("\n=== Failed request ===");
    let rendered = RdfSerializer::render(
        &Payload::Error {
            message: "Entry matching query does not exist.".to_string(),
            traceback: "\n(no traceback)".to_string(),
        },
        format,
    )?;
    println!("{} -> {}", rendered.content_type, rendered.body);

    Ok(())
}
