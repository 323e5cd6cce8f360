//! End-to-end generation from an XML tree description into a directory.

use treesel_codegen::{CodegenError, DirectorySink, Generator, GeneratorConfig, generate_from_file};
use treesel_core::{ReaderKind, ShapeIssue};
use treesel_schema::{parse_tree, validate_tree};

const EVENTS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tree name="events" title="Event data" file="events.root">
  <classes>
    <class name="string"/>
    <class name="Track" declFile="include/physics/Track.h"/>
    <class name="Event" declFile="include/Event.h"/>
    <class name="vector&lt;Track&gt;" collection="vector" value="Track"/>
    <class name="vector&lt;string&gt;" collection="-1" value="string"/>
    <class name="TClonesArray" clones="true"/>
  </classes>
  <branch name="px">
    <leaf name="px" type="float" title="px/F"/>
  </branch>
  <branch name="hits">
    <leaf name="hits" type="int" title="hits[nhits]/I"/>
  </branch>
  <branch name="matrix">
    <leaf name="matrix[3][3]" type="double"/>
  </branch>
  <branch name="tracks" class="vector&lt;Track&gt;"/>
  <branch name="labels" class="vector&lt;string&gt;"/>
  <branch name="clusters" class="TClonesArray"/>
  <branch name="event." class="Event">
    <branch name="event.run">
      <leaf name="run" type="int"/>
    </branch>
    <branch name="event.weights">
      <leaf name="weights" type="float" title="weights[4]/F"/>
    </branch>
  </branch>
</tree>
"#;

fn write_xml(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("events.xml");
    std::fs::write(&path, EVENTS_XML).unwrap();
    path
}

#[test]
fn test_generate_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let tree = parse_tree(EVENTS_XML).unwrap();
    validate_tree(&tree).unwrap();

    let config = GeneratorConfig::new().class_name("EventSelector");
    let generator = Generator::from_tree(&tree, config);
    let mut sink = DirectorySink::create(dir.path().join("out")).unwrap();
    let generation = generator.run(&mut sink).unwrap();

    let header = std::fs::read_to_string(dir.path().join("out/EventSelector.h")).unwrap();
    let source = std::fs::read_to_string(dir.path().join("out/EventSelector.C")).unwrap();
    assert_eq!(header, generation.artifacts.declaration.contents);
    assert_eq!(source, generation.artifacts.definition.contents);

    let readers: Vec<_> = generation
        .state
        .readers()
        .iter()
        .map(|r| (r.kind, r.accessor_name.as_str()))
        .collect();
    assert_eq!(
        readers,
        vec![
            (ReaderKind::Value, "px"),
            (ReaderKind::Array, "hits"),
            (ReaderKind::Value, "tracks"),
            (ReaderKind::Value, "labels"),
            (ReaderKind::Value, "event_run"),
            (ReaderKind::Array, "event_weights"),
        ]
    );

    let includes: Vec<_> = generation
        .state
        .headers()
        .iter()
        .map(|d| d.text.as_str())
        .collect();
    assert_eq!(
        includes,
        vec![
            "#include \"physics/Track.h\"",
            "#include <vector>",
            "#include <string>",
            "#include \"Event.h\"",
        ]
    );

    let issues: Vec<_> = generation
        .state
        .diagnostics()
        .iter()
        .map(|d| (d.field.as_str(), d.shape_issue().cloned()))
        .collect();
    assert_eq!(
        issues,
        vec![
            ("matrix", Some(ShapeIssue::MultiDimensionalArray { rank: 2 })),
            ("clusters", Some(ShapeIssue::TopLevelFixedContainer)),
        ]
    );

    assert!(header.contains("TTreeReaderArray<float> event_weights = {fReader, \"event.weights\"};"));
    assert!(source.contains("#include \"EventSelector.h\""));
}

#[test]
fn test_generate_from_file_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xml(dir.path());

    let first = generate_from_file(&path, GeneratorConfig::default()).unwrap();
    let second = generate_from_file(&path, GeneratorConfig::default()).unwrap();

    assert_eq!(first.artifacts, second.artifacts);
    assert_eq!(first.artifacts.declaration.name, "events.h");
}

#[test]
fn test_missing_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let tree = parse_tree(EVENTS_XML).unwrap();
    let generator = Generator::from_tree(&tree, GeneratorConfig::default());
    let mut sink = DirectorySink::new(dir.path().join("does-not-exist"));

    match generator.run(&mut sink) {
        Err(CodegenError::ArtifactWrite { target, .. }) => assert_eq!(target, "events.h"),
        other => panic!("expected artifact write error, got {other:?}"),
    }
}

#[test]
fn test_unroll_disabled() {
    let tree = parse_tree(EVENTS_XML).unwrap();
    let generator = Generator::from_tree(&tree, GeneratorConfig::new().max_unroll(0));
    let generation = generator.generate().unwrap();

    let event = generation
        .state
        .readers()
        .iter()
        .find(|r| r.source_field_name == "event.")
        .unwrap();
    assert_eq!(event.element_type, "Event");
    assert_eq!(event.accessor_name, "event");
}
