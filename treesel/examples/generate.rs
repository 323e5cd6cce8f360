//! Generates a selector for a tree description.
//!
//! Usage: `cargo run --example generate -- [tree.xml] [output-dir] [class-name]`
//!
//! Without arguments a built-in event tree description is used and the files
//! are written to `./selector`. Set `RUST_LOG=debug` to trace the analysis.

use tracing_subscriber::EnvFilter;
use treesel::prelude::*;

const SAMPLE_TREE: &str = r#"
<tree name="events" title="Simulated events" file="events.root">
  <classes>
    <class name="string"/>
    <class name="Track" declFile="include/Track.h"/>
    <class name="Vertex" declFile="include/Vertex.h"/>
    <class name="vector&lt;Track&gt;" collection="vector" value="Track"/>
    <class name="map&lt;int,string&gt;" collection="map" value="pair&lt;int,string&gt;"/>
    <class name="pair&lt;int,string&gt;"/>
    <class name="TClonesArray" clones="true"/>
  </classes>
  <branch name="run">
    <leaf name="run" type="Int_t" title="run/I"/>
  </branch>
  <branch name="energy">
    <leaf name="energy" type="Float_t" title="energy[nhits]/F"/>
  </branch>
  <branch name="name">
    <leaf name="name" type="Char_t" kind="char"/>
  </branch>
  <branch name="covariance">
    <leaf name="covariance[5][5]" type="Double_t"/>
  </branch>
  <branch name="tracks" class="vector&lt;Track&gt;"/>
  <branch name="labels" class="map&lt;int,string&gt;"/>
  <branch name="hits" class="TClonesArray"/>
  <branch name="vertex." class="Vertex">
    <branch name="vertex.x"><leaf name="x" type="Double_t"/></branch>
    <branch name="vertex.y"><leaf name="y" type="Double_t"/></branch>
    <branch name="vertex.z"><leaf name="z" type="Double_t"/></branch>
  </branch>
</tree>
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let xml = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE_TREE.to_string(),
    };
    let out_dir = args.next().unwrap_or_else(|| "selector".to_string());

    let mut config = GeneratorConfig::new();
    if let Some(class_name) = args.next() {
        config = config.class_name(class_name);
    }

    let tree = parse_tree(&xml)?;
    validate_tree(&tree)?;

    let generator = Generator::from_tree(&tree, config);
    let mut sink = DirectorySink::create(&out_dir)?;
    let generation = generator.run(&mut sink)?;

    println!("Readers:");
    for reader in generation.state.readers() {
        println!("  {reader}");
    }
    println!("Includes:");
    for directive in generation.state.headers() {
        println!("  {}", directive.text);
    }
    if !generation.state.diagnostics().is_empty() {
        println!("Skipped:");
        for diagnostic in generation.state.diagnostics() {
            println!("  {diagnostic}");
        }
    }
    println!(
        "Wrote {} and {} to {}",
        generation.artifacts.declaration.name,
        generation.artifacts.definition.name,
        sink.dir().display()
    );

    Ok(())
}
