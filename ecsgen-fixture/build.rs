use std::env;
use std::fs;
use std::path::PathBuf;

const SCHEMAS: [&str; 2] = ["schema/game.json", "schema/world.json"];

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    let inputs: Vec<PathBuf> = SCHEMAS.iter().map(|path| manifest_dir.join(path)).collect();
    let generated = out_dir.join("generated");
    ecsgen_codegen::build::generate(&inputs, &generated).expect("schema generation failed");

    // Mounts the output root at `crate::generated`, the default root module.
    let root = generated.join("mod.rs").display().to_string();
    fs::write(
        out_dir.join("schema.rs"),
        format!("#[path = {root:?}]\npub mod generated;\n"),
    )
    .expect("failed to write schema.rs");
}
