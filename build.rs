// Bakes data/moves.ron into the binary.
//
// Every move entry is serialized with postcard and stored in a perfect hash map keyed by
// the move's discriminant, so lookups at runtime never touch the filesystem.

use schema::MoveTableEntry;
use std::collections::HashSet;
use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=data/moves.ron");

    let source = fs::read_to_string("data/moves.ron")
        .unwrap_or_else(|e| panic!("Failed to read data/moves.ron: {}", e));
    let entries: Vec<MoveTableEntry> = ron::from_str(&source)
        .unwrap_or_else(|e| panic!("Failed to parse data/moves.ron: {}", e));

    let mut seen = HashSet::new();
    let mut map = phf_codegen::Map::new();
    for entry in &entries {
        let key = entry.id as u16;
        if !seen.insert(key) {
            panic!("Duplicate move entry for {:?}", entry.id);
        }

        let bytes = postcard::to_allocvec(&entry.data)
            .unwrap_or_else(|e| panic!("Failed to encode {:?}: {}", entry.id, e));
        let literal = format!(
            "&[{}]",
            bytes
                .iter()
                .map(|b| format!("{}u8", b))
                .collect::<Vec<_>>()
                .join(", ")
        );
        map.entry(key, &literal);
    }

    let out_dir = env::var("OUT_DIR").unwrap_or_else(|e| panic!("OUT_DIR not set: {}", e));
    let path = Path::new(&out_dir).join("move_table.rs");
    let mut file = BufWriter::new(
        File::create(&path).unwrap_or_else(|e| panic!("Failed to create {:?}: {}", path, e)),
    );
    writeln!(
        file,
        "static MOVE_TABLE: phf::Map<u16, &'static [u8]> = {};",
        map.build()
    )
    .unwrap_or_else(|e| panic!("Failed to write {:?}: {}", path, e));
}
