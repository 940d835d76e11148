//! OBJ → PBRT converter command-line tool
//!
//! Usage: obj2pbrt input.obj output-prefix
//!
//! Parses the OBJ (and any MTL libraries it references) and writes
//! `output-prefix-geom.pbrt` and `output-prefix-mat.pbrt`.

use std::env;
use std::process;

use log::error;
use mesh_convert::foundation::logging;

fn main() {
    logging::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} input.obj output-prefix", args[0]);
        eprintln!("Writes output-prefix-geom.pbrt and output-prefix-mat.pbrt");
        process::exit(1);
    }

    let input_path = &args[1];
    let prefix = &args[2];

    match mesh_convert::convert(input_path, prefix) {
        Ok(stats) => {
            println!(
                "Converted {}: {} positions, {} faces, {} shapes, {} materials",
                input_path, stats.positions, stats.faces, stats.shapes, stats.materials
            );
            println!("Wrote {}-geom.pbrt and {}-mat.pbrt", prefix, prefix);
        }
        Err(e) => {
            error!("conversion of {} failed: {}", input_path, e);
            process::exit(1);
        }
    }
}
