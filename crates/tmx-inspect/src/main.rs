//! Prints a summary of a TMX map or TSX tileset.

use std::path::Path;
use std::process::ExitCode;

use clap::{Arg, ArgAction, command};
use log::{LevelFilter, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use tmx::{MapDocument, ReadError, TilesetDocument, read_map_file, read_tileset_file};

fn print_map(map: &MapDocument) {
    println!("\n=== Map ===");
    println!("Size: {}x{} ({} tiles)", map.width, map.height, map.tile_count());

    println!("\n=== Tilesets ({}) ===", map.tilesets.len());
    for tileset in &map.tilesets {
        let source = if tileset.source.is_empty() {
            "(embedded)"
        } else {
            tileset.source.as_str()
        };
        println!("  firstgid {:>6}  {}", tileset.first_gid, source);
    }

    println!("\n=== Layers ({}) ===", map.layers.len());
    for (i, layer) in map.layers.iter().enumerate() {
        match &layer.data {
            Some(data) => {
                let used = data.gids.iter().filter(|&&gid| gid != 0).count();
                println!(
                    "[{}] {:?} {}: {} tiles, {} non-empty",
                    i,
                    layer.name,
                    data.format,
                    data.gids.len(),
                    used
                );
            }
            None => println!("[{}] {:?}: no data", i, layer.name),
        }
    }
}

fn print_tileset(tileset: &TilesetDocument) {
    println!("\n=== Tiles ({}) ===", tileset.tiles.len());
    for tile in &tileset.tiles {
        if tile.tile_type.is_empty() {
            println!("[{}]", tile.id);
        } else {
            println!("[{}] type {:?}", tile.id, tile.tile_type);
        }
        for property in &tile.properties {
            println!(
                "      {} ({}) = {:?}",
                property.name, property.property_type, property.value
            );
        }
    }
}

fn initialize_logging(level: &str) {
    let level = match level {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Off,
    };
    // A second logger would only fail if one is already installed
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn inspect(path: &Path) -> Result<(), ReadError> {
    let is_tileset = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tsx"));
    if is_tileset {
        print_tileset(&read_tileset_file(path)?);
    } else {
        print_map(&read_map_file(path)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = command!()
        .arg(
            Arg::new("file")
                .required(true)
                .help("Map (.tmx) or tileset (.tsx) file to read"),
        )
        .arg(
            Arg::new("loglevel")
                .long("loglevel")
                .default_value("warn")
                .value_parser(["trace", "debug", "info", "warn", "error", "off"])
                .action(ArgAction::Set),
        )
        .get_matches();

    let level = matches
        .get_one::<String>("loglevel")
        .map_or("warn", String::as_str);
    initialize_logging(level);

    let Some(file) = matches.get_one::<String>("file") else {
        return ExitCode::FAILURE;
    };
    let path = Path::new(file);
    info!("reading {}", path.display());

    match inspect(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            ExitCode::FAILURE
        }
    }
}
