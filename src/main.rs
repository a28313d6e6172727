use anyhow::Result;
use clap::{Arg, Command};
use std::path::Path;

mod assembler;
mod converter;
mod geometry;
mod osm;
mod pipeline;
mod tags;

fn main() -> Result<()> {
    let matches = Command::new("osm2geojson")
        .version("0.1.0")
        .about("Convert OpenStreetMap elements (JSON lines) to GeoJSON features")
        .arg(
            Arg::new("input")
                .help("Input file with one OSM element per line (stdin if not specified)")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output GeoJSON file (stdout if not specified)"),
        )
        .arg(
            Arg::new("tags")
                .short('t')
                .long("tags")
                .value_name("TAGS")
                .help("Comma-separated list of tag keys to filter (e.g., highway,building)"),
        )
        .arg(
            Arg::new("pretty")
                .short('p')
                .long("pretty")
                .action(clap::ArgAction::SetTrue)
                .help("Pretty-print JSON output"),
        )
        .arg(
            Arg::new("no-parallel")
                .long("no-parallel")
                .action(clap::ArgAction::SetTrue)
                .help("Disable parallel processing and use single-threaded mode"),
        )
        .get_matches();

    let input_path = matches.get_one::<String>("input");
    let output_path = matches.get_one::<String>("output");
    let tag_filter = matches.get_one::<String>("tags");
    let pretty_print = matches.get_flag("pretty");
    let parallel = !matches.get_flag("no-parallel");

    if let Some(path) = input_path
        && !Path::new(path).exists()
    {
        anyhow::bail!("Input file does not exist: {}", path);
    }

    // Parse tag filter supporting both AND (+) and OR (,) logic
    // Format: "tag1+tag2,tag3" means (tag1 AND tag2) OR tag3
    let tag_filter: Vec<Vec<String>> = tag_filter
        .map(|t| {
            t.split(',')
                .map(|group| {
                    group
                        .split('+')
                        .map(|tag| tag.trim().to_string())
                        .collect::<Vec<String>>()
                })
                .collect()
        })
        .unwrap_or_default();

    let options = pipeline::PipelineOptions {
        tag_filter,
        pretty_print,
        parallel,
    };

    let feature_count = pipeline::convert_stream(
        input_path.map(String::as_str),
        output_path.map(String::as_str),
        &options,
    )?;
    eprintln!("Conversion complete. Total features: {feature_count}");

    Ok(())
}
