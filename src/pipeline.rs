//! Streaming JSON-lines front-end: one complete OSM element per input line,
//! one GeoJSON feature per output line.

use crate::converter::convert;
use crate::osm::OsmElement;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::sync::mpsc;
use std::thread;

const CHANNEL_CAPACITY: usize = 1000;

pub struct PipelineOptions {
    /// OR groups of AND tag patterns; empty means no filtering.
    pub tag_filter: Vec<Vec<String>>,
    pub pretty_print: bool,
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            tag_filter: Vec::new(),
            pretty_print: false,
            parallel: true,
        }
    }
}

/// Convert a JSON-lines element stream from `input_path` (or stdin when
/// `None`) to a feature stream on `output_path` (or stdout when `None`).
/// Returns the number of features written.
pub fn convert_stream(
    input_path: Option<&str>,
    output_path: Option<&str>,
    options: &PipelineOptions,
) -> Result<usize> {
    let reader: Box<dyn BufRead + Send> = match input_path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {path}"))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    // Converted features stream through a bounded channel to a dedicated
    // writer thread so conversion never blocks on output.
    let (tx, rx) = mpsc::sync_channel::<String>(CHANNEL_CAPACITY);
    let output_thread = {
        let output_path = output_path.map(str::to_string);
        thread::spawn(move || -> Result<usize> {
            let mut writer: Box<dyn Write> = match output_path.as_deref() {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("Failed to create output file: {path}"))?;
                    Box::new(BufWriter::new(file))
                }
                None => Box::new(std::io::stdout()),
            };

            let mut feature_count = 0usize;
            while let Ok(json_line) = rx.recv() {
                writeln!(writer, "{json_line}")?;
                feature_count += 1;
                if feature_count % 10000 == 0 {
                    eprintln!("Streamed {feature_count} features");
                }
            }
            writer.flush()?;
            Ok(feature_count)
        })
    };

    let lines = reader.lines();
    if options.parallel {
        lines.par_bridge().try_for_each(|line| -> Result<()> {
            if let Some(json) = convert_line(&line?, options)?
                && tx.send(json).is_err()
            {
                anyhow::bail!("Output thread disconnected");
            }
            Ok(())
        })?;
    } else {
        for line in lines {
            if let Some(json) = convert_line(&line?, options)?
                && tx.send(json).is_err()
            {
                anyhow::bail!("Output thread disconnected");
            }
        }
    }

    // Close the channel to signal completion, then wait for the writer.
    drop(tx);
    output_thread
        .join()
        .map_err(|_| anyhow::anyhow!("Output thread panicked"))?
}

fn convert_line(line: &str, options: &PipelineOptions) -> Result<Option<String>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let element: OsmElement =
        serde_json::from_str(line).context("Failed to parse OSM element record")?;
    if !element.matches_filter(&options.tag_filter) {
        return Ok(None);
    }

    let Some(feature) = convert(&element) else {
        return Ok(None);
    };

    let json = if options.pretty_print {
        serde_json::to_string_pretty(&feature)?
    } else {
        serde_json::to_string(&feature)?
    };
    Ok(Some(json))
}
