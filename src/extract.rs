use crate::config::{PROGRESS_INTERVAL, WRITE_BUFFER_SIZE};
use crate::language::{LanguageModule, RelationDispatcher};
use crate::models::{EntryRelations, PageType};
use crate::pages::WikiReader;
use crate::stats::{ExtractionStats, RelationStats};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct ExtractConfig {
    /// Dump files; each one is read by its own worker
    pub inputs: Vec<String>,
    pub output_dir: String,
    /// Wiktionary edition code selecting the relation headers
    pub language: String,
    /// Maximum number of pages read from each dump
    pub limit: Option<u64>,
    pub dry_run: bool,
}

/// `<output_dir>/<dump name without .xml/.bz2>.relations.jsonl`
pub fn output_path(output_dir: &str, input: &str) -> PathBuf {
    let name = Path::new(input)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dump".to_string());
    let stem = name.strip_suffix(".bz2").unwrap_or(&name);
    let stem = stem.strip_suffix(".xml").unwrap_or(stem);
    Path::new(output_dir).join(format!("{}.relations.jsonl", stem))
}

pub fn run_extraction(config: &ExtractConfig) -> Result<ExtractionStats> {
    let dispatcher = RelationDispatcher::default();
    let module = dispatcher
        .module(&config.language)
        .with_context(|| format!("Cannot extract relations for '{}'", config.language))?;

    if !config.dry_run {
        fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("Failed to create output directory: {}", config.output_dir)
        })?;
    }

    let stats = ExtractionStats::new();
    let pb = ProgressBar::new_spinner();

    info!(
        dumps = config.inputs.len(),
        language = %config.language,
        "Starting relation extraction"
    );

    config
        .inputs
        .par_iter()
        .try_for_each(|input| extract_dump(input, config, module, &stats, &pb))?;

    pb.finish_and_clear();

    info!(
        pages = stats.pages(),
        entries = stats.entries(),
        with_relations = stats.entries_with_relations(),
        "Relation extraction complete"
    );

    Ok(stats)
}

fn extract_dump(
    input: &str,
    config: &ExtractConfig,
    module: &dyn LanguageModule,
    stats: &ExtractionStats,
    pb: &ProgressBar,
) -> Result<()> {
    let mut reader =
        WikiReader::new(input).with_context(|| format!("Failed to open wiki dump at: {}", input))?;

    let out_path = output_path(&config.output_dir, input);
    let mut writer = if config.dry_run {
        None
    } else {
        let file = File::create(&out_path)
            .with_context(|| format!("Failed to create output file: {:?}", out_path))?;
        Some(BufWriter::with_capacity(WRITE_BUFFER_SIZE, file))
    };

    let mut seen: u64 = 0;
    loop {
        if config.limit.is_some_and(|limit| seen >= limit) {
            debug!(input, limit = seen, "Page limit reached");
            break;
        }
        let Some(page) = reader.next() else {
            break;
        };

        let page = page.with_context(|| format!("Failed to parse wiki dump: {}", input))?;
        seen += 1;
        stats.inc_pages();
        if seen % PROGRESS_INTERVAL == 0 {
            pb.tick();
        }

        if let (PageType::Entry, Some(text)) = (&page.page_type, &page.text) {
            stats.inc_entries();
            let relations = module.parse(text);
            stats.add_relations(&RelationStats::of(&relations));

            if !relations.is_empty() {
                if let Some(w) = writer.as_mut() {
                    let record = EntryRelations {
                        id: page.id,
                        title: &page.title,
                        relations: &relations,
                    };
                    serde_json::to_writer(&mut *w, &record)
                        .with_context(|| format!("Failed to write relations of '{}'", page.title))?;
                    w.write_all(b"\n")?;
                }
            }
        }
    }

    let skipped = reader.skipped();
    if skipped > 0 {
        stats.add_skipped(skipped);
        warn!(input, skipped, "Pages without id or title were skipped");
    }

    if let Some(mut w) = writer {
        w.flush()
            .with_context(|| format!("Failed to flush output file: {:?}", out_path))?;
    }

    debug!(input, pages = seen, "Dump finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_strips_dump_suffixes() {
        assert_eq!(
            output_path("out", "/data/ruwiktionary-latest-pages-articles.xml.bz2"),
            Path::new("out").join("ruwiktionary-latest-pages-articles.relations.jsonl")
        );
        assert_eq!(
            output_path("out", "sample.xml"),
            Path::new("out").join("sample.relations.jsonl")
        );
        assert_eq!(
            output_path("out", "plain"),
            Path::new("out").join("plain.relations.jsonl")
        );
    }

    #[test]
    fn unsupported_language_fails_before_reading() {
        let config = ExtractConfig {
            inputs: vec!["/nonexistent/dump.xml".to_string()],
            output_dir: "/nonexistent/out".to_string(),
            language: "xx".to_string(),
            limit: None,
            dry_run: true,
        };
        let err = run_extraction(&config).err().unwrap();
        assert!(format!("{:#}", err).contains("no relation parser registered"));
    }
}
