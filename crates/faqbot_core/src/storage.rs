use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::corpus::Corpus;
use crate::error::Result;
use crate::model::{FaqEntry, SynonymRule};

pub fn save_entries_jsonl(path: &Path, entries: &[FaqEntry]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for entry in entries {
        serde_json::to_writer(&mut writer, entry)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

pub fn load_entries_jsonl(path: &Path) -> Result<Vec<FaqEntry>> {
    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        entries.push(serde_json::from_str(&line)?);
    }

    Ok(entries)
}

pub fn save_synonyms_json(path: &Path, rules: &[SynonymRule]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, rules)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn load_synonyms_json(path: &Path) -> Result<Vec<SynonymRule>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Loads and validates a corpus from an entries file and a synonyms file.
pub fn load_corpus(entries: &Path, synonyms: &Path) -> Result<Corpus> {
    Corpus::new(load_entries_jsonl(entries)?, load_synonyms_json(synonyms)?)
}
