//! Output writers — trait-based format dispatch.

use crate::error::{Error, Result};
use crate::model::Doclet;

/// Trait for serializing fixed doclets into a specific output format.
pub trait Writer {
    fn write(&self, doclets: &[Doclet]) -> Result<String>;
}

/// Compact JSON array, the shape JSDoc's `-X` dump uses.
pub struct JsonWriter;

/// Indented JSON array.
pub struct PrettyWriter;

/// One JSON object per line.
pub struct LinesWriter;

impl Writer for JsonWriter {
    fn write(&self, doclets: &[Doclet]) -> Result<String> {
        let mut out = serde_json::to_string(doclets)?;
        out.push('\n');
        Ok(out)
    }
}

impl Writer for PrettyWriter {
    fn write(&self, doclets: &[Doclet]) -> Result<String> {
        let mut out = serde_json::to_string_pretty(doclets)?;
        out.push('\n');
        Ok(out)
    }
}

impl Writer for LinesWriter {
    fn write(&self, doclets: &[Doclet]) -> Result<String> {
        let mut out = String::new();
        for doclet in doclets {
            out.push_str(&serde_json::to_string(doclet)?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Create a writer for the given format name.
pub fn create_writer(format: &str) -> Result<Box<dyn Writer>> {
    match format {
        "json" => Ok(Box::new(JsonWriter)),
        "pretty" => Ok(Box::new(PrettyWriter)),
        "lines" | "jsonl" => Ok(Box::new(LinesWriter)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}
