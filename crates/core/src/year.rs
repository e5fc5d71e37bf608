//! Document year derived from the input file name.
//!
//! Report files are named `<code><delimiter><anything>`, where `<code>` is a
//! two-digit year optionally preceded by a short season tag (`F19`, `SP20`,
//! `19`). The season tag is swapped for the configured century prefix.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::ScanConfig;
use crate::error::Error;

static YEAR_CODE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?P<season>[A-Za-z]{0,2})(?P<yy>\d{2})$").ok());

/// Extract the four-digit year attached to every record of the document.
pub fn document_year(path: &Path, config: &ScanConfig) -> Result<String, Error> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidIdentifier(path.display().to_string()))?;

    year_from_identifier(stem, config)
}

/// Same as [`document_year`], starting from the bare file stem.
pub fn year_from_identifier(identifier: &str, config: &ScanConfig) -> Result<String, Error> {
    let code = identifier
        .split(config.identifier_delimiter.as_str())
        .next()
        .unwrap_or_default()
        .trim();

    let caps = YEAR_CODE.as_ref().and_then(|re| re.captures(code)).ok_or_else(|| {
        Error::InvalidIdentifier(format!(
            "'{identifier}' does not start with a year code such as F19{}",
            config.identifier_delimiter
        ))
    })?;

    Ok(format!("{}{}", config.century_prefix, &caps["yy"]))
}
