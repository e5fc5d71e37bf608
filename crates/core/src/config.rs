//! Scan geometry and document-identifier settings.
//!
//! Defaults describe the landscape report layout the scanner was built for:
//! a 767pt wide column of text starting 165pt below the top of the page,
//! read in 35pt bands. Any field can be overridden from a TOML file.

use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Left edge of every band, in points from the left of the page.
    pub left: f32,
    /// Right edge of every band.
    pub right: f32,
    /// Top of the first band, in points from the top of the page.
    pub initial_top: f32,
    /// Height of a band and the step between two bands.
    pub band_height: f32,
    /// Upper bound on bands read from one page.
    pub max_bands_per_page: usize,
    /// Replaces the season prefix of the document identifier.
    pub century_prefix: String,
    /// Separates the year code from the rest of the file name.
    pub identifier_delimiter: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            left: 13.0,
            right: 780.0,
            initial_top: 165.0,
            band_height: 35.0,
            max_bands_per_page: 100,
            century_prefix: "20".to_string(),
            identifier_delimiter: "_".to_string(),
        }
    }
}

impl ScanConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        let config: ScanConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.band_height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "band_height must be positive, got {}",
                self.band_height
            )));
        }
        if !(self.left < self.right) {
            return Err(Error::InvalidConfig(format!(
                "left ({}) must be smaller than right ({})",
                self.left, self.right
            )));
        }
        if !(self.initial_top >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "initial_top must not be negative, got {}",
                self.initial_top
            )));
        }
        if self.max_bands_per_page == 0 {
            return Err(Error::InvalidConfig(
                "max_bands_per_page must be at least 1".to_string(),
            ));
        }
        if self.identifier_delimiter.is_empty() {
            return Err(Error::InvalidConfig(
                "identifier_delimiter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
