use std::path::Path;

use dg_core::{AreaConfig, GenError, SectionConfig, TemplateCatalog};
use log::debug;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::mapping::TemplateFile;

/// Room set shipped with the crate
const BUILTIN_ROOMS: &str = include_str!("../data/rooms.json");

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid asset: {0}")]
    Invalid(#[from] GenError),
}

/// Parse a template file from a JSON string.
pub fn parse_candidates(json: &str) -> Result<TemplateCatalog, AssetError> {
    let file: TemplateFile = serde_json::from_str(json)?;
    Ok(file.to_catalog()?)
}

/// Load the room templates a generator may pick from.
pub fn load_candidates<P: AsRef<Path>>(path: P) -> Result<TemplateCatalog, AssetError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let catalog = parse_candidates(&content)?;
    debug!("loaded {} room templates from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// The room set embedded in this crate.
pub fn builtin_catalog() -> Result<TemplateCatalog, AssetError> {
    parse_candidates(BUILTIN_ROOMS)
}

/// Write a catalog back out in the template file format.
pub fn save_candidates<P: AsRef<Path>>(path: P, catalog: &TemplateCatalog) -> Result<(), AssetError> {
    let json = serde_json::to_string_pretty(&TemplateFile::from_catalog(catalog))?;
    std::fs::write(path, json)?;
    Ok(())
}

fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, AssetError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load and validate an area generator config. Missing fields take defaults.
pub fn load_area_config<P: AsRef<Path>>(path: P) -> Result<AreaConfig, AssetError> {
    let config: AreaConfig = load_json(path)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a section generator config. Missing fields take defaults.
pub fn load_section_config<P: AsRef<Path>>(path: P) -> Result<SectionConfig, AssetError> {
    let config: SectionConfig = load_json(path)?;
    config.validate()?;
    Ok(config)
}
