use serde::{Deserialize, Serialize};

use dg_core::{GenResult, RoomTemplate, TemplateCatalog};

/// One room as written in a template file.
///
/// Rows are read top to bottom; `.` is ground, `#` is wall and a space
/// leaves the cell empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateDefinition {
    pub name: String,
    pub rows: Vec<String>,
}

/// The root structure of a room template file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TemplateFile {
    pub templates: Vec<TemplateDefinition>,
}

impl TemplateDefinition {
    /// Validate the rows and build the template.
    pub fn to_template(&self) -> GenResult<RoomTemplate> {
        RoomTemplate::from_rows(self.name.clone(), &self.rows)
    }

    /// Inverse of [`TemplateDefinition::to_template`], used when writing files.
    pub fn from_template(template: &RoomTemplate) -> Self {
        let width = template.width().max(1) as usize;
        let rows = template
            .tiles()
            .chunks(width)
            .map(|row| row.iter().map(|t| t.to_ascii()).collect())
            .collect();
        Self {
            name: template.name.clone(),
            rows,
        }
    }
}

impl TemplateFile {
    /// Build the catalog, keeping file order.
    pub fn to_catalog(&self) -> GenResult<TemplateCatalog> {
        let templates = self
            .templates
            .iter()
            .map(TemplateDefinition::to_template)
            .collect::<GenResult<Vec<_>>>()?;
        TemplateCatalog::new(templates)
    }

    pub fn from_catalog(catalog: &TemplateCatalog) -> Self {
        Self {
            templates: catalog
                .templates()
                .iter()
                .map(TemplateDefinition::from_template)
                .collect(),
        }
    }
}
