use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CommandError, PersistError};

/// A reusable food entry with macros per 100 g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTemplate {
    pub id: Uuid,
    pub name: String,
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fat_per_100g: f64,
}

/// Form input for creating or editing a template. Calories are required;
/// the remaining rates default to zero when left blank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateDraft {
    pub name: String,
    pub calories_per_100g: Option<f64>,
    pub protein_per_100g: Option<f64>,
    pub carbs_per_100g: Option<f64>,
    pub fat_per_100g: Option<f64>,
}

/// The one piece of durable state: meal templates, serialized wholesale to a
/// single JSON file on every mutation and loaded back on startup.
#[derive(Debug)]
pub struct TemplateStore {
    path: PathBuf,
    templates: Vec<MealTemplate>,
}

impl TemplateStore {
    /// Opens the store at `path`. A missing file means an empty store;
    /// malformed content is logged and also degrades to empty rather than
    /// taking the whole session down.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let templates = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<MealTemplate>>(&raw) {
                Ok(templates) => templates,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "malformed template file, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "could not read template file, starting empty");
                Vec::new()
            }
        };
        debug!(count = templates.len(), "template store opened");
        Self { path, templates }
    }

    /// Templates in insertion order.
    pub fn list(&self) -> &[MealTemplate] {
        &self.templates
    }

    pub fn get(&self, id: Uuid) -> Option<&MealTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Creates a template from the draft, or replaces the one matching
    /// `editing` in place (same id, same position). Returns the id of the
    /// affected template.
    pub fn upsert(
        &mut self,
        draft: TemplateDraft,
        editing: Option<Uuid>,
    ) -> Result<Uuid, CommandError> {
        if draft.name.trim().is_empty() {
            return Err(CommandError::MissingField("name"));
        }
        let calories = draft
            .calories_per_100g
            .ok_or(CommandError::MissingField("calories_per_100g"))?;

        let slot = editing.and_then(|id| self.templates.iter().position(|t| t.id == id));
        let id = match (editing, slot) {
            (Some(id), Some(_)) => id,
            _ => Uuid::new_v4(),
        };
        let template = MealTemplate {
            id,
            name: draft.name.trim().to_string(),
            calories_per_100g: calories,
            protein_per_100g: draft.protein_per_100g.unwrap_or(0.0),
            carbs_per_100g: draft.carbs_per_100g.unwrap_or(0.0),
            fat_per_100g: draft.fat_per_100g.unwrap_or(0.0),
        };
        let mut next = self.templates.clone();
        match slot {
            Some(i) => next[i] = template,
            None => next.push(template),
        }
        Self::persist(&self.path, &next)?;
        self.templates = next;
        Ok(id)
    }

    /// Removes the template if present and rewrites the file. Unknown ids are
    /// a no-op and do not touch the file.
    pub fn remove(&mut self, id: Uuid) -> Result<bool, CommandError> {
        if !self.templates.iter().any(|t| t.id == id) {
            return Ok(false);
        }
        let mut next = self.templates.clone();
        next.retain(|t| t.id != id);
        Self::persist(&self.path, &next)?;
        self.templates = next;
        Ok(true)
    }

    // The file is written before the in-memory collection is swapped, so a
    // failed write leaves `list()` exactly as it was.
    fn persist(path: &Path, templates: &[MealTemplate]) -> Result<(), PersistError> {
        let raw = serde_json::to_string(templates)?;
        fs::write(path, raw)?;
        Ok(())
    }
}
