pub mod nutrition;
pub mod templates;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::journal::Record;

/// A meal that has been logged for the day. Macro values are absolute for the
/// logged amount, snapshotted at creation/update time; editing the source
/// template later never rewrites an existing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMeal {
    pub id: Uuid,
    /// Source template, kept so an edit can re-open the right template even
    /// when two templates share a name.
    pub template_id: Uuid,
    pub name: String,
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
    pub amount_grams: f64,
}

impl Record for LoggedMeal {
    fn id(&self) -> Uuid {
        self.id
    }
}
