use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CommandError;
use crate::journal::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Minutes; the only optional field on the form.
    pub duration_min: Option<u32>,
    pub calories_burned: i64,
}

impl Record for Workout {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Form input for logging or editing a workout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutDraft {
    pub name: String,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub duration_min: Option<u32>,
    pub calories_burned: Option<i64>,
}

impl WorkoutDraft {
    /// Validates required fields and produces the workout under `id`.
    pub fn into_workout(self, id: Uuid) -> Result<Workout, CommandError> {
        if self.name.trim().is_empty() {
            return Err(CommandError::MissingField("name"));
        }
        let sets = self.sets.ok_or(CommandError::MissingField("sets"))?;
        let reps = self.reps.ok_or(CommandError::MissingField("reps"))?;
        let calories_burned = self
            .calories_burned
            .ok_or(CommandError::MissingField("calories_burned"))?;
        Ok(Workout {
            id,
            name: self.name.trim().to_string(),
            sets,
            reps,
            duration_min: self.duration_min,
            calories_burned,
        })
    }
}
