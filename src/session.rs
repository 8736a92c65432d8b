use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::CommandError;
use crate::journal::Journal;
use crate::meals::nutrition::derive_meal;
use crate::meals::templates::{TemplateDraft, TemplateStore};
use crate::meals::LoggedMeal;
use crate::stats;
use crate::workouts::{Workout, WorkoutDraft};

/// Screens of the client. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Login,
    Register,
    Dashboard,
    Meals,
    Workouts,
    Bmi,
    Profile,
}

impl Screen {
    /// Login and register are the only screens shown without a profile.
    pub fn requires_auth(self) -> bool {
        !matches!(self, Screen::Login | Screen::Register)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
}

/// Form input for the profile editor; every field is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

impl ProfileDraft {
    fn into_profile(self) -> Result<UserProfile, CommandError> {
        if self.name.trim().is_empty() {
            return Err(CommandError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(CommandError::MissingField("email"));
        }
        let age = self.age.ok_or(CommandError::MissingField("age"))?;
        let height_cm = self.height_cm.ok_or(CommandError::MissingField("height_cm"))?;
        let weight_kg = self.weight_kg.ok_or(CommandError::MissingField("weight_kg"))?;
        Ok(UserProfile {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            age,
            height_cm,
            weight_kg,
        })
    }
}

/// The whole client state: current screen, the signed-in profile, both
/// per-session journals and the durable template store. All mutations go
/// through the commands below; nothing else writes these fields.
#[derive(Debug)]
pub struct Session {
    screen: Screen,
    profile: Option<UserProfile>,
    meals: Journal<LoggedMeal>,
    workouts: Journal<Workout>,
    templates: TemplateStore,
}

impl Session {
    pub fn new(templates: TemplateStore) -> Self {
        Self {
            screen: Screen::Login,
            profile: None,
            meals: Journal::new(),
            workouts: Journal::new(),
            templates,
        }
    }

    // --- session lifecycle ---

    /// Mock login: credentials are only checked for presence, and a
    /// placeholder profile is installed for the given email.
    pub fn login(&mut self, email: &str, password: &str) -> Result<(), CommandError> {
        if email.trim().is_empty() {
            return Err(CommandError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(CommandError::MissingField("password"));
        }
        self.profile = Some(UserProfile {
            name: "John Doe".to_string(),
            email: email.trim().to_string(),
            age: 28,
            height_cm: 175.0,
            weight_kg: 75.0,
        });
        self.screen = Screen::Dashboard;
        info!(email = %email.trim(), "logged in");
        Ok(())
    }

    /// Mock registration; differs from login only in the placeholder values
    /// and in taking the display name from the form.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<(), CommandError> {
        if name.trim().is_empty() {
            return Err(CommandError::MissingField("name"));
        }
        if email.trim().is_empty() {
            return Err(CommandError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(CommandError::MissingField("password"));
        }
        self.profile = Some(UserProfile {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            age: 25,
            height_cm: 170.0,
            weight_kg: 70.0,
        });
        self.screen = Screen::Dashboard;
        info!(email = %email.trim(), "registered");
        Ok(())
    }

    /// Drops the profile and both journals and returns to the login screen.
    /// The template store and its file are deliberately left alone.
    pub fn logout(&mut self) {
        self.profile = None;
        self.meals.clear();
        self.workouts.clear();
        self.screen = Screen::Login;
        info!("logged out");
    }

    /// Switches screens. Any screen may be requested from any other; the only
    /// gate is that authenticated screens need a profile.
    pub fn navigate(&mut self, screen: Screen) {
        if screen.requires_auth() && self.profile.is_none() {
            debug!(?screen, "navigation ignored, not signed in");
            return;
        }
        self.screen = screen;
    }

    /// Wholesale profile replacement from the editor form. Only reachable
    /// signed in; the profile screen does not exist for a signed-out session.
    pub fn update_profile(&mut self, draft: ProfileDraft) -> Result<(), CommandError> {
        if self.profile.is_none() {
            return Err(CommandError::NotSignedIn);
        }
        self.profile = Some(draft.into_profile()?);
        Ok(())
    }

    // --- meals ---

    /// Logs `amount_grams` of the template, or re-derives an existing entry in
    /// place when `editing` is set. The entry is a snapshot: template edits
    /// after this point do not touch it.
    pub fn log_meal(
        &mut self,
        template_id: Uuid,
        amount_grams: f64,
        editing: Option<Uuid>,
    ) -> Result<Uuid, CommandError> {
        if !amount_grams.is_finite() || amount_grams <= 0.0 {
            return Err(CommandError::InvalidAmount);
        }
        let template = self
            .templates
            .get(template_id)
            .ok_or(CommandError::UnknownTemplate(template_id))?;

        match editing {
            Some(meal_id) if self.meals.get(meal_id).is_some() => {
                let meal = derive_meal(template, amount_grams, meal_id);
                self.meals.update(meal_id, meal);
                debug!(%meal_id, "meal updated");
                Ok(meal_id)
            }
            _ => {
                let meal = derive_meal(template, amount_grams, Uuid::new_v4());
                let id = meal.id;
                self.meals.add(meal);
                debug!(meal_id = %id, "meal logged");
                Ok(id)
            }
        }
    }

    /// Form prefill for editing a logged meal: the stored source template id
    /// plus the logged amount. `None` when the meal is gone or its template
    /// has since been deleted; the edit action then simply does nothing.
    pub fn meal_edit_prefill(&self, meal_id: Uuid) -> Option<(Uuid, f64)> {
        let meal = self.meals.get(meal_id)?;
        self.templates.get(meal.template_id)?;
        Some((meal.template_id, meal.amount_grams))
    }

    pub fn delete_meal(&mut self, id: Uuid) -> bool {
        self.meals.remove(id)
    }

    // --- workouts ---

    pub fn log_workout(
        &mut self,
        draft: WorkoutDraft,
        editing: Option<Uuid>,
    ) -> Result<Uuid, CommandError> {
        match editing {
            Some(id) if self.workouts.get(id).is_some() => {
                let workout = draft.into_workout(id)?;
                self.workouts.update(id, workout);
                Ok(id)
            }
            _ => {
                let workout = draft.into_workout(Uuid::new_v4())?;
                let id = workout.id;
                self.workouts.add(workout);
                Ok(id)
            }
        }
    }

    pub fn delete_workout(&mut self, id: Uuid) -> bool {
        self.workouts.remove(id)
    }

    // --- templates ---

    pub fn upsert_template(
        &mut self,
        draft: TemplateDraft,
        editing: Option<Uuid>,
    ) -> Result<Uuid, CommandError> {
        self.templates.upsert(draft, editing)
    }

    pub fn remove_template(&mut self, id: Uuid) -> Result<bool, CommandError> {
        self.templates.remove(id)
    }

    // --- reads ---

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_authenticated(&self) -> bool {
        self.profile.is_some()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn meals(&self) -> &[LoggedMeal] {
        self.meals.entries()
    }

    pub fn workouts(&self) -> &[Workout] {
        self.workouts.entries()
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn total_calories(&self) -> i64 {
        stats::total_calories(self.meals.entries())
    }

    pub fn total_workouts(&self) -> usize {
        stats::total_workouts(self.workouts.entries())
    }

    pub fn bmi(&self) -> String {
        stats::bmi_display(self.profile.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_in(dir: &tempfile::TempDir) -> Session {
        Session::new(TemplateStore::open(dir.path().join("meal_templates.json")))
    }

    fn signed_in(dir: &tempfile::TempDir) -> Session {
        let mut session = session_in(dir);
        session.login("john@example.com", "hunter2").expect("login");
        session
    }

    fn chicken(session: &mut Session) -> Uuid {
        session
            .upsert_template(
                TemplateDraft {
                    name: "Chicken Breast".into(),
                    calories_per_100g: Some(165.0),
                    protein_per_100g: Some(31.0),
                    carbs_per_100g: Some(0.0),
                    fat_per_100g: Some(3.6),
                },
                None,
            )
            .expect("template")
    }

    #[test]
    fn starts_signed_out_on_login_screen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = session_in(&dir);
        assert_eq!(session.screen(), Screen::Login);
        assert!(!session.is_authenticated());
        assert_eq!(session.bmi(), "0");
    }

    #[test]
    fn login_installs_placeholder_profile_and_opens_dashboard() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        session.login("jane@example.com", "pw").expect("login");

        let profile = session.profile().expect("profile");
        assert_eq!(profile.name, "John Doe");
        assert_eq!(profile.email, "jane@example.com");
        assert_eq!(profile.age, 28);
        assert_eq!(session.screen(), Screen::Dashboard);
    }

    #[test]
    fn register_uses_the_form_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        session
            .register("Jane", "jane@example.com", "pw")
            .expect("register");
        let profile = session.profile().expect("profile");
        assert_eq!(profile.name, "Jane");
        assert_eq!(profile.age, 25);
        assert_eq!(profile.height_cm, 170.0);
    }

    #[test]
    fn blank_credentials_are_rejected_without_state_change() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        assert!(matches!(
            session.login("", "pw"),
            Err(CommandError::MissingField("email"))
        ));
        assert!(matches!(
            session.login("a@b.c", ""),
            Err(CommandError::MissingField("password"))
        ));
        assert!(!session.is_authenticated());
        assert_eq!(session.screen(), Screen::Login);
    }

    #[test]
    fn navigation_to_authenticated_screens_needs_a_profile() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = session_in(&dir);

        session.navigate(Screen::Dashboard);
        assert_eq!(session.screen(), Screen::Login);
        session.navigate(Screen::Register);
        assert_eq!(session.screen(), Screen::Register);

        session.login("a@b.c", "pw").expect("login");
        session.navigate(Screen::Bmi);
        assert_eq!(session.screen(), Screen::Bmi);
    }

    #[test]
    fn logged_meal_is_a_scaled_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = signed_in(&dir);
        let template_id = chicken(&mut session);

        session.log_meal(template_id, 150.0, None).expect("log");
        let meal = &session.meals()[0];
        assert_eq!(meal.name, "Chicken Breast");
        assert_eq!(meal.calories, 248);
        assert_eq!(meal.protein, 47);
        assert_eq!(meal.carbs, 0);
        assert_eq!(meal.fat, 5);
        assert_eq!(session.total_calories(), 248);
    }

    #[test]
    fn template_edit_does_not_rewrite_logged_meals() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = signed_in(&dir);
        let template_id = chicken(&mut session);
        session.log_meal(template_id, 150.0, None).expect("log");

        session
            .upsert_template(
                TemplateDraft {
                    name: "Chicken Breast (grilled)".into(),
                    calories_per_100g: Some(200.0),
                    ..TemplateDraft::default()
                },
                Some(template_id),
            )
            .expect("edit template");

        let meal = &session.meals()[0];
        assert_eq!(meal.name, "Chicken Breast");
        assert_eq!(meal.calories, 248);
    }

    #[test]
    fn editing_a_meal_re_derives_in_place() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = signed_in(&dir);
        let template_id = chicken(&mut session);

        let first = session.log_meal(template_id, 100.0, None).expect("log");
        session.log_meal(template_id, 50.0, None).expect("log");

        let (prefill_template, prefill_amount) =
            session.meal_edit_prefill(first).expect("prefill");
        assert_eq!(prefill_template, template_id);
        assert_eq!(prefill_amount, 100.0);

        let edited = session
            .log_meal(template_id, 200.0, Some(first))
            .expect("edit");
        assert_eq!(edited, first);
        assert_eq!(session.meals().len(), 2);
        assert_eq!(session.meals()[0].id, first);
        assert_eq!(session.meals()[0].calories, 330);
        assert_eq!(session.meals()[1].calories, 83);
    }

    #[test]
    fn meal_amount_must_be_positive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = signed_in(&dir);
        let template_id = chicken(&mut session);
        for bad in [0.0, -10.0, f64::NAN] {
            assert!(matches!(
                session.log_meal(template_id, bad, None),
                Err(CommandError::InvalidAmount)
            ));
        }
        assert!(session.meals().is_empty());
    }

    #[test]
    fn logging_against_a_deleted_template_fails_cleanly() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = signed_in(&dir);
        let template_id = chicken(&mut session);
        let meal_id = session.log_meal(template_id, 100.0, None).expect("log");
        session.remove_template(template_id).expect("remove");

        assert!(matches!(
            session.log_meal(template_id, 100.0, None),
            Err(CommandError::UnknownTemplate(_))
        ));
        // the already-logged meal is unaffected, but can no longer be edited
        assert_eq!(session.meals().len(), 1);
        assert_eq!(session.meal_edit_prefill(meal_id), None);
    }

    #[test]
    fn delete_meal_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = signed_in(&dir);
        let template_id = chicken(&mut session);
        let meal_id = session.log_meal(template_id, 100.0, None).expect("log");
        assert!(session.delete_meal(meal_id));
        assert!(!session.delete_meal(meal_id));
    }

    #[test]
    fn workout_flow_appends_updates_and_counts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = signed_in(&dir);

        let draft = WorkoutDraft {
            name: "Squat".into(),
            sets: Some(5),
            reps: Some(5),
            duration_min: None,
            calories_burned: Some(220),
        };
        let id = session.log_workout(draft.clone(), None).expect("log");
        assert_eq!(session.total_workouts(), 1);

        let edited = session
            .log_workout(
                WorkoutDraft {
                    sets: Some(3),
                    ..draft
                },
                Some(id),
            )
            .expect("edit");
        assert_eq!(edited, id);
        assert_eq!(session.workouts()[0].sets, 3);
        assert_eq!(session.total_workouts(), 1);
    }

    #[test]
    fn update_profile_replaces_wholesale() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = signed_in(&dir);
        session
            .update_profile(ProfileDraft {
                name: "Jane Doe".into(),
                email: "jane@example.com".into(),
                age: Some(30),
                height_cm: Some(168.0),
                weight_kg: Some(62.0),
            })
            .expect("update");
        let profile = session.profile().expect("profile");
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(session.bmi(), "22.0");

        assert!(matches!(
            session.update_profile(ProfileDraft::default()),
            Err(CommandError::MissingField("name"))
        ));
        assert_eq!(session.profile().expect("profile").name, "Jane Doe");
    }

    #[test]
    fn update_profile_requires_a_signed_in_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        let err = session
            .update_profile(ProfileDraft {
                name: "Jane Doe".into(),
                email: "jane@example.com".into(),
                age: Some(30),
                height_cm: Some(168.0),
                weight_kg: Some(62.0),
            })
            .expect_err("signed-out edit must be rejected");
        assert!(matches!(err, CommandError::NotSignedIn));
        assert!(session.profile().is_none());
    }

    #[test]
    fn logout_clears_session_but_keeps_the_template_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("meal_templates.json");
        let mut session = Session::new(TemplateStore::open(&path));
        session.login("a@b.c", "pw").expect("login");
        let template_id = chicken(&mut session);
        session.log_meal(template_id, 100.0, None).expect("log");
        session
            .log_workout(
                WorkoutDraft {
                    name: "Run".into(),
                    sets: Some(1),
                    reps: Some(1),
                    duration_min: Some(30),
                    calories_burned: Some(300),
                },
                None,
            )
            .expect("log");

        let file_before = std::fs::read_to_string(&path).expect("file");
        session.logout();

        assert!(!session.is_authenticated());
        assert!(session.meals().is_empty());
        assert!(session.workouts().is_empty());
        assert_eq!(session.screen(), Screen::Login);
        assert_eq!(session.templates().list().len(), 1);
        let file_after = std::fs::read_to_string(&path).expect("file");
        assert_eq!(file_before, file_after);

        // a fresh session over the same file still sees the template
        let reopened = Session::new(TemplateStore::open(&path));
        assert_eq!(reopened.templates().list().len(), 1);
    }
}
