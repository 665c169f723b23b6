//! Events Panel State
//!
//! The create/edit/delete state machine behind the Events panel, kept free of
//! DOM and network calls so every transition can be unit tested. The component
//! performs the requests and feeds their outcomes back in; transitions that
//! require follow-up work return an [`Effect`].

use serde::{Deserialize, Serialize};

/// Alert shown when an image upload fails
pub const UPLOAD_FAILED: &str = "Failed to upload image";

/// Confirmation prompt shown before deleting an event
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this event?";

/// An event as returned by `GET /api/events`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    /// RFC 3339 timestamp
    pub date: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Form fields, serialized as the create/update request body
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`, as produced by a date input
    pub date: String,
    pub image_url: String,
}

/// A request the form wants sent
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Create(EventForm),
    Update { id: String, form: EventForm },
}

impl Submission {
    /// HTTP method for the request
    pub fn method(&self) -> &'static str {
        match self {
            Submission::Create(_) => "POST",
            Submission::Update { .. } => "PUT",
        }
    }

    /// Path relative to the API base
    pub fn path(&self) -> String {
        match self {
            Submission::Create(_) => "/api/events".to_string(),
            Submission::Update { id, .. } => format!("/api/events/{}", id),
        }
    }

    /// JSON body
    pub fn form(&self) -> &EventForm {
        match self {
            Submission::Create(form) => form,
            Submission::Update { form, .. } => form,
        }
    }
}

/// Follow-up work requested by a transition
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch the event list again
    Refetch,
    /// Show a blocking alert
    Alert(&'static str),
}

/// State of the Events panel
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventsPanel {
    /// Last successfully fetched list
    pub events: Vec<EventRecord>,
    pub form_open: bool,
    /// Id of the event being edited; `None` means the form creates
    pub editing: Option<String>,
    pub uploading: bool,
    /// A create/update request is in flight
    pub submitting: bool,
    pub form: EventForm,
}

impl EventsPanel {
    /// Replace the list with a freshly fetched one
    pub fn set_events(&mut self, events: Vec<EventRecord>) {
        self.events = events;
    }

    /// Add/Cancel button: flip the form and drop back to create mode
    pub fn toggle_form(&mut self) {
        self.form_open = !self.form_open;
        self.editing = None;
        self.form = EventForm::default();
    }

    /// Open the form pre-filled from an existing event
    pub fn begin_edit(&mut self, event: &EventRecord) {
        self.editing = Some(event.id.clone());
        self.form = EventForm {
            title: event.title.clone(),
            description: event.description.clone(),
            date: date_only(&event.date).to_string(),
            image_url: event.image_url.clone(),
        };
        self.form_open = true;
    }

    /// Start a create or update
    ///
    /// Returns `None` while a previous submission is still in flight.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.submitting {
            return None;
        }
        self.submitting = true;

        let form = self.form.clone();
        Some(match &self.editing {
            Some(id) => Submission::Update {
                id: id.clone(),
                form,
            },
            None => Submission::Create(form),
        })
    }

    /// Apply the outcome of a create or update
    ///
    /// On failure the form stays open and unchanged.
    pub fn finish_submit(&mut self, ok: bool) -> Option<Effect> {
        self.submitting = false;
        if !ok {
            return None;
        }

        self.form = EventForm::default();
        self.form_open = false;
        self.editing = None;
        Some(Effect::Refetch)
    }

    /// Apply the outcome of a delete
    pub fn finish_delete(&self, ok: bool) -> Option<Effect> {
        ok.then_some(Effect::Refetch)
    }

    /// Mark an upload as started
    pub fn begin_upload(&mut self) {
        self.uploading = true;
    }

    /// Apply the outcome of an upload
    pub fn finish_upload(&mut self, result: Result<String, String>) -> Option<Effect> {
        self.uploading = false;
        match result {
            Ok(url) => {
                self.form.image_url = url;
                None
            }
            Err(_) => Some(Effect::Alert(UPLOAD_FAILED)),
        }
    }

    /// Remove the selected image from the form
    pub fn clear_image(&mut self) {
        self.form.image_url.clear();
    }

    /// Only an in-flight submission disables the submit button; uploads just
    /// change the upload label
    pub fn submit_disabled(&self) -> bool {
        self.submitting
    }

    /// The file input is only required until an image is attached
    pub fn image_required(&self) -> bool {
        self.form.image_url.is_empty()
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.form_open {
            "Cancel"
        } else {
            "Add Event"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update Event"
        } else {
            "Create Event"
        }
    }

    pub fn upload_label(&self) -> &'static str {
        if self.uploading {
            "Uploading..."
        } else {
            "Choose Image"
        }
    }

    /// The "no events yet" card is hidden while the form is open
    pub fn show_empty_state(&self) -> bool {
        self.events.is_empty() && !self.form_open
    }
}

/// Strip the time component from a date or timestamp
pub fn date_only(date: &str) -> &str {
    date.split('T').next().unwrap_or(date)
}

/// Long display form of an event date, e.g. "Saturday, November 2, 2024"
pub fn format_event_date(date: &str) -> String {
    chrono::NaiveDate::parse_from_str(date_only(date), "%Y-%m-%d")
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            title: "Retro".to_string(),
            description: "Sprint retro".to_string(),
            date: "2024-05-03T00:00:00Z".to_string(),
            image_url: "/uploads/retro.png".to_string(),
            created_by: Some("ada@example.com".to_string()),
        }
    }

    fn filled_form() -> EventForm {
        EventForm {
            title: "Launch".to_string(),
            description: "v1".to_string(),
            date: "2024-06-01".to_string(),
            image_url: "/uploads/launch.png".to_string(),
        }
    }

    #[test]
    fn test_toggle_flips_form_and_clears_edit_mode() {
        let mut panel = EventsPanel::default();
        panel.begin_edit(&record("e1"));
        assert!(panel.form_open);

        panel.toggle_form();
        assert!(!panel.form_open);
        assert_eq!(panel.editing, None);
        assert_eq!(panel.form, EventForm::default());

        panel.toggle_form();
        assert!(panel.form_open);
        assert_eq!(panel.editing, None);
        assert_eq!(panel.toggle_label(), "Cancel");
        assert_eq!(panel.submit_label(), "Create Event");
    }

    #[test]
    fn test_begin_edit_prefills_and_strips_time() {
        let mut panel = EventsPanel::default();
        panel.begin_edit(&record("e1"));

        assert_eq!(panel.editing.as_deref(), Some("e1"));
        assert_eq!(panel.form.title, "Retro");
        assert_eq!(panel.form.description, "Sprint retro");
        assert_eq!(panel.form.date, "2024-05-03");
        assert_eq!(panel.form.image_url, "/uploads/retro.png");
        assert_eq!(panel.submit_label(), "Update Event");
    }

    #[test]
    fn test_submit_targets_create_or_update() {
        let mut panel = EventsPanel::default();
        panel.toggle_form();
        panel.form = filled_form();

        let create = panel.begin_submit().unwrap();
        assert_eq!(create.method(), "POST");
        assert_eq!(create.path(), "/api/events");
        assert_eq!(create.form(), &filled_form());
        panel.finish_submit(false);

        panel.begin_edit(&record("e9"));
        let update = panel.begin_submit().unwrap();
        assert_eq!(update.method(), "PUT");
        assert_eq!(update.path(), "/api/events/e9");
    }

    #[test]
    fn test_successful_submit_refetches_once_and_resets() {
        let mut panel = EventsPanel::default();
        panel.begin_edit(&record("e1"));
        panel.begin_submit().unwrap();

        assert_eq!(panel.finish_submit(true), Some(Effect::Refetch));
        assert!(!panel.form_open);
        assert!(!panel.submitting);
        assert_eq!(panel.editing, None);
        assert_eq!(panel.form, EventForm::default());
    }

    #[test]
    fn test_failed_submit_keeps_form() {
        let mut panel = EventsPanel::default();
        panel.toggle_form();
        panel.form = filled_form();
        panel.begin_submit().unwrap();

        assert_eq!(panel.finish_submit(false), None);
        assert!(panel.form_open);
        assert_eq!(panel.form, filled_form());
        assert!(!panel.submitting);
    }

    #[test]
    fn test_duplicate_submit_is_ignored() {
        let mut panel = EventsPanel::default();
        panel.toggle_form();

        assert!(panel.begin_submit().is_some());
        assert!(panel.begin_submit().is_none());

        panel.finish_submit(true);
        assert!(panel.begin_submit().is_some());
    }

    #[test]
    fn test_upload_in_progress_does_not_block_submit() {
        let mut panel = EventsPanel::default();
        panel.toggle_form();
        panel.begin_upload();

        assert!(!panel.submit_disabled());
        assert!(panel.begin_submit().is_some());
        assert!(panel.submit_disabled());
    }

    #[test]
    fn test_delete_refetches_only_on_success() {
        let panel = EventsPanel::default();
        assert_eq!(panel.finish_delete(true), Some(Effect::Refetch));
        assert_eq!(panel.finish_delete(false), None);
    }

    #[test]
    fn test_upload_success_sets_image_url() {
        let mut panel = EventsPanel::default();
        panel.toggle_form();
        assert!(panel.image_required());

        panel.begin_upload();
        assert!(panel.uploading);
        assert_eq!(panel.upload_label(), "Uploading...");

        let effect = panel.finish_upload(Ok("/uploads/new.png".to_string()));
        assert_eq!(effect, None);
        assert!(!panel.uploading);
        assert_eq!(panel.form.image_url, "/uploads/new.png");
        assert!(!panel.image_required());
        assert_eq!(panel.upload_label(), "Choose Image");
    }

    #[test]
    fn test_upload_failure_alerts_and_keeps_image_url() {
        let mut panel = EventsPanel::default();
        panel.begin_edit(&record("e1"));
        panel.begin_upload();

        let effect = panel.finish_upload(Err("Upload failed".to_string()));
        assert_eq!(effect, Some(Effect::Alert(UPLOAD_FAILED)));
        assert!(!panel.uploading);
        assert_eq!(panel.form.image_url, "/uploads/retro.png");
    }

    #[test]
    fn test_clear_image() {
        let mut panel = EventsPanel::default();
        panel.begin_edit(&record("e1"));
        panel.clear_image();
        assert!(panel.image_required());
    }

    #[test]
    fn test_empty_state_visibility() {
        let mut panel = EventsPanel::default();
        assert!(panel.show_empty_state());

        panel.toggle_form();
        assert!(!panel.show_empty_state());

        panel.toggle_form();
        panel.set_events(vec![record("e1")]);
        assert!(!panel.show_empty_state());
    }

    #[test]
    fn test_form_serializes_request_body() {
        let json = serde_json::to_value(filled_form()).unwrap();
        assert_eq!(json["title"], "Launch");
        assert_eq!(json["date"], "2024-06-01");
        assert_eq!(json["imageUrl"], "/uploads/launch.png");
    }

    #[test]
    fn test_record_deserializes_without_image() {
        let record: EventRecord = serde_json::from_str(
            r#"{"id":"e1","title":"t","description":"d","date":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(record.image_url, "");
        assert_eq!(record.created_by, None);
    }

    #[test]
    fn test_date_helpers() {
        assert_eq!(date_only("2024-11-02T00:00:00+00:00"), "2024-11-02");
        assert_eq!(date_only("2024-11-02"), "2024-11-02");
        assert_eq!(
            format_event_date("2024-11-02T00:00:00Z"),
            "Saturday, November 2, 2024"
        );
        assert_eq!(format_event_date("garbage"), "garbage");
    }
}
