//! One generic list/edit page for every managed entity.
//!
//! The page owns an in-memory copy of the latest list fetch. It is never
//! patched locally: every successful mutation is followed by a full reload.

use serde_json::Value;
use uni_core::errors::CoreError;
use uni_core::form::{FormMode, FormState};
use uni_core::resource::{ForeignKeyOption, Resource};

use crate::client::ApiClient;
use crate::error::{ApiError, PageError};
use crate::events::{InvalidationBus, Subscription};
use crate::transport::{HttpTransport, Transport};

pub struct EntityPage<R: Resource, T: Transport = HttpTransport> {
    client: ApiClient<T>,
    rows: Option<Vec<R>>,
    parents: Vec<Value>,
    form: Option<FormState>,
    error: Option<String>,
    subscription: Option<Subscription>,
}

impl<R: Resource, T: Transport> EntityPage<R, T> {
    pub const fn new(client: ApiClient<T>) -> Self {
        Self {
            client,
            rows: None,
            parents: Vec::new(),
            form: None,
            error: None,
            subscription: None,
        }
    }

    /// Listen for dataset replacements so [`refresh_if_stale`](Self::refresh_if_stale)
    /// knows when to reload.
    #[must_use]
    pub fn with_bus(mut self, bus: &InvalidationBus) -> Self {
        self.subscription = Some(bus.subscribe());
        self
    }

    /// Latest list, or `None` before a successful load.
    pub fn rows(&self) -> Option<&[R]> {
        self.rows.as_deref()
    }

    /// Page-level error from the last load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    /// Fetch the list and, for child entities, the parent list concurrently.
    /// Both must succeed; otherwise the table is unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Load`] with the first failure as its source.
    pub async fn load(&mut self) -> Result<(), PageError> {
        // Events published before the fetch starts are reflected by it; later
        // ones stay queued for the next refresh.
        if let Some(subscription) = &mut self.subscription {
            subscription.is_stale();
        }

        let fetched: Result<(Vec<R>, Vec<Value>), ApiError> = match R::PARENT {
            Some(parent) => {
                let (own, parents) =
                    tokio::join!(self.client.list::<R>(), self.client.list_raw(parent.path));
                own.and_then(|own| parents.map(|parents| (own, parents)))
            }
            None => self.client.list::<R>().await.map(|own| (own, Vec::new())),
        };

        match fetched {
            Ok((rows, parents)) => {
                tracing::debug!(resource = R::PATH, rows = rows.len(), "page loaded");
                self.rows = Some(rows);
                self.parents = parents;
                self.error = None;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(resource = R::PATH, %error, "page load failed");
                self.rows = None;
                self.parents.clear();
                let error = PageError::Load(error);
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Reload if an upload replaced backend data since the last load.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Load`] if the reload fails.
    pub async fn refresh_if_stale(&mut self) -> Result<bool, PageError> {
        let stale = self
            .subscription
            .as_mut()
            .is_some_and(Subscription::is_stale);
        if stale {
            tracing::info!(resource = R::PATH, "data replaced; reloading");
            self.load().await?;
        }
        Ok(stale)
    }

    /// Parent rows as select options.
    pub fn foreign_key_options(&self) -> Vec<ForeignKeyOption> {
        R::PARENT.map_or_else(Vec::new, |parent| parent.options(&self.parents))
    }

    fn find(&self, id: i64) -> Result<&R, CoreError> {
        self.rows
            .iter()
            .flatten()
            .find(|row| row.id() == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: R::LABEL.to_string(),
                id,
            })
    }

    /// Open an empty form with field defaults.
    pub fn open_create(&mut self) -> &mut FormState {
        self.form.insert(FormState::for_create::<R>())
    }

    /// Open a form pre-filled from a loaded record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if the id is not in the loaded list.
    pub fn open_edit(&mut self, id: i64) -> Result<&mut FormState, PageError> {
        let form = FormState::for_edit(self.find(id)?)?;
        Ok(self.form.insert(form))
    }

    /// Set one field of the open form.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NoForm`] or [`CoreError::UnknownField`].
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), PageError> {
        let form = self.form.as_mut().ok_or(PageError::NoForm)?;
        form.set(field, value)?;
        Ok(())
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Validate, save, reload once, and close the form.
    ///
    /// Validation failures make no request. A failed save keeps the form
    /// open. A failed reload after a successful save is reported through
    /// [`error`](Self::error), not as a save failure.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Form`] for blank required fields or bad values,
    /// and [`PageError::Save`] when the backend rejects the record.
    pub async fn submit(&mut self) -> Result<R, PageError> {
        let form = self.form.as_ref().ok_or(PageError::NoForm)?;
        let payload = form.payload()?;
        let mode = form.mode();

        let saved = match mode {
            FormMode::Edit { id } => self.client.update::<R>(id, payload).await,
            FormMode::Create => self.client.create::<R>(payload).await,
        }
        .map_err(PageError::Save)?;

        self.form = None;
        if let Err(error) = self.load().await {
            tracing::warn!(resource = R::PATH, %error, "reload after save failed");
        }
        Ok(saved)
    }

    /// Delete after confirmation, then reload.
    ///
    /// `confirm` sees the record first; declining makes no request and
    /// returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] for an id not in the list and
    /// [`PageError::Delete`] when the backend refuses.
    pub async fn delete(
        &mut self,
        id: i64,
        confirm: impl FnOnce(&R) -> bool,
    ) -> Result<bool, PageError> {
        if !confirm(self.find(id)?) {
            tracing::debug!(resource = R::PATH, id, "delete declined");
            return Ok(false);
        }
        self.client
            .delete::<R>(id)
            .await
            .map_err(PageError::Delete)?;
        if let Err(error) = self.load().await {
            tracing::warn!(resource = R::PATH, %error, "reload after delete failed");
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::events::DataEvent;
    use crate::mock::MockTransport;
    use crate::transport::Method;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uni_auth::SessionContext;
    use uni_core::entities::{College, DepartmentKpi, Student};

    const STUDENTS: &str = "/dashboard/students/";
    const DEPARTMENTS: &str = "/dashboard/departments/";
    const KPIS: &str = "/dashboard/kpis/";
    const COLLEGES: &str = "/dashboard/colleges/";

    fn student_row(id: i64, name: &str) -> Value {
        json!({
            "id": id, "student_id_number": format!("2024{id:03}"), "name": name,
            "department": 1, "department_name": "Physics",
            "program_level": "학사", "status": "재학"
        })
    }

    fn page_with(mock: MockTransport) -> EntityPage<Student, MockTransport> {
        EntityPage::new(ApiClient::new(mock, SessionContext::in_memory()))
    }

    fn transport(page: &EntityPage<Student, MockTransport>) -> &MockTransport {
        page.client.transport()
    }

    fn seeded() -> MockTransport {
        let mock = MockTransport::new();
        mock.reply(Method::Get, STUDENTS, 200, json!([student_row(1, "Kim")]));
        mock.reply(
            Method::Get,
            DEPARTMENTS,
            200,
            json!([{"id": 1, "college": 1, "college_name": "Science", "name": "Physics"}]),
        );
        mock
    }

    #[tokio::test]
    async fn load_fetches_own_and_parent_lists() {
        let mut page = page_with(seeded());
        page.load().await.unwrap();

        assert_eq!(page.rows().unwrap().len(), 1);
        assert_eq!(
            page.foreign_key_options(),
            vec![ForeignKeyOption {
                id: 1,
                label: "Science - Physics".into()
            }]
        );
    }

    #[tokio::test]
    async fn parent_failure_fails_the_whole_load() {
        let mock = MockTransport::new();
        mock.reply(Method::Get, STUDENTS, 200, json!([student_row(1, "Kim")]));
        mock.reply(Method::Get, DEPARTMENTS, 500, json!({}));
        let mut page = page_with(mock);

        let err = page.load().await.unwrap_err();
        assert_eq!(err.to_string(), "failed to load data");
        assert!(page.rows().is_none());
        assert_eq!(page.error(), Some("failed to load data"));
    }

    #[tokio::test]
    async fn college_page_has_no_parent_request() {
        let mock = MockTransport::new();
        mock.reply(Method::Get, "/dashboard/colleges/", 200, json!([]));
        let mut page: EntityPage<College, MockTransport> =
            EntityPage::new(ApiClient::new(mock, SessionContext::in_memory()));
        page.load().await.unwrap();
        assert_eq!(page.client.transport().requests().len(), 1);
        assert!(page.foreign_key_options().is_empty());
    }

    #[tokio::test]
    async fn blank_required_fields_block_submit_without_request() {
        let mut page = page_with(seeded());
        page.load().await.unwrap();
        page.open_create();
        page.set_field("name", "Lee").unwrap();

        let err = page.submit().await.unwrap_err();
        assert!(matches!(
            err,
            PageError::Form(CoreError::MissingFields { .. })
        ));
        assert!(err.to_string().contains("student_id_number"));
        assert!(page.form().is_some(), "form stays open");
        assert_eq!(transport(&page).count(Method::Post, STUDENTS), 0);
    }

    #[tokio::test]
    async fn create_refetches_once_and_closes_form() {
        let mock = seeded();
        mock.reply(Method::Post, STUDENTS, 201, student_row(2, "Lee"));
        let mut page = page_with(mock);
        page.load().await.unwrap();

        page.open_create();
        page.set_field("student_id_number", "2024002").unwrap();
        page.set_field("name", "Lee").unwrap();
        page.set_field("department", "1").unwrap();
        let saved = page.submit().await.unwrap();

        assert_eq!(saved.id, 2);
        assert!(page.form().is_none());
        assert_eq!(transport(&page).count(Method::Get, STUDENTS), 2);
        let post = transport(&page)
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Post)
            .unwrap();
        let body = post.json.unwrap();
        assert_eq!(body["program_level"], json!("학사"));
        assert_eq!(body["grade"], Value::Null);
        assert_eq!(body["admission_year"], Value::Null);
    }

    #[tokio::test]
    async fn edit_uses_put_on_record_path() {
        let mock = seeded();
        mock.reply(
            Method::Put,
            "/dashboard/students/1/",
            200,
            student_row(1, "Kim Minsu"),
        );
        let mut page = page_with(mock);
        page.load().await.unwrap();

        let form = page.open_edit(1).unwrap();
        assert_eq!(form.get("name"), Some("Kim"));
        page.set_field("name", "Kim Minsu").unwrap();
        page.submit().await.unwrap();
        assert_eq!(
            transport(&page).count(Method::Put, "/dashboard/students/1/"),
            1
        );
    }

    #[tokio::test]
    async fn failed_save_keeps_form_open() {
        let mock = seeded();
        mock.reply(
            Method::Post,
            STUDENTS,
            400,
            json!({"student_id_number": ["already exists"]}),
        );
        let mut page = page_with(mock);
        page.load().await.unwrap();
        page.open_create();
        page.set_field("student_id_number", "2024001").unwrap();
        page.set_field("name", "Dup").unwrap();
        page.set_field("department", "1").unwrap();

        let err = page.submit().await.unwrap_err();
        assert_eq!(err.to_string(), "save failed");
        assert!(page.form().is_some());
        assert_eq!(transport(&page).count(Method::Get, STUDENTS), 1);
    }

    #[tokio::test]
    async fn declined_delete_makes_no_request() {
        let mut page = page_with(seeded());
        page.load().await.unwrap();

        let deleted = page.delete(1, |_| false).await.unwrap();
        assert!(!deleted);
        assert_eq!(transport(&page).count(Method::Delete, "/dashboard/students/1/"), 0);
        assert_eq!(page.rows().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn refused_delete_reports_dependents() {
        let mock = seeded();
        mock.reply(Method::Delete, "/dashboard/students/1/", 409, json!({}));
        let mut page = page_with(mock);
        page.load().await.unwrap();

        let err = page.delete(1, |row| row.name == "Kim").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "delete failed, check for dependent records"
        );
    }

    #[tokio::test]
    async fn confirmed_delete_reloads() {
        let mock = seeded();
        mock.reply(Method::Delete, "/dashboard/students/1/", 204, Value::Null);
        let mut page = page_with(mock);
        page.load().await.unwrap();

        assert!(page.delete(1, |_| true).await.unwrap());
        assert_eq!(transport(&page).count(Method::Get, STUDENTS), 2);
    }

    #[tokio::test]
    async fn kpi_blank_numbers_are_null() {
        let mock = MockTransport::new();
        mock.reply(Method::Get, KPIS, 200, json!([]));
        mock.reply(Method::Get, DEPARTMENTS, 200, json!([]));
        mock.reply(
            Method::Post,
            KPIS,
            201,
            json!({"id": 1, "department": 1, "evaluation_year": 2024}),
        );
        let mut page: EntityPage<DepartmentKpi, MockTransport> =
            EntityPage::new(ApiClient::new(mock, SessionContext::in_memory()));
        page.load().await.unwrap();
        page.open_create();
        page.set_field("department", "1").unwrap();
        page.set_field("evaluation_year", "2024").unwrap();
        page.set_field("employment_rate", "").unwrap();
        page.submit().await.unwrap();

        let post = page
            .client
            .transport()
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Post)
            .unwrap();
        let body = post.json.unwrap();
        assert_eq!(body["employment_rate"], Value::Null);
        assert_eq!(body["full_time_faculty_count"], Value::Null);
        assert_eq!(body["evaluation_year"], json!(2024));
    }

    #[tokio::test]
    async fn dataset_replacement_triggers_reload() {
        let bus = InvalidationBus::new();
        let mut page = page_with(seeded()).with_bus(&bus);
        page.load().await.unwrap();
        assert!(!page.refresh_if_stale().await.unwrap());

        bus.publish(DataEvent::DatasetReplaced);
        assert!(page.refresh_if_stale().await.unwrap());
        assert_eq!(transport(&page).count(Method::Get, STUDENTS), 2);
        assert!(!page.refresh_if_stale().await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn replacement_during_load_is_kept_for_next_refresh() {
        let mock = MockTransport::new();
        mock.reply_after(
            Method::Get,
            COLLEGES,
            Duration::from_millis(300),
            200,
            json!([{"id": 1, "name": "Old"}]),
        );
        mock.reply(Method::Get, COLLEGES, 200, json!([{"id": 1, "name": "New"}]));
        let bus = InvalidationBus::new();
        let mut page: EntityPage<College, MockTransport> =
            EntityPage::new(ApiClient::new(mock, SessionContext::in_memory())).with_bus(&bus);

        let publisher = bus.clone();
        let publish = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            publisher.publish(DataEvent::DatasetReplaced)
        });
        page.load().await.unwrap();
        assert_eq!(publish.await.unwrap(), 1);
        assert_eq!(page.rows().unwrap()[0].name, "Old");

        assert!(page.refresh_if_stale().await.unwrap());
        assert_eq!(page.rows().unwrap()[0].name, "New");
        assert!(!page.refresh_if_stale().await.unwrap());
    }
}
