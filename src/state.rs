use crate::{
    api::{HttpStudentBackend, StudentBackend},
    config::RuntimeConfiguration,
    data::student::StudentForm,
    error::{RosterError, RosterResult},
    maud_conveniences::render_nav,
    view::{Confirmation, ManagementView, PendingSubmit},
};
use maud::{DOCTYPE, Markup, html};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Clone, Debug)]
pub struct RosterState {
    config: RuntimeConfiguration,
    backend: Arc<dyn StudentBackend>,
    view: Arc<Mutex<ManagementView>>,
}

impl RosterState {
    pub fn new(config: RuntimeConfiguration) -> RosterResult<Self> {
        let backend = HttpStudentBackend::new(config.backend_config())?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    pub fn with_backend(config: RuntimeConfiguration, backend: Arc<dyn StudentBackend>) -> Self {
        Self {
            config,
            backend,
            view: Arc::new(Mutex::new(ManagementView::new())),
        }
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Roster" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center text-white" {
                    (render_nav())
                    (markup)
                }
            }
        }
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    pub async fn view(&self) -> MutexGuard<'_, ManagementView> {
        self.view.lock().await
    }

    // the view lock is never held while waiting on the backend

    pub async fn load_students(&self) {
        self.view().await.begin_load();
        let result = self.backend.list_students().await;
        self.view().await.finish_load(result);
    }

    /// A fresh page load: starts from a clean console, then loads.
    pub async fn mount(&self) {
        self.view().await.remount();
        self.load_students().await;
    }

    pub async fn create_student(&self, form: StudentForm) {
        let pending = self.view().await.begin_create(form);
        self.send_submit(pending).await;
    }

    pub async fn update_student(&self, raw_id: &str, form: StudentForm) -> RosterResult<()> {
        let pending = self.view().await.begin_update(raw_id, form)?;
        self.send_submit(pending).await;
        Ok(())
    }

    async fn send_submit(&self, pending: Option<PendingSubmit>) {
        let Some(pending) = pending else {
            return;
        };

        let result = match &pending {
            PendingSubmit::Create(payload) => self.backend.register_student(payload).await,
            PendingSubmit::Update(id, payload) => self.backend.update_student(id, payload).await,
        };

        self.view().await.finish_submit(&pending, result);
    }

    pub async fn edit_student(&self, raw_id: &str) -> RosterResult<()> {
        if self.view().await.edit(raw_id) {
            Ok(())
        } else {
            Err(RosterError::MissingStudent { id: raw_id.into() })
        }
    }

    pub async fn cancel_edit(&self) {
        self.view().await.reset_form();
    }

    pub async fn delete_student(
        &self,
        raw_id: &str,
        confirmation: Confirmation,
    ) -> RosterResult<()> {
        let Some(id) = self.view().await.begin_delete(raw_id, confirmation)? else {
            return Ok(());
        };

        let result = self.backend.delete_student(&id).await;
        self.view().await.finish_delete(&id, result);
        Ok(())
    }
}
