//! Car save flow: read the dialog, send one request, tell the view what happened

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{FieldSource, FormError, SaveOutcome, SaveRequest};
use crate::infrastructure::api::{ApiError, Transport};

/// The single, generic message shown when the backend refuses a save
pub const SAVE_FAILED_MESSAGE: &str = "Ошибка при сохранении";

/// What the controller is allowed to do to the screen
pub trait ViewHandle {
    fn close_dialog(&mut self);

    /// Drops all client-side state and loads the dashboard again.
    fn reload(&mut self);

    /// Blocking notification the user has to dismiss.
    fn alert(&mut self, message: &str);

    fn show_modal(&mut self, id: &str) {
        self.alert(&format!("Модальное окно {id} будет реализовано"));
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Turns the car dialog into a create or update call.
///
/// Stateless between submissions: nothing prevents two saves from being in
/// flight at once, and each one reconciles the view on its own.
pub struct FormSubmitController<T> {
    transport: T,
}

impl<T: Transport> FormSubmitController<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn dispatch(&self, request: &SaveRequest) -> Result<SaveOutcome, ApiError> {
        info!(method = %request.method(), path = %request.path(), "saving car");
        let status = self.transport.send(request).await?;
        let outcome = SaveOutcome::from_status(status);
        if !outcome.is_saved() {
            warn!(%status, path = %request.path(), "car save rejected");
        }
        Ok(outcome)
    }

    /// [`prepare`], [`Self::dispatch`] and [`reconcile`] in one call, for a
    /// caller that owns both the view and the transport on the same task.
    ///
    /// The TUI splits these steps across the runtime bridge instead: `App`
    /// prepares and reconciles on the UI thread while the worker dispatches.
    /// Transport errors are returned, not alerted.
    pub async fn submit<S, V>(&self, source: &S, view: &mut V) -> Result<SaveOutcome, SubmitError>
    where
        S: FieldSource + ?Sized,
        V: ViewHandle + ?Sized,
    {
        let request = prepare(source)?;
        let outcome = self.dispatch(&request).await?;
        reconcile(outcome, view);
        Ok(outcome)
    }
}

/// Snapshot of the form as it is right now.
pub fn prepare<S: FieldSource + ?Sized>(source: &S) -> Result<SaveRequest, FormError> {
    SaveRequest::from_source(source)
}

/// Applies a finished save to the view.
pub fn reconcile<V: ViewHandle + ?Sized>(outcome: SaveOutcome, view: &mut V) {
    match outcome {
        SaveOutcome::Saved(_) => {
            view.close_dialog();
            view.reload();
        }
        SaveOutcome::Rejected(_) => view.alert(SAVE_FAILED_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    use super::*;
    use crate::domain::CarField;

    type Sent = Arc<Mutex<Vec<SaveRequest>>>;

    struct FakeTransport {
        status: StatusCode,
        sent: Sent,
    }

    /// Controller over a fake backend, plus a handle on what it was sent.
    fn controller_replying(status: StatusCode) -> (FormSubmitController<FakeTransport>, Sent) {
        let sent = Sent::default();
        let transport = FakeTransport {
            status,
            sent: Arc::clone(&sent),
        };
        (FormSubmitController::new(transport), sent)
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: &SaveRequest) -> Result<StatusCode, ApiError> {
            self.sent.lock().unwrap().push(request.clone());
            Ok(self.status)
        }
    }

    #[derive(Default)]
    struct RecordingView {
        closed: usize,
        reloaded: usize,
        alerts: Vec<String>,
    }

    impl ViewHandle for RecordingView {
        fn close_dialog(&mut self) {
            self.closed += 1;
        }

        fn reload(&mut self) {
            self.reloaded += 1;
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }
    }

    fn car_form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        let mut form: HashMap<String, String> = CarField::ALL
            .iter()
            .map(|field| (field.name().to_string(), String::new()))
            .collect();
        for (name, value) in pairs {
            form.insert(name.to_string(), value.to_string());
        }
        form
    }

    #[tokio::test]
    async fn test_new_car_posts_to_collection() {
        let (controller, sent) = controller_replying(StatusCode::CREATED);
        let mut view = RecordingView::default();
        let form = car_form(&[("brand", "Toyota"), ("year", "2020"), ("mileage", "")]);

        controller.submit(&form, &mut view).await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method(), Method::POST);
        assert_eq!(sent[0].path(), "/api/cars");
        assert_eq!(
            serde_json::to_value(&sent[0].record).unwrap(),
            json!({"brand": "Toyota", "year": 2020, "mileage": 0})
        );
    }

    #[tokio::test]
    async fn test_existing_car_puts_to_item() {
        let (controller, sent) = controller_replying(StatusCode::OK);
        let mut view = RecordingView::default();
        let form = car_form(&[("id", "42"), ("engine_volume", "2.0")]);

        controller.submit(&form, &mut view).await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent[0].method(), Method::PUT);
        assert_eq!(sent[0].path(), "/api/cars/42");
        let body = serde_json::to_value(&sent[0].record).unwrap();
        assert_eq!(body["engine_volume"], json!(2.0));
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn test_rejection_alerts_once_and_keeps_dialog() {
        let (controller, _sent) = controller_replying(StatusCode::UNPROCESSABLE_ENTITY);
        let mut view = RecordingView::default();

        let outcome = controller
            .submit(&car_form(&[("brand", "Lada")]), &mut view)
            .await
            .unwrap();

        assert_eq!(outcome, SaveOutcome::Rejected(StatusCode::UNPROCESSABLE_ENTITY));
        assert_eq!(view.alerts, vec![SAVE_FAILED_MESSAGE.to_string()]);
        assert_eq!(view.closed, 0);
        assert_eq!(view.reloaded, 0);
    }

    #[tokio::test]
    async fn test_success_closes_and_reloads_once() {
        let (controller, _sent) = controller_replying(StatusCode::OK);
        let mut view = RecordingView::default();

        controller
            .submit(&car_form(&[("brand", "Lada")]), &mut view)
            .await
            .unwrap();

        assert_eq!(view.closed, 1);
        assert_eq!(view.reloaded, 1);
        assert!(view.alerts.is_empty());
    }

    #[tokio::test]
    async fn test_missing_input_fails_before_sending() {
        let (controller, sent) = controller_replying(StatusCode::OK);
        let mut view = RecordingView::default();
        let mut form = car_form(&[]);
        form.remove("vin");

        let err = controller.submit(&form, &mut view).await.unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Form(FormError::MissingField { field: "vin" })
        ));
        assert!(sent.lock().unwrap().is_empty());
        assert_eq!(view.closed + view.reloaded + view.alerts.len(), 0);
    }

    #[tokio::test]
    async fn test_split_steps_match_one_call_submit() {
        let (controller, sent) = controller_replying(StatusCode::OK);
        let mut view = RecordingView::default();
        let form = car_form(&[("id", "9"), ("year", "2018")]);

        let request = prepare(&form).unwrap();
        let outcome = controller.dispatch(&request).await.unwrap();
        reconcile(outcome, &mut view);

        assert_eq!(outcome, SaveOutcome::Saved(StatusCode::OK));
        assert_eq!(sent.lock().unwrap().as_slice(), &[request]);
        assert_eq!((view.closed, view.reloaded), (1, 1));
    }

    #[test]
    fn test_show_modal_placeholder() {
        let mut view = RecordingView::default();
        view.show_modal("task");
        assert_eq!(view.alerts, vec!["Модальное окно task будет реализовано"]);
    }

    #[test]
    fn test_each_outcome_reconciles_independently() {
        let mut view = RecordingView::default();
        reconcile(SaveOutcome::Saved(StatusCode::OK), &mut view);
        reconcile(SaveOutcome::Rejected(StatusCode::BAD_REQUEST), &mut view);
        reconcile(SaveOutcome::Saved(StatusCode::CREATED), &mut view);
        assert_eq!(view.closed, 2);
        assert_eq!(view.reloaded, 2);
        assert_eq!(view.alerts.len(), 1);
    }
}
