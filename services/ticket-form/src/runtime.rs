//! Form event loop
//!
//! Owns the [`TicketForm`] and applies events one at a time, the way a UI
//! dispatch queue would. Clipboard writes, the copied-marker timer and the
//! intake request run as detached tasks that post their completion back into
//! the queue, so a slow clipboard or intake never holds up edits.

use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;

use shared::errors::ServiceError;

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::domain::{CopyTarget, IntakeReceipt};
use crate::errors::FormError;
use crate::form::TicketForm;
use crate::intake_client::TicketIntake;
use crate::render::FormView;
use crate::surface;

#[derive(Debug)]
pub enum FormEvent {
    IncrementTickets,
    DecrementTickets,
    FullName(String),
    PhoneLocalNumber(String),
    OperatorPrefix(String),
    PaymentReference(String),
    Bank(String),
    BankQuery(String),
    Copy(CopyTarget),
    Submit,
    Copied(CopyTarget),
    CopiedMarkerExpired,
    SubmissionSettled(Result<IntakeReceipt, FormError>),
    Quit,
}

/// Cloneable sender for feeding events into a [`FormRuntime`]
#[derive(Debug, Clone)]
pub struct FormHandle {
    tx: mpsc::UnboundedSender<FormEvent>,
}

impl FormHandle {
    /// Returns false once the runtime is gone
    pub fn send(&self, event: FormEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

pub struct FormRuntime {
    config: Arc<Config>,
    form: TicketForm,
    field_errors: Vec<ServiceError>,
    clipboard: Arc<dyn Clipboard>,
    intake: Arc<dyn TicketIntake>,
    tx: mpsc::UnboundedSender<FormEvent>,
    rx: mpsc::UnboundedReceiver<FormEvent>,
}

impl FormRuntime {
    pub fn new(config: Config, clipboard: Arc<dyn Clipboard>, intake: Arc<dyn TicketIntake>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            form: TicketForm::new(config.raffle.unit_price),
            config: Arc::new(config),
            field_errors: Vec::new(),
            clipboard,
            intake,
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> FormHandle {
        FormHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn form(&self) -> &TicketForm {
        &self.form
    }

    /// Errors from the last rejected submit, cleared by the next edit
    pub fn field_errors(&self) -> &[ServiceError] {
        &self.field_errors
    }

    pub fn view(&self) -> FormView<'_> {
        FormView::new(&self.form, &self.config).with_field_errors(&self.field_errors)
    }

    /// Wait for the next queued event
    pub async fn next_event(&mut self) -> Option<FormEvent> {
        self.rx.recv().await
    }

    /// Render, then apply events until `Quit`, rendering after each one
    pub async fn run<F>(mut self, mut render: F) -> TicketForm
    where
        F: FnMut(FormView<'_>),
    {
        render(self.view());

        while let Some(event) = self.next_event().await {
            if self.dispatch(event).await.is_break() {
                break;
            }
            render(self.view());
        }

        self.form
    }

    pub async fn dispatch(&mut self, event: FormEvent) -> ControlFlow<()> {
        match event {
            FormEvent::IncrementTickets => self.form.increment_ticket_count(),
            FormEvent::DecrementTickets => self.form.decrement_ticket_count(),
            FormEvent::FullName(raw) => {
                self.field_errors.clear();
                self.form.set_full_name(&raw);
            }
            FormEvent::PhoneLocalNumber(raw) => {
                self.field_errors.clear();
                self.form.set_phone_local_number(&raw);
            }
            FormEvent::PaymentReference(raw) => {
                self.field_errors.clear();
                self.form.set_payment_reference(&raw);
            }
            FormEvent::OperatorPrefix(value) => {
                let result = self.form.set_operator_prefix(&value);
                self.record_selection(result);
            }
            FormEvent::Bank(id) => {
                let result = self.form.set_selected_bank(&id);
                self.record_selection(result);
            }
            FormEvent::BankQuery(query) => self.form.set_bank_query(&query),
            FormEvent::Copy(target) => self.copy_to_clipboard(target),
            FormEvent::Copied(target) => {
                self.form.mark_copied(target);

                // every copy schedules its own clear
                let tx = self.tx.clone();
                let delay = self.config.ui.copy_feedback;
                tokio::spawn(async move {
                    sleep(delay).await;
                    let _ = tx.send(FormEvent::CopiedMarkerExpired);
                });
            }
            FormEvent::CopiedMarkerExpired => self.form.clear_copied_marker(),
            FormEvent::Submit => self.submit(),
            FormEvent::SubmissionSettled(outcome) => {
                let label = if outcome.is_ok() { "success" } else { "failure" };
                metrics::counter!("ticket_submissions_total", "outcome" => label).increment(1);
                self.form.finish_submission(&outcome);
            }
            FormEvent::Quit => {
                if self.form.submission_in_progress() {
                    warn!("Leaving the form with a submission still in flight");
                }
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    fn record_selection(&mut self, result: crate::errors::Result<()>) {
        self.field_errors.clear();
        if let Err(e) = result {
            let error = e.to_service_error();
            log_service_error(&error, "Selection rejected");
            self.field_errors.push(error);
        }
    }

    fn copy_text(&self, target: CopyTarget) -> Option<String> {
        let payee = &self.config.payee;
        let text = match target {
            CopyTarget::Total => return Some(self.form.total_price().to_string()),
            CopyTarget::PayeePhone => &payee.phone,
            CopyTarget::PayeeIdDocument => &payee.id_document,
            CopyTarget::PayeeBank => &payee.bank,
        };
        Some(text.trim().to_string()).filter(|t| !t.is_empty())
    }

    fn copy_to_clipboard(&self, target: CopyTarget) {
        let Some(text) = self.copy_text(target) else {
            debug!(?target, "Nothing to copy");
            return;
        };

        let clipboard = self.clipboard.clone();
        let tx = self.tx.clone();

        tokio::spawn(
            async move {
                match clipboard.write_text(&text).await {
                    Ok(()) => {
                        metrics::counter!("clipboard_copies_total", "outcome" => "success").increment(1);
                        let _ = tx.send(FormEvent::Copied(target));
                    }
                    Err(e) => {
                        metrics::counter!("clipboard_copies_total", "outcome" => "failure").increment(1);
                        log_service_error(&e.to_service_error(), "Clipboard write failed");
                    }
                }
            }
            .instrument(tracing::debug_span!("copy_to_clipboard", ?target)),
        );
    }

    fn submit(&mut self) {
        if let Err(errors) = surface::check(&self.form) {
            warn!(
                rejected_fields = errors.len(),
                codes = ?errors.iter().map(|e| e.code.as_str()).collect::<Vec<_>>(),
                "Submit blocked by required fields"
            );
            self.field_errors = errors;
            return;
        }
        self.field_errors.clear();

        let Some(payload) = self.form.begin_submission() else {
            debug!("Submission already in flight");
            return;
        };

        let submission_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "submit_tickets",
            %submission_id,
            tickets = payload.tickets,
            total = %payload.total,
            elapsed_ms = tracing::field::Empty
        );

        let intake = self.intake.clone();
        let floor = self.config.ui.submission_floor;
        let tx = self.tx.clone();

        tokio::spawn(
            async move {
                let started = Instant::now();
                let outcome = intake.submit(&payload).await;
                tracing::Span::current().record("elapsed_ms", started.elapsed().as_millis() as u64);

                match &outcome {
                    Ok(_) => info!("Ticket purchase submitted"),
                    Err(e) => log_service_error(&e.to_service_error(), "Ticket purchase submission failed"),
                }

                // fast round trips are padded up to the floor, slow ones are not delayed
                sleep_until(started + floor).await;
                let _ = tx.send(FormEvent::SubmissionSettled(outcome));
            }
            .instrument(span),
        );
    }
}

/// Log at the level the error's category calls for
fn log_service_error(error: &ServiceError, message: &str) {
    match error.category.log_level() {
        "warn" => warn!(error_code = %error.code, error = %error, "{}", message),
        _ => error!(error_code = %error.code, error = %error, "{}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::domain::{NoticeKind, SubmissionPayload};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Mutex;

    /// Intake double that answers after a fixed delay
    struct FakeIntake {
        delay: Duration,
        fail: bool,
        received: Mutex<Vec<SubmissionPayload>>,
    }

    impl FakeIntake {
        fn new(delay: Duration, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                delay,
                fail,
                received: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TicketIntake for FakeIntake {
        async fn submit(&self, payload: &SubmissionPayload) -> crate::errors::Result<IntakeReceipt> {
            self.received.lock().await.push(payload.clone());
            sleep(self.delay).await;
            if self.fail {
                return Err(FormError::Rejected(502));
            }
            Ok(IntakeReceipt(serde_json::json!({ "status": "received" })))
        }
    }

    fn runtime(clipboard: Arc<MemoryClipboard>, intake: Arc<FakeIntake>) -> FormRuntime {
        let mut config = Config::with_intake_url("http://intake.test/tickets");
        config.payee.phone = "04121112233".to_string();
        FormRuntime::new(config, clipboard, intake)
    }

    /// Paused-clock timers land on the millisecond tick at or after the deadline
    fn assert_elapsed(since: Instant, expected_ms: u64) {
        let elapsed = since.elapsed();
        assert!(elapsed >= Duration::from_millis(expected_ms), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(expected_ms + 5), "{:?}", elapsed);
    }

    async fn fill(runtime: &mut FormRuntime) {
        for event in [
            FormEvent::FullName("Juan Pérez".into()),
            FormEvent::PhoneLocalNumber("1234567".into()),
            FormEvent::PaymentReference("654321".into()),
        ] {
            runtime.dispatch(event).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_total_marker_clears_after_two_seconds() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let mut runtime = runtime(clipboard.clone(), FakeIntake::new(Duration::ZERO, false));

        runtime.dispatch(FormEvent::IncrementTickets).await;
        runtime.dispatch(FormEvent::IncrementTickets).await;
        runtime.dispatch(FormEvent::Copy(CopyTarget::Total)).await;
        assert!(runtime.form().copied_marker().is_none());

        let event = runtime.next_event().await.unwrap();
        assert!(matches!(event, FormEvent::Copied(CopyTarget::Total)));
        runtime.dispatch(event).await;

        assert_eq!(clipboard.last().await.as_deref(), Some("300.00"));
        assert_eq!(runtime.form().copied_marker(), Some(CopyTarget::Total));

        let copied_at = Instant::now();
        let event = runtime.next_event().await.unwrap();
        assert!(matches!(event, FormEvent::CopiedMarkerExpired));
        assert_elapsed(copied_at, 2_000);

        runtime.dispatch(event).await;
        assert!(runtime.form().copied_marker().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_copies_last_write_wins() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let mut runtime = runtime(clipboard.clone(), FakeIntake::new(Duration::ZERO, false));

        runtime.dispatch(FormEvent::Copy(CopyTarget::Total)).await;
        let event = runtime.next_event().await.unwrap();
        runtime.dispatch(event).await;

        sleep(Duration::from_millis(1_500)).await;
        runtime.dispatch(FormEvent::Copy(CopyTarget::PayeePhone)).await;
        let event = runtime.next_event().await.unwrap();
        assert!(matches!(event, FormEvent::Copied(CopyTarget::PayeePhone)));
        runtime.dispatch(event).await;
        assert_eq!(runtime.form().copied_marker(), Some(CopyTarget::PayeePhone));

        // the first copy's timer still fires and clears the newer marker
        let event = runtime.next_event().await.unwrap();
        runtime.dispatch(event).await;
        assert!(runtime.form().copied_marker().is_none());

        // the second timer fires too
        let event = runtime.next_event().await.unwrap();
        assert!(matches!(event, FormEvent::CopiedMarkerExpired));
        assert_eq!(clipboard.writes().await, vec!["100.00", "04121112233"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_of_unset_payee_field_is_skipped() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let mut runtime = runtime(clipboard.clone(), FakeIntake::new(Duration::ZERO, false));

        runtime.dispatch(FormEvent::Copy(CopyTarget::PayeeBank)).await;
        assert!(runtime.form().copied_marker().is_none());
        assert!(clipboard.writes().await.is_empty());
    }

    /// Clipboard whose writes never finish
    struct StuckClipboard;

    #[async_trait]
    impl Clipboard for StuckClipboard {
        async fn write_text(&self, _text: &str) -> crate::errors::Result<()> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_clipboard_does_not_block_events() {
        let config = Config::with_intake_url("http://intake.test/tickets");
        let runtime = FormRuntime::new(config, Arc::new(StuckClipboard), FakeIntake::new(Duration::ZERO, false));
        let handle = runtime.handle();
        handle.send(FormEvent::Copy(CopyTarget::Total));
        handle.send(FormEvent::IncrementTickets);
        handle.send(FormEvent::Quit);

        let form = tokio::time::timeout(Duration::from_secs(60), runtime.run(|_| {}))
            .await
            .expect("event loop stalled behind the clipboard write");
        assert_eq!(form.ticket_count().get(), 2);
        assert!(form.copied_marker().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_copy_sets_no_marker() {
        let config = Config::with_intake_url("http://intake.test/tickets");
        let mut runtime = FormRuntime::new(
            config,
            crate::clipboard::from_command(None),
            FakeIntake::new(Duration::ZERO, false),
        );
        let handle = runtime.handle();

        runtime.dispatch(FormEvent::Copy(CopyTarget::Total)).await;
        sleep(Duration::from_millis(10)).await;
        handle.send(FormEvent::IncrementTickets);

        // the failed write posts nothing, so the next event is the edit
        let event = runtime.next_event().await.unwrap();
        assert!(matches!(event, FormEvent::IncrementTickets));
        runtime.dispatch(event).await;
        assert!(runtime.form().copied_marker().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_submission_is_padded_to_floor() {
        let intake = FakeIntake::new(Duration::from_millis(300), false);
        let mut runtime = runtime(Arc::new(MemoryClipboard::new()), intake.clone());
        fill(&mut runtime).await;

        let started = Instant::now();
        runtime.dispatch(FormEvent::Submit).await;
        assert!(runtime.form().submission_in_progress());

        let event = runtime.next_event().await.unwrap();
        assert!(matches!(event, FormEvent::SubmissionSettled(Ok(_))));
        assert_elapsed(started, 2_000);

        runtime.dispatch(event).await;
        assert!(!runtime.form().submission_in_progress());
        assert_eq!(runtime.form().notice().unwrap().kind, NoticeKind::Confirmation);

        let received = intake.received.lock().await;
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].phone, "04141234567");
        assert_eq!(received[0].total.to_string(), "100.00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_submission_is_not_delayed_further() {
        let intake = FakeIntake::new(Duration::from_millis(5_000), true);
        let mut runtime = runtime(Arc::new(MemoryClipboard::new()), intake);
        fill(&mut runtime).await;

        let started = Instant::now();
        runtime.dispatch(FormEvent::Submit).await;

        let event = runtime.next_event().await.unwrap();
        assert!(matches!(event, FormEvent::SubmissionSettled(Err(_))));
        assert_elapsed(started, 5_000);

        runtime.dispatch(event).await;
        assert!(!runtime.form().submission_in_progress());
        assert_eq!(runtime.form().notice().unwrap().kind, NoticeKind::Failure);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_while_in_flight_is_ignored() {
        let intake = FakeIntake::new(Duration::from_millis(100), false);
        let mut runtime = runtime(Arc::new(MemoryClipboard::new()), intake.clone());
        fill(&mut runtime).await;

        runtime.dispatch(FormEvent::Submit).await;
        runtime.dispatch(FormEvent::Submit).await;

        let event = runtime.next_event().await.unwrap();
        runtime.dispatch(event).await;
        assert_eq!(intake.received.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_form_is_not_submitted() {
        let intake = FakeIntake::new(Duration::ZERO, false);
        let mut runtime = runtime(Arc::new(MemoryClipboard::new()), intake.clone());
        runtime.dispatch(FormEvent::FullName("Ana".into())).await;

        runtime.dispatch(FormEvent::Submit).await;
        assert!(!runtime.form().submission_in_progress());
        assert_eq!(runtime.field_errors().len(), 2);
        assert!(intake.received.lock().await.is_empty());

        runtime.dispatch(FormEvent::PhoneLocalNumber("1234567".into())).await;
        assert!(runtime.field_errors().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_bank_is_reported() {
        let mut runtime = runtime(
            Arc::new(MemoryClipboard::new()),
            FakeIntake::new(Duration::ZERO, false),
        );
        runtime.dispatch(FormEvent::Bank("0000".into())).await;
        assert_eq!(runtime.form().selected_bank().id, "0102");
        assert_eq!(runtime.field_errors()[0].code, "VALIDATION_UNKNOWN_SELECTION");

        runtime.dispatch(FormEvent::Bank("0172".into())).await;
        assert_eq!(runtime.form().selected_bank().name, "Bancamiga");
        assert!(runtime.field_errors().is_empty());
    }

    #[tokio::test]
    async fn test_quit_breaks_the_loop() {
        let runtime = runtime(
            Arc::new(MemoryClipboard::new()),
            FakeIntake::new(Duration::ZERO, false),
        );
        let handle = runtime.handle();
        handle.send(FormEvent::IncrementTickets);
        handle.send(FormEvent::Quit);
        handle.send(FormEvent::IncrementTickets);

        let mut renders = 0;
        let form = runtime.run(|_| renders += 1).await;
        assert_eq!(form.ticket_count().get(), 2);
        assert_eq!(renders, 2);
    }
}
