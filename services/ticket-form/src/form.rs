//! Purchase form state
//!
//! `TicketForm` is the single owner of everything the buyer edits. Handlers
//! are synchronous and run one at a time; anything that waits (clipboard,
//! network, timers) lives in [`crate::runtime`] and reports back through
//! events.

use shared::{
    Amount, BankDirectory, BankDirectoryEntry, FullName, OperatorPrefix, PaymentReference,
    PhoneLocalNumber, TicketCount,
};

use crate::domain::{CopyTarget, IntakeReceipt, Notice, SubmissionPayload};
use crate::errors::{FormError, Result};

#[derive(Debug, Clone)]
pub struct TicketForm {
    unit_price: Amount,
    directory: BankDirectory,
    ticket_count: TicketCount,
    operator_prefix: OperatorPrefix,
    phone_local_number: PhoneLocalNumber,
    full_name: FullName,
    payment_reference: PaymentReference,
    selected_bank: &'static BankDirectoryEntry,
    bank_query: String,
    copied_marker: Option<CopyTarget>,
    submission_in_progress: bool,
    notice: Option<Notice>,
}

impl TicketForm {
    pub fn new(unit_price: Amount) -> Self {
        let directory = BankDirectory::default();
        Self {
            unit_price,
            directory,
            ticket_count: TicketCount::default(),
            operator_prefix: OperatorPrefix::default(),
            phone_local_number: PhoneLocalNumber::default(),
            full_name: FullName::default(),
            payment_reference: PaymentReference::default(),
            selected_bank: directory.first(),
            bank_query: String::new(),
            copied_marker: None,
            submission_in_progress: false,
            notice: None,
        }
    }

    pub fn increment_ticket_count(&mut self) {
        self.ticket_count = self.ticket_count.incremented();
    }

    pub fn decrement_ticket_count(&mut self) {
        self.ticket_count = self.ticket_count.decremented();
    }

    pub fn set_full_name(&mut self, raw: &str) {
        self.full_name = FullName::from_input(raw);
    }

    pub fn set_phone_local_number(&mut self, raw: &str) {
        self.phone_local_number = PhoneLocalNumber::from_input(raw);
    }

    pub fn set_payment_reference(&mut self, raw: &str) {
        self.payment_reference = PaymentReference::from_input(raw);
    }

    /// Replace the operator prefix; values outside the selector leave state unchanged
    pub fn set_operator_prefix(&mut self, value: &str) -> Result<()> {
        self.operator_prefix = OperatorPrefix::try_from(value)?;
        Ok(())
    }

    /// Replace the selected bank; codes outside the directory leave state unchanged
    pub fn set_selected_bank(&mut self, id: &str) -> Result<()> {
        self.selected_bank = self.directory.find(id)?;
        Ok(())
    }

    pub fn set_bank_query(&mut self, query: &str) {
        self.bank_query = query.trim().to_string();
    }

    /// Banks matching the current search, in directory order
    pub fn filtered_banks(&self) -> Vec<&'static BankDirectoryEntry> {
        self.directory.search(&self.bank_query)
    }

    pub fn total_price(&self) -> Amount {
        self.unit_price.times(self.ticket_count)
    }

    pub fn mark_copied(&mut self, target: CopyTarget) {
        self.copied_marker = Some(target);
    }

    pub fn clear_copied_marker(&mut self) {
        self.copied_marker = None;
    }

    pub fn payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            tickets: self.ticket_count.get(),
            total: self.total_price(),
            phone: format!("{}{}", self.operator_prefix, self.phone_local_number.as_str()),
            bank: self.selected_bank.id.to_string(),
            reference: self.payment_reference.as_str().to_string(),
            full_name: self.full_name.as_str().to_string(),
        }
    }

    /// Enter the submitting state and hand back the payload to send
    ///
    /// Returns `None` while a submission is already in flight.
    pub fn begin_submission(&mut self) -> Option<SubmissionPayload> {
        if self.submission_in_progress {
            return None;
        }
        self.submission_in_progress = true;
        Some(self.payload())
    }

    /// Return to idle and surface the outcome as a notice
    pub fn finish_submission(&mut self, outcome: &std::result::Result<IntakeReceipt, FormError>) {
        self.submission_in_progress = false;
        self.notice = Some(match outcome {
            Ok(_) => Notice::confirmation(),
            Err(_) => Notice::failure(),
        });
    }

    pub fn unit_price(&self) -> Amount {
        self.unit_price
    }

    pub fn ticket_count(&self) -> TicketCount {
        self.ticket_count
    }

    pub fn operator_prefix(&self) -> OperatorPrefix {
        self.operator_prefix
    }

    pub fn phone_local_number(&self) -> &PhoneLocalNumber {
        &self.phone_local_number
    }

    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    pub fn payment_reference(&self) -> &PaymentReference {
        &self.payment_reference
    }

    pub fn selected_bank(&self) -> &'static BankDirectoryEntry {
        self.selected_bank
    }

    pub fn bank_query(&self) -> &str {
        &self.bank_query
    }

    pub fn copied_marker(&self) -> Option<CopyTarget> {
        self.copied_marker
    }

    pub fn submission_in_progress(&self) -> bool {
        self.submission_in_progress
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}
