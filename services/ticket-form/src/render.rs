//! Text rendering of the purchase form

use std::fmt;

use shared::errors::ServiceError;
use shared::PHONE_OPERATORS;

use crate::config::Config;
use crate::domain::{CopyTarget, NoticeKind};
use crate::form::TicketForm;
use crate::support;

const COPIED: &str = "¡Copiado!";

pub struct FormView<'a> {
    form: &'a TicketForm,
    config: &'a Config,
    field_errors: &'a [ServiceError],
}

impl<'a> FormView<'a> {
    pub fn new(form: &'a TicketForm, config: &'a Config) -> Self {
        Self {
            form,
            config,
            field_errors: &[],
        }
    }

    pub fn with_field_errors(mut self, errors: &'a [ServiceError]) -> Self {
        self.field_errors = errors;
        self
    }

    fn copy_hint(&self, target: CopyTarget) -> &'static str {
        if self.form.copied_marker() == Some(target) {
            COPIED
        } else {
            "[copy]"
        }
    }

    fn payee_line(&self, f: &mut fmt::Formatter<'_>, target: CopyTarget, value: &str) -> fmt::Result {
        if value.trim().is_empty() {
            return Ok(());
        }
        writeln!(f, "  {:<11} {}  {}", format!("{}:", target.label()), value, self.copy_hint(target))
    }
}

impl fmt::Display for FormView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.form;
        let raffle = &self.config.raffle;
        let payee = &self.config.payee;

        writeln!(f, "=== {} ===", raffle.title)?;
        writeln!(f, "Premio: {}", raffle.prize_image_path)?;
        writeln!(f, "Completa el formulario para asegurar tu compra.")?;
        writeln!(f)?;

        if !(payee.bank.trim().is_empty() && payee.phone.trim().is_empty() && payee.id_document.trim().is_empty()) {
            writeln!(f, "Datos para el Pago Móvil")?;
            self.payee_line(f, CopyTarget::PayeeBank, &payee.bank)?;
            self.payee_line(f, CopyTarget::PayeePhone, &payee.phone)?;
            self.payee_line(f, CopyTarget::PayeeIdDocument, &payee.id_document)?;
            writeln!(f)?;
        }

        writeln!(f, "Cantidad de Tickets:  [-] {} [+]", form.ticket_count())?;
        writeln!(
            f,
            "Precio Total: ${}  {}   (${} c/u)",
            form.total_price(),
            self.copy_hint(CopyTarget::Total),
            form.unit_price()
        )?;
        writeln!(f)?;

        writeln!(f, "Nombre y Apellido: {}", form.full_name().as_str())?;
        writeln!(
            f,
            "Número de Teléfono: ({}) {}   operadoras: {}",
            form.operator_prefix(),
            form.phone_local_number().as_str(),
            PHONE_OPERATORS.join(" ")
        )?;

        let bank = form.selected_bank();
        writeln!(f, "Banco: {} {}", bank.id, bank.name)?;
        let matches = form.filtered_banks();
        if form.bank_query().is_empty() {
            writeln!(f, "  ({} bancos, usa `search` para filtrar)", matches.len())?;
        } else if matches.is_empty() {
            writeln!(f, "  búsqueda \"{}\": sin resultados", form.bank_query())?;
        } else {
            writeln!(f, "  búsqueda \"{}\":", form.bank_query())?;
            for entry in matches {
                let marker = if entry.id == bank.id { '*' } else { ' ' };
                writeln!(f, "  {} {} {}", marker, entry.id, entry.name)?;
            }
        }

        writeln!(
            f,
            "Referencia del Pago Móvil (últimos 6 dígitos): {}",
            form.payment_reference().as_str()
        )?;

        for error in self.field_errors {
            writeln!(f, "  ! {}", error.message)?;
        }
        writeln!(f)?;

        if form.submission_in_progress() {
            writeln!(f, ">>> Procesando tu compra, por favor espera... <<<")?;
        } else {
            writeln!(f, "[ Comprar Tickets ]")?;
        }

        if let Some(notice) = form.notice() {
            let tag = match notice.kind {
                NoticeKind::Confirmation => "OK",
                NoticeKind::Failure => "ERROR",
            };
            writeln!(f, "{}: {} ({})", tag, notice.message, notice.shown_at.format("%H:%M:%S"))?;
        }

        if let Some(link) = support::whatsapp_link(&self.config.support) {
            writeln!(f, "¿Necesitas ayuda? {}", link)?;
        }

        Ok(())
    }
}
