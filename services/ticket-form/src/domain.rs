use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use shared::Amount;

/// Fields offering a copy-to-clipboard helper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyTarget {
    Total,
    PayeePhone,
    PayeeIdDocument,
    PayeeBank,
}

impl CopyTarget {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "total" => Some(CopyTarget::Total),
            "phone" | "telefono" => Some(CopyTarget::PayeePhone),
            "id" | "cedula" | "rif" => Some(CopyTarget::PayeeIdDocument),
            "bank" | "banco" => Some(CopyTarget::PayeeBank),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CopyTarget::Total => "Monto",
            CopyTarget::PayeePhone => "Teléfono",
            CopyTarget::PayeeIdDocument => "Cédula/RIF",
            CopyTarget::PayeeBank => "Banco",
        }
    }
}

/// Body of the ticket intake POST
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub tickets: u32,
    #[serde(serialize_with = "serialize_decimal")]
    pub total: Amount,
    pub phone: String,
    pub bank: String,
    pub reference: String,
    pub full_name: String,
}

fn serialize_decimal<S>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(amount.to_decimal())
}

/// Whatever structured data the intake returned
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct IntakeReceipt(pub serde_json::Value);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Confirmation,
    Failure,
}

/// Message shown to the buyer after a submission settles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
    pub shown_at: DateTime<Utc>,
}

impl Notice {
    pub fn confirmation() -> Self {
        Self {
            kind: NoticeKind::Confirmation,
            message: "Se está validando el Pago Móvil.",
            shown_at: Utc::now(),
        }
    }

    pub fn failure() -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: "No pudimos registrar tu compra. Inténtalo de nuevo.",
            shown_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_wire_format() {
        let payload = SubmissionPayload {
            tickets: 3,
            total: Amount::from_cents(30_000),
            phone: "04141234567".to_string(),
            bank: "0134".to_string(),
            reference: "123456".to_string(),
            full_name: "Juan Pérez".to_string(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "tickets": 3,
                "total": 300.0,
                "phone": "04141234567",
                "bank": "0134",
                "reference": "123456",
                "fullName": "Juan Pérez",
            })
        );
    }

    #[test]
    fn test_copy_target_parse() {
        assert_eq!(CopyTarget::parse("total"), Some(CopyTarget::Total));
        assert_eq!(CopyTarget::parse(" Banco "), Some(CopyTarget::PayeeBank));
        assert_eq!(CopyTarget::parse("rif"), Some(CopyTarget::PayeeIdDocument));
        assert_eq!(CopyTarget::parse("reference"), None);
    }
}
