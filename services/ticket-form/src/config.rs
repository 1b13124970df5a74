use anyhow::Context;
use serde::Deserialize;
use shared::{Amount, COPY_FEEDBACK_MS, DEFAULT_UNIT_PRICE_CENTS, SUBMISSION_FLOOR_MS};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub intake: IntakeConfig,
    pub raffle: RaffleConfig,
    pub payee: PayeeConfig,
    pub support: SupportConfig,
    pub ui: UiConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RaffleConfig {
    pub title: String,
    pub unit_price: Amount,
    pub prize_image_path: String,
}

/// Pago Móvil destination the buyer pays into before filling the form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayeeConfig {
    pub bank: String,
    pub phone: String,
    pub id_document: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupportConfig {
    pub whatsapp_number: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub clipboard_command: Option<String>,
    pub copy_feedback: Duration,
    pub submission_floor: Duration,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsConfig {
    /// `/metrics` is served only when a port is configured
    pub port: Option<u16>,
}

impl Config {
    /// Defaults for every setting except the intake endpoint
    pub fn with_intake_url(url: impl Into<String>) -> Self {
        Config {
            intake: IntakeConfig { url: url.into() },
            raffle: RaffleConfig {
                title: "Rifa".to_string(),
                unit_price: Amount::from_cents(DEFAULT_UNIT_PRICE_CENTS),
                prize_image_path: "/premio.jpg".to_string(),
            },
            payee: PayeeConfig::default(),
            support: SupportConfig {
                whatsapp_number: None,
                message: "Hola, necesito ayuda con mi compra de tickets".to_string(),
            },
            ui: UiConfig {
                clipboard_command: None,
                copy_feedback: Duration::from_millis(COPY_FEEDBACK_MS),
                submission_floor: Duration::from_millis(SUBMISSION_FLOOR_MS),
            },
            metrics: MetricsConfig::default(),
        }
    }

    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let url = env::var("TICKET_INTAKE_URL").context("TICKET_INTAKE_URL must be set")?;
        let mut config = Self::with_intake_url(url);

        if let Ok(title) = env::var("RAFFLE_TITLE") {
            config.raffle.title = title;
        }
        if let Ok(price) = env::var("TICKET_UNIT_PRICE") {
            let parsed = Amount::parse_decimal(&price)?;
            config.raffle.unit_price = Amount::unit_price(parsed.as_cents())?;
        }
        if let Ok(path) = env::var("PRIZE_IMAGE_PATH") {
            config.raffle.prize_image_path = path;
        }

        config.payee = PayeeConfig {
            bank: env::var("PAYEE_BANK").unwrap_or_default(),
            phone: env::var("PAYEE_PHONE").unwrap_or_default(),
            id_document: env::var("PAYEE_ID_DOCUMENT").unwrap_or_default(),
        };

        config.support.whatsapp_number = non_empty_var("SUPPORT_WHATSAPP_NUMBER");
        if let Ok(message) = env::var("SUPPORT_MESSAGE") {
            config.support.message = message;
        }

        config.ui.clipboard_command = non_empty_var("CLIPBOARD_COMMAND");
        config.ui.copy_feedback = Duration::from_millis(
            env::var("COPY_FEEDBACK_MS")
                .unwrap_or_else(|_| COPY_FEEDBACK_MS.to_string())
                .parse()
                .context("COPY_FEEDBACK_MS must be a number of milliseconds")?,
        );
        config.ui.submission_floor = Duration::from_millis(
            env::var("SUBMISSION_FLOOR_MS")
                .unwrap_or_else(|_| SUBMISSION_FLOOR_MS.to_string())
                .parse()
                .context("SUBMISSION_FLOOR_MS must be a number of milliseconds")?,
        );

        config.metrics.port = non_empty_var("METRICS_PORT")
            .map(|port| port.parse::<u16>())
            .transpose()
            .context("METRICS_PORT must be a port number")?;

        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::with_intake_url("http://localhost:8080/tickets");
        assert_eq!(config.intake.url, "http://localhost:8080/tickets");
        assert_eq!(config.raffle.unit_price.to_string(), "100.00");
        assert_eq!(config.ui.copy_feedback, Duration::from_millis(2_000));
        assert_eq!(config.ui.submission_floor, Duration::from_millis(2_000));
        assert!(config.support.whatsapp_number.is_none());
        assert!(config.ui.clipboard_command.is_none());
        assert!(config.metrics.port.is_none());
    }
}
