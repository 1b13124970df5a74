//! Line commands accepted by the terminal host

use crate::domain::CopyTarget;
use crate::runtime::FormEvent;

pub const HELP: &str = "\
Comandos:
  +  /  -             sumar / restar un ticket
  name <texto>        nombre y apellido
  op <prefijo>        operadora (0414, 0424, 0412, 0416, 0426)
  phone <dígitos>     número de teléfono (7 dígitos)
  ref <dígitos>       referencia del Pago Móvil (6 dígitos)
  search <texto>      filtrar bancos
  bank <código>       seleccionar banco
  copy <campo>        copiar total | phone | id | bank
  submit              comprar tickets
  help                mostrar esta ayuda
  quit                salir";

#[derive(Debug)]
pub enum Command {
    Event(FormEvent),
    Help,
    Unknown(String),
}

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let event = match verb.to_ascii_lowercase().as_str() {
        "+" => FormEvent::IncrementTickets,
        "-" => FormEvent::DecrementTickets,
        "name" => FormEvent::FullName(rest.to_string()),
        "op" => FormEvent::OperatorPrefix(rest.to_string()),
        "phone" => FormEvent::PhoneLocalNumber(rest.to_string()),
        "ref" => FormEvent::PaymentReference(rest.to_string()),
        "search" => FormEvent::BankQuery(rest.to_string()),
        "bank" => FormEvent::Bank(rest.to_string()),
        "copy" => match CopyTarget::parse(rest) {
            Some(target) => FormEvent::Copy(target),
            None => return Command::Unknown(line.to_string()),
        },
        "submit" => FormEvent::Submit,
        "quit" | "exit" => FormEvent::Quit,
        "help" | "?" => return Command::Help,
        _ => return Command::Unknown(line.to_string()),
    };

    Command::Event(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_commands() {
        assert!(matches!(parse("+"), Command::Event(FormEvent::IncrementTickets)));
        assert!(matches!(parse(" - "), Command::Event(FormEvent::DecrementTickets)));
        assert!(matches!(
            parse("name Juan123 Pérez!"),
            Command::Event(FormEvent::FullName(ref name)) if name == "Juan123 Pérez!"
        ));
        assert!(matches!(
            parse("phone abc12-34567"),
            Command::Event(FormEvent::PhoneLocalNumber(ref raw)) if raw == "abc12-34567"
        ));
        assert!(matches!(
            parse("search banco de"),
            Command::Event(FormEvent::BankQuery(ref q)) if q == "banco de"
        ));
        assert!(matches!(parse("name"), Command::Event(FormEvent::FullName(ref n)) if n.is_empty()));
    }

    #[test]
    fn test_parse_copy_and_control() {
        assert!(matches!(
            parse("copy total"),
            Command::Event(FormEvent::Copy(CopyTarget::Total))
        ));
        assert!(matches!(parse("copy nothing"), Command::Unknown(_)));
        assert!(matches!(parse("SUBMIT"), Command::Event(FormEvent::Submit)));
        assert!(matches!(parse("quit"), Command::Event(FormEvent::Quit)));
        assert!(matches!(parse("help"), Command::Help));
        assert!(matches!(parse("dance"), Command::Unknown(_)));
    }
}
