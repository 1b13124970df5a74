//! Static directory of banks accepted for Pago Móvil
//!
//! Entries are keyed by the four-digit code the banking system assigns each
//! institution. The list is read-only and its order is the display order.

use serde::Serialize;

use crate::types::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BankDirectoryEntry {
    pub id: &'static str,
    pub name: &'static str,
}

const fn bank(id: &'static str, name: &'static str) -> BankDirectoryEntry {
    BankDirectoryEntry { id, name }
}

pub const BANKS: &[BankDirectoryEntry] = &[
    bank("0102", "Banco de Venezuela"),
    bank("0104", "Venezolano de Crédito"),
    bank("0105", "Mercantil"),
    bank("0108", "Provincial"),
    bank("0114", "Bancaribe"),
    bank("0115", "Exterior"),
    bank("0128", "Banco Caroní"),
    bank("0134", "Banesco"),
    bank("0137", "Sofitasa"),
    bank("0138", "Banco Plaza"),
    bank("0146", "Bangente"),
    bank("0151", "BFC Banco Fondo Común"),
    bank("0156", "100% Banco"),
    bank("0157", "DelSur"),
    bank("0163", "Banco del Tesoro"),
    bank("0166", "Banco Agrícola de Venezuela"),
    bank("0168", "Bancrecer"),
    bank("0169", "R4 Banco Microfinanciero"),
    bank("0171", "Banco Activo"),
    bank("0172", "Bancamiga"),
    bank("0174", "Banplus"),
    bank("0175", "Banco Digital de los Trabajadores"),
    bank("0177", "Banfanb"),
    bank("0191", "Banco Nacional de Crédito"),
];

/// Read-only view over [`BANKS`]
#[derive(Debug, Clone, Copy)]
pub struct BankDirectory {
    entries: &'static [BankDirectoryEntry],
}

impl Default for BankDirectory {
    fn default() -> Self {
        Self { entries: BANKS }
    }
}

impl BankDirectory {
    /// Default selection
    pub fn first(&self) -> &'static BankDirectoryEntry {
        &self.entries[0]
    }

    pub fn find(&self, id: &str) -> Result<&'static BankDirectoryEntry, ValidationError> {
        let id = id.trim();
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| ValidationError::UnknownBank(id.to_string()))
    }

    /// Case-insensitive substring match over code and name; empty query matches all
    pub fn search(&self, query: &str) -> Vec<&'static BankDirectoryEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }

        self.entries
            .iter()
            .filter(|entry| entry.id.contains(&needle) || entry.name.to_lowercase().contains(&needle))
            .collect()
    }
}
