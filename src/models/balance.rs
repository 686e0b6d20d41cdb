// ============================================================================
// Structure : WalletBalance
// ============================================================================
// Solde détenu pour une devise (fichier wallet-balance.json)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Enveloppe du document wallet-balance.json
///
/// `ok` et `warning` ne sont pas vérifiés : un document avec ok=false
/// est affiché comme les autres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletResponse {
    #[serde(default)]
    pub ok: bool,

    #[serde(default)]
    pub warning: Option<String>,

    pub wallet: Vec<WalletBalance>,
}

/// Un solde : code de devise + montant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    pub currency: String,
    pub amount: f64,
}

impl WalletBalance {
    pub fn new(currency: &str, amount: f64) -> Self {
        Self {
            currency: currency.to_string(),
            amount,
        }
    }

    /// Un code vide (ou seulement des espaces) n'est jamais affiché
    pub fn has_currency(&self) -> bool {
        !self.currency.trim().is_empty()
    }
}
