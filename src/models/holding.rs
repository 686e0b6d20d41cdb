// ============================================================================
// Structure : Holding
// ============================================================================
// Ligne affichable : solde enrichi de sa devise et de sa valeur USD
//
// CONCEPTS RUST :
// 1. Immutabilité : les champs ne sont modifiés nulle part après construction
// 2. Composition : un Holding est construit à partir de trois enregistrements
// ============================================================================

use chrono::{DateTime, Utc};

use crate::models::{Currency, WalletBalance};

/// Une ligne du portefeuille prête à afficher
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    /// Code de la devise (ex: "BTC")
    pub currency: String,

    /// Nom complet (ex: "Bitcoin")
    pub name: String,

    /// Symbole (ex: "BTC")
    pub symbol: String,

    /// Quantité détenue
    pub amount: f64,

    /// Taux USD parsé, sert uniquement au calcul de `usd_value`
    pub usd_rate: f64,

    /// Taux USD tel qu'écrit dans le document source
    pub usd_rate_str: String,

    /// amount × usd_rate, sans arrondi
    pub usd_value: f64,

    /// Icône de la devise
    pub image_url: String,

    /// Date du taux
    pub rate_updated_at: Option<DateTime<Utc>>,
}

impl Holding {
    /// Assemble un Holding à partir d'un solde, de sa devise et du taux
    pub fn new(
        balance: &WalletBalance,
        currency: &Currency,
        rate_str: &str,
        rate: f64,
        rate_updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            currency: balance.currency.clone(),
            name: currency.name.clone(),
            symbol: currency.symbol.clone(),
            amount: balance.amount,
            usd_rate: rate,
            usd_rate_str: rate_str.to_string(),
            usd_value: balance.amount * rate,
            image_url: currency.colorful_image_url.clone(),
            rate_updated_at,
        }
    }

    /// Vérifie que le code devise n'est pas vide
    pub fn has_currency(&self) -> bool {
        !self.currency.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_value_is_not_rounded() {
        let balance = WalletBalance::new("BTC", 0.5);
        let currency = Currency::new("BTC", "Bitcoin", "BTC", "u");
        let holding = Holding::new(&balance, &currency, "65000.123456", 65000.123456, None);

        assert_eq!(holding.usd_value, 0.5 * 65000.123456);
        assert_eq!(holding.usd_rate_str, "65000.123456");
        assert_eq!(holding.name, "Bitcoin");
    }
}
