// ============================================================================
// Structure : RateTier
// ============================================================================
// Paliers de taux de change (fichier live-rates.json)
//
// CONCEPT : Le taux reste une String
// - "0.00003417123456789" ne survit pas à un aller-retour par f64
// - On garde la chaîne source pour l'affichage
// - Le f64 ne sert qu'à la multiplication (valeur USD)
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Devise cible consultée pour la valorisation
pub const USD: &str = "USD";

/// Enveloppe du document live-rates.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesResponse {
    #[serde(default)]
    pub ok: bool,

    /// Peut être `null` dans les documents réels
    #[serde(default)]
    pub warning: Option<String>,

    pub tiers: Vec<RateTier>,
}

/// Taux d'une devise source vers une devise cible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    pub from_currency: String,
    pub to_currency: String,

    /// Paliers ordonnés, seul le premier est consulté
    pub rates: Vec<Rate>,

    /// Horodatage en millisecondes Unix
    #[serde(default)]
    pub time_stamp: i64,
}

/// Un palier (montant, taux décimal en texte)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    #[serde(default)]
    pub amount: String,

    pub rate: String,
}

impl RateTier {
    /// Crée un palier à un seul taux
    pub fn new(from: &str, to: &str, rate: &str, time_stamp: i64) -> Self {
        Self {
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            rates: vec![Rate {
                amount: "1.0".to_string(),
                rate: rate.to_string(),
            }],
            time_stamp,
        }
    }

    /// Vérifie si ce palier convertit `code` en dollars
    ///
    /// Comparaison exacte : "usd" ne correspond pas
    pub fn is_usd_tier_for(&self, code: &str) -> bool {
        self.from_currency == code && self.to_currency == USD
    }

    /// Chaîne du premier taux, None si la liste est vide
    pub fn first_rate(&self) -> Option<&str> {
        self.rates.first().map(|r| r.rate.as_str())
    }

    /// Horodatage converti, None si absent (0) ou hors limites
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        if self.time_stamp <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.time_stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_usd_tier_for() {
        let tier = RateTier::new("BTC", "USD", "65000.12", 0);
        assert!(tier.is_usd_tier_for("BTC"));
        assert!(!tier.is_usd_tier_for("ETH"));

        let lower = RateTier::new("BTC", "usd", "65000.12", 0);
        assert!(!lower.is_usd_tier_for("BTC"));
    }

    #[test]
    fn test_first_rate_empty() {
        let mut tier = RateTier::new("BTC", "USD", "1", 0);
        tier.rates.clear();
        assert_eq!(tier.first_rate(), None);
    }

    #[test]
    fn test_updated_at() {
        let tier = RateTier::new("BTC", "USD", "1", 1_718_006_400_000);
        let at = tier.updated_at().unwrap();
        assert_eq!(at.timestamp(), 1_718_006_400);

        let missing = RateTier::new("BTC", "USD", "1", 0);
        assert!(missing.updated_at().is_none());
    }
}
