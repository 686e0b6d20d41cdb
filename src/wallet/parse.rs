// ============================================================================
// Parsing des documents
// ============================================================================
// Transforme le texte brut en enregistrements typés
//
// CONCEPT : Politique "best effort"
// - JSON invalide, champ manquant, `null` : liste vide
// - Jamais de panic, jamais d'erreur propagée
// - Un document illisible réduit l'affichage, il ne le bloque pas
// ============================================================================

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{
    Currency, CurrencyResponse, RateTier, RatesResponse, WalletBalance, WalletResponse,
};

/// Décode le document des devises (tableau `currencies`)
pub fn parse_currencies(raw: &str) -> Vec<Currency> {
    decode::<CurrencyResponse>(raw, "currencies")
        .map(|response| response.currencies)
        .unwrap_or_default()
}

/// Décode le document des taux (tableau `tiers`)
pub fn parse_rate_tiers(raw: &str) -> Vec<RateTier> {
    decode::<RatesResponse>(raw, "rates")
        .map(|response| response.tiers)
        .unwrap_or_default()
}

/// Décode le document des soldes (tableau `wallet`)
pub fn parse_balances(raw: &str) -> Vec<WalletBalance> {
    decode::<WalletResponse>(raw, "wallet")
        .map(|response| response.wallet)
        .unwrap_or_default()
}

/// Décodage commun
///
/// CONCEPT RUST : Option<T> comme enveloppe
/// - `null` se décode en None (pas d'erreur serde)
/// - Une erreur de décodage devient aussi None après le log
fn decode<T: DeserializeOwned>(raw: &str, kind: &str) -> Option<T> {
    if raw.trim().is_empty() {
        warn!(document = kind, "Empty document");
        return None;
    }

    match serde_json::from_str::<Option<T>>(raw) {
        Ok(Some(value)) => {
            debug!(document = kind, "Document decoded");
            Some(value)
        }
        Ok(None) => {
            warn!(document = kind, "Document is null");
            None
        }
        Err(e) => {
            warn!(document = kind, error = %e, "Failed to decode document");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currencies() {
        let raw = r#"{
            "currencies": [
                {"code": "BTC", "name": "Bitcoin", "symbol": "BTC", "colorful_image_url": "b"},
                {"code": "ETH", "name": "Ethereum", "symbol": "ETH", "colorful_image_url": "e"}
            ],
            "total": 2,
            "ok": true
        }"#;

        let currencies = parse_currencies(raw);
        assert_eq!(currencies.len(), 2);
        assert_eq!(currencies[1].code, "ETH");
    }

    #[test]
    fn test_parse_rate_tiers_keeps_rate_string() {
        let raw = r#"{"ok": true, "warning": null, "tiers": [
            {"from_currency": "CRO", "to_currency": "USD",
             "rates": [{"amount": "1.0", "rate": "0.00003417123456789"}],
             "time_stamp": 1718006400000}
        ]}"#;

        let tiers = parse_rate_tiers(raw);
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].first_rate(), Some("0.00003417123456789"));
    }

    #[test]
    fn test_parse_balances_ignores_ok_flag() {
        let raw = r#"{"ok": false, "warning": "stale", "wallet": [{"currency": "BTC", "amount": 1.5}]}"#;

        let balances = parse_balances(raw);
        assert_eq!(balances, vec![WalletBalance::new("BTC", 1.5)]);
    }

    #[test]
    fn test_malformed_documents_are_empty() {
        let samples = [
            "",
            "   ",
            "null",
            "not json",
            "{",
            "[]",
            "42",
            r#"{"unrelated": true}"#,
            r#"{"currencies": null}"#,
            r#"{"tiers": "oops"}"#,
            r#"{"wallet": [{"currency": "BTC"}]}"#,
        ];

        for raw in samples {
            assert!(parse_currencies(raw).is_empty(), "currencies: {:?}", raw);
            assert!(parse_rate_tiers(raw).is_empty(), "rates: {:?}", raw);
            assert!(parse_balances(raw).is_empty(), "wallet: {:?}", raw);
        }
    }

    #[test]
    fn test_one_bad_record_empties_the_document() {
        // Un enregistrement sans `rate` invalide tout le tableau
        let raw = r#"{"tiers": [
            {"from_currency": "BTC", "to_currency": "USD", "rates": [{"rate": "1"}]},
            {"from_currency": "ETH", "to_currency": "USD", "rates": [{"amount": "1"}]}
        ]}"#;

        assert!(parse_rate_tiers(raw).is_empty());
    }
}
