// ============================================================================
// Module : format
// ============================================================================
// Fonctions pures de mise en forme pour l'affichage
//
// CONCEPTS RUST :
// 1. format!("{:.8}") : arrondi à N décimales
// 2. Manipulation de &str : trim_end_matches, split_once, chars().rev()
// 3. Aucune dépendance à l'état : testables en isolation
// ============================================================================

use chrono::{DateTime, Utc};

/// Nombre maximal de décimales pour les quantités
const AMOUNT_DECIMALS: usize = 8;

/// Quantité avec séparateurs de milliers et jusqu'à 8 décimales
///
/// Les zéros finaux sont supprimés : 1.50000000 → "1.5"
///
/// # Exemple
/// `format_amount(1234.5, "BTC")` → `"1,234.5 BTC"`
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let fixed = format!("{:.*}", AMOUNT_DECIMALS, amount.abs());
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let number = group_thousands(trimmed);

    // -0.000000001 s'arrondit à "0", pas de signe dans ce cas
    if amount < 0.0 && number != "0" {
        format!("-{} {}", number, symbol)
    } else {
        format!("{} {}", number, symbol)
    }
}

/// Valeur en dollars US : "$38,901.06"
///
/// Négatif : "-$12.50"
pub fn format_usd_value(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let number = group_thousands(&fixed);

    if value < 0.0 && fixed != "0.00" {
        format!("-${}", number)
    } else {
        format!("${}", number)
    }
}

/// Taux d'origine, tel qu'écrit dans le document : "$0.0984/CRO"
///
/// CONCEPT : Pas de conversion en f64
/// - La chaîne source est recopiée telle quelle
/// - Aucune perte de précision possible
pub fn format_original_rate(rate: &str, symbol: &str) -> String {
    format!("${}/{}", rate, symbol)
}

/// Date du taux pour la vue détail
pub fn format_rate_time(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "-".to_string(),
    }
}

/// Insère des virgules dans la partie entière : "1234567.5" → "1,234,567.5"
fn group_thousands(number: &str) -> String {
    let (integer, fraction) = match number.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (number, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(fraction) => format!("{}.{}", grouped, fraction),
        None => grouped,
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
