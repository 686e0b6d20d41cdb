// ============================================================================
// Jointure : soldes × devises × taux USD
// ============================================================================
// Pour chaque solde, dans l'ordre d'entrée :
// 1. Première devise avec le même code
// 2. Premier palier code → "USD" (comparaison exacte)
// 3. Premier taux de ce palier
// Si une étape échoue, le solde est ignoré (pas d'erreur, pas de ligne partielle)
//
// CONCEPT RUST : Iterator + filter_map
// - filter_map combine le filtre et la transformation
// - L'opérateur ? dans la closure court-circuite sur None
// ============================================================================

use tracing::{debug, trace};

use crate::models::{Currency, Holding, RateTier, WalletBalance};

/// Construit les lignes affichables
///
/// Pas de tri, pas de dédoublonnage : la sortie suit l'ordre des soldes.
pub fn join(
    currencies: &[Currency],
    tiers: &[RateTier],
    balances: &[WalletBalance],
) -> Vec<Holding> {
    let holdings: Vec<Holding> = balances
        .iter()
        .filter_map(|balance| {
            if !balance.has_currency() {
                trace!("Skipping balance with blank currency code");
                return None;
            }

            let currency = currencies.iter().find(|c| c.code == balance.currency);
            let tier = tiers.iter().find(|t| t.is_usd_tier_for(&balance.currency));

            let (currency, tier) = match (currency, tier) {
                (Some(currency), Some(tier)) => (currency, tier),
                _ => {
                    debug!(currency = %balance.currency, "No currency or USD tier, skipping");
                    return None;
                }
            };

            let rate_str = tier.first_rate()?;
            let rate = parse_rate(rate_str);

            Some(Holding::new(
                balance,
                currency,
                rate_str,
                rate,
                tier.updated_at(),
            ))
        })
        .collect();

    debug!(
        balances = balances.len(),
        holdings = holdings.len(),
        "Joined wallet documents"
    );
    holdings
}

/// Parse un taux décimal, 0.0 si illisible
///
/// Politique volontairement tolérante : "abc" vaut 0, la ligne reste affichée.
/// NaN et l'infini valent aussi 0 pour ne pas contaminer le total.
pub fn parse_rate(rate: &str) -> f64 {
    rate.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Somme des valeurs USD
pub fn total_usd_value(holdings: &[Holding]) -> f64 {
    holdings.iter().map(|h| h.usd_value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currencies() -> Vec<Currency> {
        vec![
            Currency::new("BTC", "Bitcoin", "BTC", "btc.png"),
            Currency::new("ETH", "Ethereum", "ETH", "eth.png"),
        ]
    }

    fn tiers() -> Vec<RateTier> {
        vec![
            RateTier::new("BTC", "USD", "65000.12", 1_718_006_400_000),
            RateTier::new("ETH", "USD", "3200.5", 1_718_006_400_000),
        ]
    }

    #[test]
    fn test_unmatched_balance_is_dropped() {
        let balances = vec![
            WalletBalance::new("BTC", 0.5),
            WalletBalance::new("ETH", 2.0),
            WalletBalance::new("XRP", 100.0),
        ];

        let holdings = join(&currencies(), &tiers(), &balances);

        let codes: Vec<&str> = holdings.iter().map(|h| h.currency.as_str()).collect();
        assert_eq!(codes, vec!["BTC", "ETH"]);

        let total = total_usd_value(&holdings);
        assert_eq!(total, 0.5 * 65000.12 + 2.0 * 3200.5);
        assert!((total - 38901.06).abs() < 1e-9);
    }

    #[test]
    fn test_output_follows_balance_order() {
        let balances = vec![WalletBalance::new("ETH", 1.0), WalletBalance::new("BTC", 1.0)];

        let holdings = join(&currencies(), &tiers(), &balances);
        assert_eq!(holdings[0].currency, "ETH");
        assert_eq!(holdings[1].currency, "BTC");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let balances = vec![WalletBalance::new("BTC", 1.0), WalletBalance::new("BTC", 2.0)];

        let holdings = join(&currencies(), &tiers(), &balances);
        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings[1].amount, 2.0);
    }

    #[test]
    fn test_blank_currency_is_dropped() {
        // Même si une devise et un taux existent pour le code vide
        let currencies = vec![Currency::new("", "Nothing", "?", "")];
        let tiers = vec![RateTier::new("", "USD", "1.0", 0)];
        let balances = vec![WalletBalance::new("", 10.0), WalletBalance::new("  ", 10.0)];

        assert!(join(&currencies, &tiers, &balances).is_empty());
    }

    #[test]
    fn test_unparsable_rate_is_zero() {
        let tiers = vec![RateTier::new("BTC", "USD", "abc", 0)];
        let balances = vec![WalletBalance::new("BTC", 3.0)];

        let holdings = join(&currencies(), &tiers, &balances);
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].usd_rate, 0.0);
        assert_eq!(holdings[0].usd_value, 0.0);
        assert_eq!(holdings[0].usd_rate_str, "abc");
    }

    #[test]
    fn test_empty_rate_list_is_dropped() {
        let mut tier = RateTier::new("BTC", "USD", "1", 0);
        tier.rates.clear();
        let balances = vec![WalletBalance::new("BTC", 1.0)];

        assert!(join(&currencies(), &[tier], &balances).is_empty());
    }

    #[test]
    fn test_only_usd_tier_is_used() {
        let tiers = vec![
            RateTier::new("BTC", "EUR", "60000", 0),
            RateTier::new("BTC", "USD", "65000", 0),
            RateTier::new("BTC", "USD", "99999", 0),
        ];
        let balances = vec![WalletBalance::new("BTC", 1.0)];

        let holdings = join(&currencies(), &tiers, &balances);
        assert_eq!(holdings[0].usd_rate_str, "65000");
    }

    #[test]
    fn test_first_matching_currency_wins() {
        let currencies = vec![
            Currency::new("BTC", "Bitcoin", "BTC", "a"),
            Currency::new("BTC", "Other Bitcoin", "XBT", "b"),
        ];
        let balances = vec![WalletBalance::new("BTC", 1.0)];

        let holdings = join(&currencies, &tiers(), &balances);
        assert_eq!(holdings[0].name, "Bitcoin");
    }

    #[test]
    fn test_output_never_exceeds_input() {
        let balances: Vec<WalletBalance> = ["BTC", "ETH", "", "DOGE", "BTC", "eth"]
            .iter()
            .map(|code| WalletBalance::new(code, 1.0))
            .collect();

        let holdings = join(&currencies(), &tiers(), &balances);
        assert!(holdings.len() <= balances.len());
        for holding in &holdings {
            assert!(balances.iter().any(|b| b.currency == holding.currency));
        }
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("3200.5"), 3200.5);
        assert_eq!(parse_rate(" 1.25 "), 1.25);
        assert_eq!(parse_rate("abc"), 0.0);
        assert_eq!(parse_rate(""), 0.0);
        assert_eq!(parse_rate("NaN"), 0.0);
        assert_eq!(parse_rate("inf"), 0.0);
    }
}
