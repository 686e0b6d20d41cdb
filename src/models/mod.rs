// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
// - Documents sources : currencies.json, live-rates.json, wallet-balance.json
// - Vue dérivée : Holding (un solde valorisé en USD)
// ============================================================================

pub mod balance;  // Soldes du portefeuille
pub mod currency; // Métadonnées des devises
pub mod holding;  // Ligne affichable (jointure des trois documents)
pub mod rate;     // Paliers de taux de change

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use walletview::models::currency::Currency;
// On peut faire : use walletview::models::Currency;
pub use balance::{WalletBalance, WalletResponse};
pub use currency::{Currency, CurrencyResponse};
pub use holding::Holding;
pub use rate::{Rate, RateTier, RatesResponse, USD};
