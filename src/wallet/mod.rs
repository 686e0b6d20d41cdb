// ============================================================================
// Module : wallet
// ============================================================================
// Moteur de jointure : texte brut → enregistrements → lignes affichables
// Aucune opération de ce module ne propage d'erreur
// ============================================================================

pub mod join;       // Jointure soldes × devises × taux
pub mod parse;      // Décodage tolérant des documents
pub mod repository; // Chargement des trois documents

pub use join::{join, parse_rate, total_usd_value};
pub use parse::{parse_balances, parse_currencies, parse_rate_tiers};
pub use repository::{DocumentKind, WalletDocuments, WalletRepository, WalletSource};
