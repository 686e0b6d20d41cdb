// ============================================================================
// Repository : chargement + parsing des trois documents
// ============================================================================
// CONCEPTS RUST :
// 1. Généricité : WalletRepository<S> fonctionne avec n'importe quel AssetStore
// 2. Trait WalletSource : point d'injection du contrôleur
//    - En production : WalletRepository (ne retourne jamais d'erreur)
//    - En test : une source qui échoue, pour vérifier error_message
// ============================================================================

use std::fmt;
use std::future::Future;

use anyhow::Result;
use tracing::{debug, info, instrument};

use crate::assets::{AssetStore, CURRENCIES, LIVE_RATES, WALLET_BALANCE};
use crate::models::{Currency, Holding, RateTier, WalletBalance};
use crate::wallet::{join, parse_balances, parse_currencies, parse_rate_tiers};

/// Identifie un des trois documents (pour les diagnostics)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Currencies,
    Rates,
    Wallet,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentKind::Currencies => "currencies",
            DocumentKind::Rates => "rates",
            DocumentKind::Wallet => "wallet",
        };
        f.write_str(label)
    }
}

/// Les trois documents parsés d'un même cycle
#[derive(Debug, Clone, Default)]
pub struct WalletDocuments {
    pub currencies: Vec<Currency>,
    pub tiers: Vec<RateTier>,
    pub balances: Vec<WalletBalance>,
}

impl WalletDocuments {
    /// Jointure des trois listes
    pub fn join(&self) -> Vec<Holding> {
        join(&self.currencies, &self.tiers, &self.balances)
    }

    /// Documents qui n'ont rien donné (absents ou illisibles)
    ///
    /// Ordre fixe : devises, taux, soldes
    pub fn missing(&self) -> Vec<DocumentKind> {
        let mut missing = Vec::new();
        if self.currencies.is_empty() {
            missing.push(DocumentKind::Currencies);
        }
        if self.tiers.is_empty() {
            missing.push(DocumentKind::Rates);
        }
        if self.balances.is_empty() {
            missing.push(DocumentKind::Wallet);
        }
        missing
    }
}

/// Fournit les documents d'un cycle de chargement
pub trait WalletSource: Send + Sync {
    fn documents(&self) -> impl Future<Output = Result<WalletDocuments>> + Send;
}

/// Source de production : lit et parse les documents d'un AssetStore
#[derive(Debug, Clone)]
pub struct WalletRepository<S> {
    store: S,
}

impl<S: AssetStore> WalletRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Devises (liste vide si illisible)
    pub async fn currencies(&self) -> Vec<Currency> {
        parse_currencies(&self.store.load_text(CURRENCIES).await)
    }

    /// Paliers de taux (liste vide si illisible)
    pub async fn rate_tiers(&self) -> Vec<RateTier> {
        parse_rate_tiers(&self.store.load_text(LIVE_RATES).await)
    }

    /// Soldes (liste vide si illisible)
    pub async fn balances(&self) -> Vec<WalletBalance> {
        parse_balances(&self.store.load_text(WALLET_BALANCE).await)
    }

    /// Pipeline complet : charge, parse puis joint
    pub async fn holdings(&self) -> Vec<Holding> {
        self.load().await.join()
    }

    /// Lectures séquentielles : la jointure attend les trois documents
    #[instrument(skip(self))]
    async fn load(&self) -> WalletDocuments {
        let documents = WalletDocuments {
            currencies: self.currencies().await,
            tiers: self.rate_tiers().await,
            balances: self.balances().await,
        };

        debug!(
            currencies = documents.currencies.len(),
            tiers = documents.tiers.len(),
            balances = documents.balances.len(),
            "Wallet documents parsed"
        );
        documents
    }

    /// Log la liste des documents disponibles
    pub async fn log_available_assets(&self) {
        let names = self.store.list().await;
        info!(count = names.len(), assets = ?names, "Available assets");
    }
}

impl<S: AssetStore> WalletSource for WalletRepository<S> {
    async fn documents(&self) -> Result<WalletDocuments> {
        Ok(self.load().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::BundledAssets;

    #[tokio::test]
    async fn test_bundled_holdings() {
        let repository = WalletRepository::new(BundledAssets::embedded());
        let holdings = repository.holdings().await;

        // USDC n'a pas de taux USD dans les documents livrés
        let codes: Vec<&str> = holdings.iter().map(|h| h.currency.as_str()).collect();
        assert_eq!(codes, vec!["BTC", "ETH", "CRO", "DAI"]);
    }

    #[tokio::test]
    async fn test_missing_documents() {
        let store = BundledAssets::from_pairs([(CURRENCIES, "garbage")]);
        let repository = WalletRepository::new(store);

        let documents = repository.documents().await.unwrap();
        assert_eq!(
            documents.missing(),
            vec![DocumentKind::Currencies, DocumentKind::Rates, DocumentKind::Wallet]
        );
        assert!(documents.join().is_empty());
    }

    #[test]
    fn test_document_kind_display() {
        assert_eq!(DocumentKind::Currencies.to_string(), "currencies");
        assert_eq!(DocumentKind::Rates.to_string(), "rates");
        assert_eq!(DocumentKind::Wallet.to_string(), "wallet");
    }
}
