// ============================================================================
// Module : assets
// ============================================================================
// Résout un nom logique ("currencies.json") vers le texte du fichier
//
// CONCEPTS RUST :
// 1. Trait : une seule interface, deux implémentations
//    - BundledAssets : fichiers compilés dans le binaire (include_str!)
//    - DirAssetStore : fichiers lus dans un répertoire (tokio::fs)
// 2. async fn dans un trait : déclarée `-> impl Future + Send`
//    pour que le futur puisse traverser les threads
//
// Contrat : une erreur de lecture n'est jamais propagée.
// Elle est loggée et le texte retourné est vide ("pas de données").
// ============================================================================

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Nom logique du document des devises
pub const CURRENCIES: &str = "currencies.json";

/// Nom logique du document des taux
pub const LIVE_RATES: &str = "live-rates.json";

/// Nom logique du document des soldes
pub const WALLET_BALANCE: &str = "wallet-balance.json";

/// Source de documents en lecture seule
pub trait AssetStore: Send + Sync {
    /// Retourne le contenu complet, ou une chaîne vide si illisible
    fn load_text(&self, name: &str) -> impl Future<Output = String> + Send;

    /// Liste les noms disponibles (pour le diagnostic au démarrage)
    fn list(&self) -> impl Future<Output = Vec<String>> + Send;
}

// ============================================================================
// BundledAssets : documents embarqués dans le binaire
// ============================================================================

/// Documents en mémoire, indexés par nom logique
#[derive(Debug, Clone, Default)]
pub struct BundledAssets {
    files: BTreeMap<String, String>,
}

impl BundledAssets {
    /// Les trois documents livrés avec l'application
    ///
    /// CONCEPT RUST : include_str!
    /// - Le fichier est lu à la compilation
    /// - Le binaire n'a besoin d'aucun fichier à côté de lui
    pub fn embedded() -> Self {
        Self::from_pairs([
            (CURRENCIES, include_str!("../assets/json/currencies.json")),
            (LIVE_RATES, include_str!("../assets/json/live-rates.json")),
            (WALLET_BALANCE, include_str!("../assets/json/wallet-balance.json")),
        ])
    }

    /// Construit un store à partir de paires (nom, contenu)
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let files = pairs
            .into_iter()
            .map(|(name, text)| (name.to_string(), text.to_string()))
            .collect();
        Self { files }
    }
}

impl AssetStore for BundledAssets {
    async fn load_text(&self, name: &str) -> String {
        match self.files.get(name) {
            Some(text) => {
                debug!(asset = %name, bytes = text.len(), "Loaded bundled asset");
                text.clone()
            }
            None => {
                warn!(asset = %name, "Bundled asset not found");
                String::new()
            }
        }
    }

    async fn list(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }
}

// ============================================================================
// DirAssetStore : documents lus sur le disque
// ============================================================================

/// Documents lus dans un répertoire, à chaque appel (pas de cache)
#[derive(Debug, Clone)]
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetStore for DirAssetStore {
    async fn load_text(&self, name: &str) -> String {
        let path = self.root.join(name);
        debug!(path = %path.display(), "Loading asset");

        // CONCEPT : Erreur avalée à cette couche
        // - Fichier absent, permissions, UTF-8 invalide : même résultat
        // - L'appelant voit simplement "pas de données"
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read asset");
                String::new()
            }
        }
    }

    async fn list(&self) -> Vec<String> {
        let mut names = Vec::new();

        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "Failed to list assets");
                return names;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        names
    }
}

// ============================================================================
// AnyAssetStore : choix du store à l'exécution
// ============================================================================
// CONCEPT RUST : Enum plutôt que Box<dyn Trait>
// - Les méthodes async du trait ne sont pas "dyn compatible"
// - Un enum garde le dispatch statique
// ============================================================================

/// Store choisi selon la configuration
#[derive(Debug, Clone)]
pub enum AnyAssetStore {
    Bundled(BundledAssets),
    Dir(DirAssetStore),
}

impl AnyAssetStore {
    /// Répertoire si fourni, sinon les documents embarqués
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(root) => AnyAssetStore::Dir(DirAssetStore::new(root)),
            None => AnyAssetStore::Bundled(BundledAssets::embedded()),
        }
    }

    /// Description courte pour les logs
    pub fn describe(&self) -> String {
        match self {
            AnyAssetStore::Bundled(_) => "bundled".to_string(),
            AnyAssetStore::Dir(store) => store.root().display().to_string(),
        }
    }
}

impl AssetStore for AnyAssetStore {
    async fn load_text(&self, name: &str) -> String {
        match self {
            AnyAssetStore::Bundled(store) => store.load_text(name).await,
            AnyAssetStore::Dir(store) => store.load_text(name).await,
        }
    }

    async fn list(&self) -> Vec<String> {
        match self {
            AnyAssetStore::Bundled(store) => store.list().await,
            AnyAssetStore::Dir(store) => store.list().await,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assets_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/json")
    }

    #[tokio::test]
    async fn test_bundled_assets_contain_all_documents() {
        let store = BundledAssets::embedded();

        for name in [CURRENCIES, LIVE_RATES, WALLET_BALANCE] {
            assert!(!store.load_text(name).await.is_empty(), "{} is empty", name);
        }
        assert_eq!(store.list().await.len(), 3);
    }

    #[tokio::test]
    async fn test_bundled_missing_asset_is_empty() {
        let store = BundledAssets::embedded();
        assert_eq!(store.load_text("nope.json").await, "");
    }

    #[tokio::test]
    async fn test_dir_store_reads_file() {
        let store = DirAssetStore::new(assets_dir());
        let text = store.load_text(CURRENCIES).await;
        assert!(text.contains("\"currencies\""));
    }

    #[tokio::test]
    async fn test_dir_store_missing_file_is_empty() {
        let store = DirAssetStore::new(assets_dir());
        assert_eq!(store.load_text("missing.json").await, "");

        let nowhere = DirAssetStore::new("/definitely/not/a/real/dir");
        assert_eq!(nowhere.load_text(CURRENCIES).await, "");
        assert!(nowhere.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_dir_store_list_is_sorted() {
        let store = DirAssetStore::new(assets_dir());
        let names = store.list().await;
        assert_eq!(names, vec![CURRENCIES, LIVE_RATES, WALLET_BALANCE]);
    }

    #[test]
    fn test_any_store_from_dir() {
        assert!(matches!(AnyAssetStore::from_dir(None), AnyAssetStore::Bundled(_)));

        let store = AnyAssetStore::from_dir(Some(PathBuf::from("/tmp/assets")));
        assert_eq!(store.describe(), "/tmp/assets");
    }
}
