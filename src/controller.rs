// ============================================================================
// Structure : WalletController
// ============================================================================
// Orchestre le chargement initial et le rafraîchissement du portefeuille
//
// CONCEPTS RUST :
// 1. tokio::sync::watch : un écrivain, plusieurs lecteurs
//    - Le contrôleur est le seul à modifier WalletState
//    - L'UI s'abonne (subscribe) et lit la dernière valeur
// 2. Guard + Drop : équivalent d'un bloc "finally"
//    - Le flag is_loading / is_refreshing est remis à false dans Drop
//    - Même si le futur est annulé ou si la source panique
// 3. send_if_modified : test-and-set atomique sur l'état
//    - Empêche deux rafraîchissements de se chevaucher
// ============================================================================

use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

use crate::models::Holding;
use crate::wallet::{total_usd_value, WalletSource};

/// Message affiché quand l'erreur n'a pas de texte
const UNKNOWN_ERROR: &str = "Unknown error occurred";

// ============================================================================
// WalletState : ce que l'UI observe
// ============================================================================

/// État publié à chaque transition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletState {
    /// Dernière liste calculée (remplacée en bloc, jamais patchée)
    pub holdings: Vec<Holding>,

    /// Chargement initial en cours
    pub is_loading: bool,

    /// Rafraîchissement demandé par l'utilisateur en cours
    pub is_refreshing: bool,

    /// Dernière erreur à montrer à l'utilisateur
    pub error_message: Option<String>,

    /// Somme des valeurs USD de `holdings`
    pub total_usd_value: f64,
}

impl WalletState {
    /// Vrai si un cycle de chargement est en cours
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_refreshing
    }
}

// ============================================================================
// RefreshTiming : délais d'affichage du rafraîchissement
// ============================================================================
// CONCEPT : Contrat UX, pas de données
// - L'indicateur doit rester visible même si le chargement est instantané
// - `lead` avant de charger, `trail` après, avant d'effacer le flag
// ============================================================================

/// Délais minimum du rafraîchissement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTiming {
    pub lead: Duration,
    pub trail: Duration,
}

impl RefreshTiming {
    /// Aucun délai (tests, mode non interactif)
    pub fn immediate() -> Self {
        Self {
            lead: Duration::ZERO,
            trail: Duration::ZERO,
        }
    }
}

impl Default for RefreshTiming {
    fn default() -> Self {
        Self {
            lead: Duration::from_millis(1000),
            trail: Duration::from_millis(500),
        }
    }
}

/// Résultat d'une demande de rafraîchissement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Le cycle s'est exécuté (avec ou sans erreur)
    Completed,

    /// Un rafraîchissement était déjà en cours, rien n'a été fait
    AlreadyRunning,
}

// ============================================================================
// Guard : remet un flag à false quand il sort du scope
// ============================================================================

/// Quel flag le guard doit effacer
#[derive(Debug, Clone, Copy)]
enum BusyFlag {
    Loading,
    Refreshing,
}

struct BusyGuard<'a> {
    state: &'a watch::Sender<WalletState>,
    flag: BusyFlag,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let flag = self.flag;
        self.state.send_modify(|state| match flag {
            BusyFlag::Loading => state.is_loading = false,
            BusyFlag::Refreshing => state.is_refreshing = false,
        });
    }
}

// ============================================================================
// WalletController
// ============================================================================

/// Contrôleur de l'état du portefeuille
///
/// CONCEPT RUST : Généricité sur la source
/// - W = WalletRepository<AnyAssetStore> en production
/// - W = une source factice dans les tests
pub struct WalletController<W> {
    source: W,
    timing: RefreshTiming,
    state: watch::Sender<WalletState>,
}

impl<W: WalletSource> WalletController<W> {
    /// Crée le contrôleur avec un état vide
    pub fn new(source: W, timing: RefreshTiming) -> Self {
        // Le receiver initial est jeté : send_modify fonctionne sans abonné
        let (state, _) = watch::channel(WalletState::default());
        Self {
            source,
            timing,
            state,
        }
    }

    /// Nouvel abonné à l'état
    pub fn subscribe(&self) -> watch::Receiver<WalletState> {
        self.state.subscribe()
    }

    /// Copie de l'état courant
    pub fn state(&self) -> WalletState {
        self.state.borrow().clone()
    }

    pub fn source(&self) -> &W {
        &self.source
    }

    /// Chargement initial
    ///
    /// Transitions :
    /// - is_loading = true, error_message effacé
    /// - diagnostic : chaque document vide produit un message
    /// - holdings et total remplacés
    /// - is_loading = false (toujours, via le guard)
    #[instrument(skip(self))]
    pub async fn load(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });
        let _guard = BusyGuard {
            state: &self.state,
            flag: BusyFlag::Loading,
        };

        match self.source.documents().await {
            Ok(documents) => {
                // Le dernier document manquant l'emporte
                for kind in documents.missing() {
                    warn!(document = %kind, "Document decoded to an empty list");
                    let message = format!("Could not load {} data. Check assets path.", kind);
                    self.state
                        .send_modify(|state| state.error_message = Some(message));
                }

                let holdings = documents.join();
                info!(holdings = holdings.len(), "Wallet loaded");
                self.publish(holdings);
            }
            Err(e) => {
                error!(error = ?e, "Failed to load wallet");
                let message = describe(&e);
                self.state
                    .send_modify(|state| state.error_message = Some(message));
            }
        }
    }

    /// Rafraîchissement demandé par l'utilisateur
    ///
    /// Refusé si un rafraîchissement est déjà en cours.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> RefreshOutcome {
        let started = self.state.send_if_modified(|state| {
            if state.is_refreshing {
                return false;
            }
            state.is_refreshing = true;
            state.error_message = None;
            true
        });

        if !started {
            warn!("Refresh already in flight, ignoring request");
            return RefreshOutcome::AlreadyRunning;
        }

        let _guard = BusyGuard {
            state: &self.state,
            flag: BusyFlag::Refreshing,
        };

        tokio::time::sleep(self.timing.lead).await;

        match self.source.documents().await {
            Ok(documents) => {
                let holdings = documents.join();
                info!(holdings = holdings.len(), "Wallet refreshed");
                self.publish(holdings);
            }
            Err(e) => {
                error!(error = ?e, "Failed to refresh wallet");
                let message = format!("Refresh failed: {}", describe(&e));
                self.state
                    .send_modify(|state| state.error_message = Some(message));
            }
        }

        // Le guard efface is_refreshing après ce délai
        tokio::time::sleep(self.timing.trail).await;
        RefreshOutcome::Completed
    }

    /// Remplace la liste et recalcule le total
    fn publish(&self, holdings: Vec<Holding>) {
        let holdings: Vec<Holding> = holdings.into_iter().filter(Holding::has_currency).collect();
        let total = total_usd_value(&holdings);

        self.state.send_modify(|state| {
            state.holdings = holdings;
            state.total_usd_value = total;
        });
    }
}

/// Texte d'erreur pour l'utilisateur
fn describe(e: &anyhow::Error) -> String {
    let message = e.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
