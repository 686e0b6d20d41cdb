// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état de l'écran TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état d'écran dans une seule structure
// 2. Séparation : l'état du portefeuille vient du contrôleur (WalletState),
//    App ne fait que le copier pour le rendu
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// ============================================================================

use crate::controller::WalletState;
use crate::models::Holding;

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : total et liste des actifs
    Dashboard,

    /// Panneau du bas : tous les actifs et le détail de la sélection
    DetailSheet,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Dernier état publié par le contrôleur
    pub wallet: WalletState,

    /// Index de l'actif sélectionné
    pub selected_index: usize,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false (quit réel)
    /// - N'importe quelle autre touche : confirm_quit = false (annulation)
    pub confirm_quit: bool,
}

impl App {
    /// Crée une App avec un portefeuille vide
    pub fn new() -> Self {
        Self {
            running: true,
            wallet: WalletState::default(),
            selected_index: 0,
            current_screen: Screen::Dashboard,
            confirm_quit: false,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Remplace l'état du portefeuille par la dernière publication
    ///
    /// CONCEPT : La liste peut rétrécir après un refresh
    /// - On ramène l'index dans les bornes
    pub fn update_wallet(&mut self, wallet: WalletState) {
        self.wallet = wallet;
        let max_index = self.wallet.holdings.len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max_index);
    }

    /// Navigue vers le haut dans la liste
    ///
    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() ne descend pas en dessous de 0
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Navigue vers le bas dans la liste
    pub fn navigate_down(&mut self) {
        let max_index = self.wallet.holdings.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Retourne l'actif sélectionné
    pub fn selected_holding(&self) -> Option<&Holding> {
        self.wallet.holdings.get(self.selected_index)
    }

    /// Ouvre le panneau de détail (seulement s'il y a des actifs)
    pub fn show_detail(&mut self) {
        if !self.wallet.holdings.is_empty() {
            self.current_screen = Screen::DetailSheet;
        }
    }

    /// Retourne à la vue principale
    pub fn show_dashboard(&mut self) {
        self.current_screen = Screen::Dashboard;
    }

    pub fn is_on_dashboard(&self) -> bool {
        self.current_screen == Screen::Dashboard
    }

    pub fn is_on_detail(&self) -> bool {
        self.current_screen == Screen::DetailSheet
    }

    /// Un refresh peut-il être lancé ?
    ///
    /// Pas pendant un autre chargement : l'indicateur est déjà affiché
    pub fn can_refresh(&self) -> bool {
        !self.wallet.is_busy()
    }

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, WalletBalance};

    fn holding(code: &str) -> Holding {
        Holding::new(
            &WalletBalance::new(code, 1.0),
            &Currency::new(code, code, code, ""),
            "1.0",
            1.0,
            None,
        )
    }

    fn wallet(codes: &[&str]) -> WalletState {
        WalletState {
            holdings: codes.iter().map(|code| holding(code)).collect(),
            ..WalletState::default()
        }
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.wallet.holdings.is_empty());
        assert!(app.is_on_dashboard());
    }

    #[test]
    fn test_app_quit() {
        let mut app = App::new();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());

        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());

        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_navigation() {
        let mut app = App::new();
        app.update_wallet(wallet(&["BTC", "ETH", "CRO"]));

        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        // Reste sur le dernier
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        app.navigate_up();
        app.navigate_up();
        app.navigate_up();
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_holding().unwrap().currency, "BTC");
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let mut app = App::new();
        app.update_wallet(wallet(&["BTC", "ETH", "CRO"]));
        app.selected_index = 2;

        app.update_wallet(wallet(&["BTC"]));
        assert_eq!(app.selected_index, 0);

        app.update_wallet(wallet(&[]));
        assert!(app.selected_holding().is_none());
    }

    #[test]
    fn test_detail_requires_holdings() {
        let mut app = App::new();
        app.show_detail();
        assert!(app.is_on_dashboard());

        app.update_wallet(wallet(&["BTC"]));
        app.show_detail();
        assert!(app.is_on_detail());

        app.show_dashboard();
        assert!(app.is_on_dashboard());
    }

    #[test]
    fn test_can_refresh() {
        let mut app = App::new();
        assert!(app.can_refresh());

        app.update_wallet(WalletState {
            is_refreshing: true,
            ..WalletState::default()
        });
        assert!(!app.can_refresh());
    }
}
