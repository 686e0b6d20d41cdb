// ============================================================================
// WalletView - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests d'intégration
// ============================================================================

pub mod app;        // État de l'écran
pub mod assets;     // Lecture des documents (embarqués ou sur disque)
pub mod config;     // Configuration (arguments + environnement)
pub mod controller; // Chargement / rafraîchissement, état observable
pub mod format;     // Mise en forme des montants et taux
pub mod models;     // Structures de données
pub mod ui;         // Interface utilisateur
pub mod wallet;     // Parsing et jointure des documents
