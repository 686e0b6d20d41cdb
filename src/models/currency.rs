// ============================================================================
// Structure : Currency
// ============================================================================
// Métadonnées d'une cryptomonnaie supportée (fichier currencies.json)
//
// CONCEPTS RUST :
// 1. #[derive(Deserialize)] : serde génère le parsing JSON
// 2. #[serde(default)] : champ optionnel, valeur par défaut si absent
//    - Les champs utilisés par la jointure sont obligatoires
//    - Les champs descriptifs sont tolérés s'ils manquent
// ============================================================================

use serde::{Deserialize, Serialize};

/// Enveloppe du document currencies.json
///
/// `total` et `ok` sont acceptés mais jamais vérifiés.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyResponse {
    pub currencies: Vec<Currency>,

    #[serde(default)]
    pub total: u32,

    #[serde(default)]
    pub ok: bool,
}

/// Une cryptomonnaie supportée (ex: BTC, ETH, CRO)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// Code unique, clé de jointure avec les soldes (ex: "BTC")
    pub code: String,

    /// Nom affiché (ex: "Bitcoin")
    pub name: String,

    /// Symbole affiché après les montants (ex: "BTC")
    pub symbol: String,

    /// Icône en couleur
    pub colorful_image_url: String,

    /// Précision d'affichage recommandée
    #[serde(default)]
    pub display_decimal: u32,

    #[serde(default)]
    pub coin_id: String,

    #[serde(default)]
    pub token_decimal: u32,

    #[serde(default)]
    pub gray_image_url: String,

    #[serde(default)]
    pub blockchain_symbol: String,

    #[serde(default)]
    pub trading_symbol: String,

    #[serde(default)]
    pub is_erc20: bool,
}

impl Currency {
    /// Crée une devise avec les seuls champs utiles à la jointure
    ///
    /// Les champs descriptifs restent vides (utile dans les tests)
    pub fn new(code: &str, name: &str, symbol: &str, image_url: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            colorful_image_url: image_url.to_string(),
            display_decimal: 8,
            coin_id: String::new(),
            token_decimal: 0,
            gray_image_url: String::new(),
            blockchain_symbol: String::new(),
            trading_symbol: String::new(),
            is_erc20: false,
        }
    }
}
