// ============================================================================
// Module : config
// ============================================================================
// Configuration lue depuis la ligne de commande et l'environnement
//
// Priorité pour le répertoire des documents :
// 1. Premier argument : walletview ./my-assets
// 2. Variable WALLETVIEW_ASSETS_DIR
// 3. Documents embarqués dans le binaire
//
// CONCEPT RUST : Injection des sources
// - from_env() lit le vrai environnement
// - from_sources() reçoit une closure : testable sans toucher aux variables
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::controller::RefreshTiming;

pub const ENV_ASSETS_DIR: &str = "WALLETVIEW_ASSETS_DIR";
pub const ENV_LOG_DIR: &str = "WALLETVIEW_LOG_DIR";
pub const ENV_REFRESH_LEAD_MS: &str = "WALLETVIEW_REFRESH_LEAD_MS";
pub const ENV_REFRESH_TRAIL_MS: &str = "WALLETVIEW_REFRESH_TRAIL_MS";

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Répertoire des trois documents (None = documents embarqués)
    pub assets_dir: Option<PathBuf>,

    /// Répertoire des fichiers de log
    pub log_dir: PathBuf,

    /// Délais du rafraîchissement
    pub refresh_timing: RefreshTiming,
}

impl Config {
    /// Lit les arguments et les variables d'environnement du processus
    pub fn from_env() -> Result<Self> {
        Self::from_sources(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Construit la configuration à partir de sources explicites
    ///
    /// # Arguments
    /// * `args` - Arguments de la ligne de commande (sans le nom du programme)
    /// * `var` - Lecture d'une variable d'environnement
    pub fn from_sources<I, F>(args: I, var: F) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter();
        let arg_dir = args.next();
        if let Some(extra) = args.next() {
            bail!("Argument inattendu : {} (usage : walletview [ASSET_DIR])", extra);
        }

        let assets_dir = arg_dir
            .or_else(|| var(ENV_ASSETS_DIR))
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let log_dir = var(ENV_LOG_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        let defaults = RefreshTiming::default();
        let refresh_timing = RefreshTiming {
            lead: read_millis(&var, ENV_REFRESH_LEAD_MS)?.unwrap_or(defaults.lead),
            trail: read_millis(&var, ENV_REFRESH_TRAIL_MS)?.unwrap_or(defaults.trail),
        };

        Ok(Self {
            assets_dir,
            log_dir,
            refresh_timing,
        })
    }
}

/// Répertoire de logs par défaut
///
/// - Linux : ~/.local/share/walletview/logs
/// - macOS : ~/Library/Application Support/walletview/logs
/// - Sinon : ./logs
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("walletview").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Lit une durée en millisecondes, erreur si la valeur n'est pas un entier
fn read_millis<F>(var: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} doit être un nombre de millisecondes : {:?}", key, raw))?;
            Ok(Some(Duration::from_millis(millis)))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_sources(Vec::new(), env(&[])).unwrap();

        assert_eq!(config.assets_dir, None);
        assert_eq!(config.refresh_timing, RefreshTiming::default());
        assert_eq!(config.log_dir, default_log_dir());
    }

    #[test]
    fn test_argument_wins_over_env() {
        let config = Config::from_sources(
            vec!["./cli".to_string()],
            env(&[(ENV_ASSETS_DIR, "./env")]),
        )
        .unwrap();
        assert_eq!(config.assets_dir, Some(PathBuf::from("./cli")));

        let config = Config::from_sources(Vec::new(), env(&[(ENV_ASSETS_DIR, "./env")])).unwrap();
        assert_eq!(config.assets_dir, Some(PathBuf::from("./env")));
    }

    #[test]
    fn test_refresh_timing_from_env() {
        let config = Config::from_sources(
            Vec::new(),
            env(&[(ENV_REFRESH_LEAD_MS, "0"), (ENV_REFRESH_TRAIL_MS, " 250 ")]),
        )
        .unwrap();

        assert_eq!(config.refresh_timing.lead, Duration::ZERO);
        assert_eq!(config.refresh_timing.trail, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let result = Config::from_sources(Vec::new(), env(&[(ENV_REFRESH_LEAD_MS, "soon")]));
        assert!(result.is_err());

        let result = Config::from_sources(vec!["a".to_string(), "b".to_string()], env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_log_dir_from_env() {
        let config = Config::from_sources(Vec::new(), env(&[(ENV_LOG_DIR, "/tmp/wv-logs")])).unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/tmp/wv-logs"));
    }
}
