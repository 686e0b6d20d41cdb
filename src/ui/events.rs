// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (relecture de l'état publié)
    Tick,

    /// Erreur survenue
    Error,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Crée un gestionnaire avec un tick de 250ms
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au plus tick_rate
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : identifier la touche
// ============================================================================

/// Vérifie si l'événement correspond à un des codes donnés
fn is_key(event: &Event, codes: &[KeyCode]) -> bool {
    match event {
        Event::Key(key) => codes.contains(&key.code),
        _ => false,
    }
}

/// 'q' : quitter
pub fn is_quit_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('q'), KeyCode::Char('Q')])
}

/// 'r' : rafraîchir (équivalent du "pull-to-refresh")
pub fn is_refresh_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('r'), KeyCode::Char('R'), KeyCode::F(5)])
}

/// Flèche haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Up, KeyCode::Char('k'), KeyCode::Char('K')])
}

/// Flèche bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Down, KeyCode::Char('j'), KeyCode::Char('J')])
}

/// Entrée : ouvrir le détail
pub fn is_enter_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Enter])
}

/// Échap ou Espace : fermer le détail
pub fn is_close_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Esc, KeyCode::Char(' ')])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_is_refresh_event() {
        assert!(is_refresh_event(&key(KeyCode::Char('r'))));
        assert!(is_refresh_event(&key(KeyCode::F(5))));
        assert!(!is_refresh_event(&key(KeyCode::Enter)));
    }

    #[test]
    fn test_navigation_events() {
        assert!(is_up_event(&key(KeyCode::Char('k'))));
        assert!(is_down_event(&key(KeyCode::Down)));
        assert!(is_close_event(&key(KeyCode::Esc)));
        assert!(is_enter_event(&key(KeyCode::Enter)));
        assert!(!is_up_event(&Event::Error));
    }
}
