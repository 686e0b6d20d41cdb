// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'interface TUI en utilisant les widgets de ratatui
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : composants UI (Block, Paragraph, List)
// 3. Layout : découpage de l'espace en zones
// 4. Style : couleurs et attributs de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::format::{format_amount, format_original_rate, format_usd_value};
use crate::models::Holding;
use crate::ui::detail;

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le panneau de détail se dessine par-dessus le dashboard
pub fn render(frame: &mut Frame, app: &App) {
    render_dashboard(frame, app);

    match app.current_screen {
        Screen::Dashboard => {}
        Screen::DetailSheet => {
            let area = frame.size();
            detail::render_detail_sheet(frame, app, area);
        }
    }
}

/// Dessine le dashboard
fn render_dashboard(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header : total + statut
            Constraint::Min(0),    // Content : tout le reste
            Constraint::Length(3), // Footer : raccourcis
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : solde total et statut
// ============================================================================

/// Dessine le header avec le solde total
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" WalletView ")
        .title_alignment(Alignment::Center);

    let mut text = vec![
        Line::from(Span::styled("Total Balance", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format_usd_value(app.wallet.total_usd_value),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    // Une seule ligne de statut : chargement > erreur > aide
    text.push(status_line(app));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Ligne de statut sous le total
fn status_line(app: &App) -> Line<'static> {
    if app.wallet.is_loading {
        Line::from(Span::styled(
            "⏳ Chargement...",
            Style::default().fg(Color::Yellow),
        ))
    } else if app.wallet.is_refreshing {
        Line::from(Span::styled(
            "🔄 Rafraîchissement...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::SLOW_BLINK),
        ))
    } else if let Some(error) = &app.wallet.error_message {
        Line::from(Span::styled(
            format!("⚠ {}", error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "[Enter] pour voir tous les actifs",
            Style::default().fg(Color::DarkGray),
        ))
    }
}

// ============================================================================
// Main Content : liste des actifs
// ============================================================================

/// Dessine la liste des actifs
///
/// CONCEPT RATATUI : ListState
/// - Le widget List garde la sélection visible (scroll automatique)
fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Asset Overview ");

    if app.wallet.holdings.is_empty() {
        let message = if app.wallet.is_busy() {
            "Chargement..."
        } else {
            "Aucun actif"
        };
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
        ])
        .block(block)
        .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .wallet
        .holdings
        .iter()
        .map(|holding| ListItem::new(holding_line(holding)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED),
        );

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Une ligne de la liste : nom, quantité, valeur USD, taux d'origine
pub fn holding_line(holding: &Holding) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {:<22}", truncate(&holding.name, 22)),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:>24}", format_amount(holding.amount, &holding.symbol)),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("{:>18}", format_usd_value(holding.usd_value)),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("  {}", format_original_rate(&holding.usd_rate_str, &holding.symbol)),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Tronque à `max` caractères avec ellipse
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max - 1).collect();
        format!("{}…", truncated)
    }
}

// ============================================================================
// Footer : raccourcis
// ============================================================================

/// Dessine le footer avec les raccourcis clavier
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", key_style),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                key_style,
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("[q]", key_style),
            Span::raw(" Quit  "),
            Span::styled("[↑↓ / j k]", key_style),
            Span::raw(" Navigate  "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Details  "),
            Span::styled("[r]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Refresh"),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Bitcoin", 22), "Bitcoin");
        assert_eq!(truncate("Crypto.com Chain Token", 10), "Crypto.co…");
    }
}
