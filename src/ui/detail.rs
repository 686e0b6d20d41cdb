// ============================================================================
// Detail - Panneau du bas (bottom sheet)
// ============================================================================
// Affiche tous les actifs et le détail de l'actif sélectionné
//
// CONCEPTS RATATUI :
// 1. Clear : efface la zone avant de dessiner par-dessus le dashboard
// 2. Layout imbriqué : zone du panneau puis découpage interne
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::format::{format_amount, format_original_rate, format_rate_time, format_usd_value};
use crate::models::Holding;
use crate::ui::dashboard::holding_line;

/// Dessine le panneau de détail sur les 2/3 bas de l'écran
pub fn render_detail_sheet(frame: &mut Frame, app: &App, area: Rect) {
    let sheet = sheet_area(area);
    frame.render_widget(Clear, sheet);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Your Assets ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(sheet);
    frame.render_widget(block, sheet);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Total
            Constraint::Min(3),    // Tous les actifs
            Constraint::Length(8), // Détail de la sélection
        ])
        .split(inner)
        .to_vec();

    let total = Paragraph::new(Line::from(vec![
        Span::raw("Total: "),
        Span::styled(
            format_usd_value(app.wallet.total_usd_value),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(total, chunks[0]);

    let items: Vec<ListItem> = app
        .wallet
        .holdings
        .iter()
        .map(|holding| ListItem::new(holding_line(holding)))
        .collect();
    let list = List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, chunks[1], &mut state);

    if let Some(holding) = app.selected_holding() {
        render_holding_detail(frame, holding, chunks[2]);
    }
}

/// Zone du panneau : pleine largeur, 2/3 bas de l'écran
fn sheet_area(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(33), Constraint::Percentage(67)])
        .split(area)[1]
}

/// Détail d'un actif
fn render_holding_detail(frame: &mut Frame, holding: &Holding, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ({}) ", holding.name, holding.currency));

    let label = Style::default().fg(Color::Gray);
    let lines: Vec<Line> = detail_rows(holding)
        .into_iter()
        .map(|(name, value)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", name), label),
                Span::raw(value),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);

    // Hint ESC à droite
    let hint = Paragraph::new(Line::from(vec![
        Span::styled("[ESC]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" Retour"),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(hint, Rect { height: 1, ..area });
}

/// Lignes (libellé, valeur) du détail
pub fn detail_rows(holding: &Holding) -> Vec<(&'static str, String)> {
    vec![
        ("Amount", format_amount(holding.amount, &holding.symbol)),
        ("Value", format_usd_value(holding.usd_value)),
        ("Rate", format_original_rate(&holding.usd_rate_str, &holding.symbol)),
        ("Rate time", format_rate_time(holding.rate_updated_at)),
        ("Icon", holding.image_url.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, WalletBalance};

    #[test]
    fn test_detail_rows_keep_source_rate() {
        let holding = Holding::new(
            &WalletBalance::new("CRO", 1000.0),
            &Currency::new("CRO", "Crypto.com Chain Token", "CRO", "cro.png"),
            "0.00003417123456789",
            0.00003417123456789,
            None,
        );

        let rows = detail_rows(&holding);
        assert_eq!(rows[0], ("Amount", "1,000 CRO".to_string()));
        assert_eq!(rows[2], ("Rate", "$0.00003417123456789/CRO".to_string()));
        assert_eq!(rows[3], ("Rate time", "-".to_string()));
    }

    #[test]
    fn test_sheet_area_is_bottom() {
        let area = Rect::new(0, 0, 80, 30);
        let sheet = sheet_area(area);
        assert_eq!(sheet.x, 0);
        assert_eq!(sheet.width, 80);
        assert!(sheet.y > area.y);
        assert!(sheet.bottom() <= area.bottom());
    }
}
