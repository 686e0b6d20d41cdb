// ============================================================================
// WalletView - Point d'entrée
// ============================================================================
// Programme TUI : solde total, liste des actifs, panneau de détail
// Les données viennent de trois documents JSON (embarqués ou sur disque)
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Worker thread : runtime tokio dédié au chargement des données
// 4. tokio::sync::watch : l'UI lit le dernier état publié
// ============================================================================

use std::io;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use walletview::app::App;
use walletview::assets::AnyAssetStore;
use walletview::config::Config;
use walletview::controller::{WalletController, WalletState};
use walletview::ui::{events::EventHandler, render};
use walletview::wallet::WalletRepository;

/// Contrôleur de production
type Controller = WalletController<WalletRepository<AnyAssetStore>>;

// ============================================================================
// WorkerCommand : Commandes pour le worker thread
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum WorkerCommand {
    /// Rafraîchissement demandé par l'utilisateur (touche 'r')
    Refresh,
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/walletview/logs/walletview.log
/// RUST_LOG=walletview=trace cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = config.log_dir.clone();

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "walletview.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // Utile : UI et worker sur deux threads
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "walletview=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Si le logging échoue, on continue sans logs
    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(?config, "WalletView starting up");

    let store = AnyAssetStore::from_dir(config.assets_dir.clone());
    info!(assets = %store.describe(), "Using asset store");

    let controller = WalletController::new(WalletRepository::new(store), config.refresh_timing);
    let state_rx = controller.subscribe();

    // Runtime créé ici pour propager l'erreur, puis déplacé dans le worker
    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;

    let (command_tx, command_rx) = mpsc::channel::<WorkerCommand>();

    info!("Spawning background worker thread");
    let worker = spawn_background_worker(runtime, controller, command_rx);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &events, command_tx, state_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    // command_tx a été consommé par run() : le worker voit le canal fermé
    if worker.join().is_err() {
        error!("Worker thread panicked");
    }

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// CONCEPT RUST : Thread + runtime async
// - Le worker possède le contrôleur (seul écrivain de l'état)
// - Chargement initial au démarrage, puis une commande à la fois
// - Les résultats passent par le canal watch, pas par un second mpsc
// ============================================================================

/// Lance le worker qui exécute les cycles de chargement
fn spawn_background_worker(
    runtime: tokio::runtime::Runtime,
    controller: Controller,
    command_rx: mpsc::Receiver<WorkerCommand>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        runtime.block_on(async {
            controller.source().log_available_assets().await;
            controller.load().await;
        });

        // recv() échoue quand l'UI a lâché son Sender : on quitte
        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            match command {
                WorkerCommand::Refresh => {
                    let outcome = runtime.block_on(controller.refresh());
                    info!(?outcome, "Refresh finished");
                }
            }
        }

        info!("Worker thread exiting (channel closed)");
    })
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. Relit l'état publié par le worker
//   1. Dessine l'interface
//   2. Traite les événements
// ============================================================================

/// Exécute la boucle principale de l'application
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<WorkerCommand>,
    mut state_rx: watch::Receiver<WalletState>,
) -> Result<()> {
    let mut app = App::new();

    while app.is_running() {
        // 0. ÉTAT : copie seulement si le worker a publié
        // Err = worker terminé, on garde le dernier état
        if state_rx.has_changed().unwrap_or(false) {
            let wallet = state_rx.borrow_and_update().clone();
            debug!(
                holdings = wallet.holdings.len(),
                loading = wallet.is_loading,
                refreshing = wallet.is_refreshing,
                "Wallet state updated"
            );
            app.update_wallet(wallet);
        }

        // 1. RENDER
        terminal.draw(|frame| render(frame, &app))?;

        // 2. INPUT
        match events.next() {
            Ok(event) => handle_event(&mut app, event, &command_tx),
            Err(e) => warn!(error = ?e, "Failed to read terminal event"),
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Guard clauses (if) pour filtrer selon l'écran actuel
fn handle_event(
    app: &mut App,
    event: walletview::ui::events::Event,
    command_tx: &mpsc::Sender<WorkerCommand>,
) {
    use walletview::ui::events::{
        is_close_event, is_down_event, is_enter_event, is_quit_event, is_refresh_event,
        is_up_event, Event,
    };

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        // 'r' : équivalent du "pull-to-refresh"
        Event::Key(_) if is_refresh_event(&event) => {
            app.cancel_quit();
            if app.can_refresh() {
                info!("User requested refresh");
                if command_tx.send(WorkerCommand::Refresh).is_err() {
                    error!("Worker thread disconnected, refresh dropped");
                }
            } else {
                debug!("Refresh ignored, a load is already in progress");
            }
        }

        Event::Key(_) if is_up_event(&event) => {
            app.cancel_quit();
            app.navigate_up();
        }
        Event::Key(_) if is_down_event(&event) => {
            app.cancel_quit();
            app.navigate_down();
        }

        // Dashboard → DetailSheet
        Event::Key(_) if is_enter_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            if let Some(holding) = app.selected_holding() {
                info!(currency = %holding.currency, "User opened detail sheet");
            }
            app.show_detail();
        }

        // DetailSheet → Dashboard
        Event::Key(_) if is_close_event(&event) && app.is_on_detail() => {
            app.cancel_quit();
            debug!("User closed detail sheet");
            app.show_dashboard();
        }

        Event::Key(_) => {
            // Toute autre touche : annule la confirmation de quit
            app.cancel_quit();
        }

        Event::Tick | Event::Error => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Échec de la création du terminal")
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
