mod app;
mod components;
mod config;
mod error;
mod event;
mod handler;
mod picker;
mod preview;
mod theme;
mod tree;
mod tui;
mod ui;

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::{AppConfig, PreviewConfig, ThemeConfig, TreeConfig};
use crate::error::{AppError, Result};
use crate::event::{Event, EventHandler};
use crate::tui::Tui;

/// Interactive tree picker for slash-delimited paths.
///
/// Reads paths from stdin, shows a navigable tree with fuzzy search and a
/// file preview, and prints the selected path to stdout.
#[derive(Debug, Parser)]
#[command(name = "treepick", version, about)]
struct Cli {
    /// Command used to render file previews (the hovered path is appended)
    #[arg(long)]
    preview: Option<String>,

    /// Disable the preview pane
    #[arg(long)]
    no_preview: bool,

    /// Merge single-child folder chains into one row
    #[arg(long)]
    flatten: bool,

    /// Path to a config file (overrides the default search locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color scheme: dark, light, or custom
    #[arg(long)]
    theme: Option<String>,
}

impl Cli {
    /// Partial config built from the flags, merged on top of file configs.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            preview: PreviewConfig {
                command: self.preview.clone(),
                enabled: self.no_preview.then_some(false),
            },
            tree: TreeConfig {
                flatten: self.flatten.then_some(true),
                use_icons: None,
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                custom: None,
            },
            ..Default::default()
        }
    }
}

/// Read the path list from stdin: one path per line, blank lines skipped.
fn read_paths() -> Result<Vec<String>> {
    if io::stdin().is_terminal() {
        return Err(AppError::NoInput);
    }
    let mut paths = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(trimmed.to_string());
        }
    }
    if paths.is_empty() {
        return Err(AppError::NoInput);
    }
    Ok(paths)
}

async fn run(cli: Cli) -> Result<Option<String>> {
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    let paths = read_paths()?;

    tui::install_panic_hook();
    let mut tui = Tui::new()?;

    let mut app = App::new(&paths, &config);
    let size = tui.terminal_mut().size()?;
    app.resize(size.width, size.height);

    let mut events = EventHandler::new(Duration::from_millis(16));
    let result = loop {
        if let Err(e) = tui.terminal_mut().draw(|frame| ui::render(&mut app, frame)) {
            break Err(e.into());
        }
        match events.next().await {
            Ok(Event::Key(key)) => handler::handle_key_event(&mut app, key),
            Ok(Event::Resize(width, height)) => app.resize(width, height),
            Ok(Event::Tick) => {}
            Err(e) => break Err(e),
        }
        if app.should_quit {
            break Ok(app.selected_path.take());
        }
    };

    tui.restore()?;
    result
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match run(cli).await {
        // stdout carries only the selection, so `treepick | xargs` composes.
        Ok(Some(path)) => println!("{path}"),
        Ok(None) => std::process::exit(130),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
