use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use docshell::console::{self, Command, ConsolePrompt, ConsoleShell, Flow};
use docshell::kernel::services::adapters::{
    get_settings_path, DiskWatcher, JsonFileSettings, LocalDocumentStore, MemorySettings,
};
use docshell::kernel::services::ports::{DocumentStore, SettingsStore};
use docshell::kernel::services::{ShellEvent, ShellEventReceiver};
use docshell::kernel::Shell;

mod logging;

fn open_settings() -> Box<dyn SettingsStore> {
    let Some(path) = get_settings_path() else {
        tracing::warn!("no settings location, using in-memory settings");
        return Box::new(MemorySettings::new());
    };
    match JsonFileSettings::open(&path) {
        Ok(settings) => Box::new(settings),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "settings unreadable, using defaults");
            Box::new(MemorySettings::new())
        }
    }
}

/// Forwards our own saves to the watcher, then turns disk events into
/// prompts.
fn pump_disk_events<R: BufRead, W: Write, D: DocumentStore>(
    shell: &mut ConsoleShell<R, W, D>,
    events: &mut ShellEventReceiver,
    watcher: &mut DiskWatcher,
) -> docshell::kernel::Result<()> {
    for event in events.drain() {
        if let ShellEvent::DocumentSaved { path, .. } = event {
            watcher.acknowledge_write(&path);
        }
    }
    for event in watcher.drain_events() {
        shell.handle_disk_change(event.path(), event.is_removed())?;
    }
    watcher.sync_open_files(shell.views().open_paths());
    Ok(())
}

fn main() -> io::Result<()> {
    let log_guard = logging::init();
    if let Some(guard) = &log_guard {
        tracing::debug!(log_dir = %guard.log_dir().display(), "file logging active");
    }

    let prompt = ConsolePrompt::new(io::stdin().lock(), io::stdout());
    let mut shell = Shell::new(prompt, LocalDocumentStore::new(), open_settings());
    let mut events = shell.subscribe();

    let cwd = std::env::current_dir()?;
    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    shell.open_startup(&args, &cwd).map_err(io::Error::other)?;

    let mut watcher = match DiskWatcher::new() {
        Ok(watcher) => Some(watcher),
        Err(err) => {
            tracing::warn!(error = %err, "file watching disabled");
            None
        }
    };
    if let Some(watcher) = watcher.as_mut() {
        watcher.sync_open_files(shell.views().open_paths());
    }

    shell.prompt_mut().say("docshell: type `help` for commands");
    loop {
        if let Some(watcher) = watcher.as_mut() {
            if let Err(err) = pump_disk_events(&mut shell, &mut events, watcher) {
                tracing::warn!(error = %err, "disk change handling failed");
            }
        } else {
            events.drain();
        }

        let Some(line) = shell.prompt_mut().ask("> ") else {
            tracing::info!("input closed");
            break;
        };
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(docshell::console::CommandError::Empty) => continue,
            Err(err) => {
                shell.prompt_mut().say(&err.to_string());
                continue;
            }
        };
        match console::execute(&mut shell, command) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => shell.prompt_mut().say(&format!("error: {}", err)),
        }
    }

    Ok(())
}
