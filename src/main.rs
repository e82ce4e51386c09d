pub mod config;
pub mod error;
pub mod notify;
pub mod reducer;
pub mod runtime;
pub mod score;
pub mod session;
pub mod store;
pub mod text;
pub mod ui;
pub mod words;

use crate::{
    config::{Config, ConfigStore, FileConfigStore},
    error::SessionError,
    notify::{Banner, Notifier},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    score::{is_new_high_score, HighScoreRecord},
    session::Session,
    store::{FileHighScoreStore, HighScoreStore},
    words::RandomWords,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 1000;

/// timed typing test with a single global high score
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed typing test: type the generated character stream before the clock runs out, then see your speed and accuracy and chase the single global high score."
)]
pub struct Cli {
    /// number of seconds per session
    #[clap(short = 's', long)]
    number_of_secs: Option<u64>,

    /// number of words to generate per session
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// high score file to use instead of the default location
    #[clap(long)]
    score_file: Option<PathBuf>,

    /// config file to use instead of the default location
    #[clap(long)]
    config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Typing,
    Results,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub state: AppState,
    pub top_score: Option<HighScoreRecord>,
    pub banner: Banner,
    pub is_new_high_score: bool,
    pub name_input: String,
    pub score_saved: bool,
    source: RandomWords,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let source = RandomWords;
        Self {
            session: Session::new(&source, config.number_of_words, config.number_of_secs),
            state: AppState::Typing,
            top_score: None,
            banner: Banner::default(),
            is_new_high_score: false,
            name_input: String::new(),
            score_saved: false,
            source,
        }
    }

    /// A pushed record fully replaces the cached best, whenever it lands.
    pub fn on_high_score_update(&mut self, record: HighScoreRecord) {
        self.banner.notify(&format!(
            "top score: {} ({} wpm, {}% accuracy)",
            record.player, record.speed, record.accuracy
        ));
        self.top_score = Some(record);
    }

    /// Session expired: read the final score and compare against whatever
    /// best we have cached. No cached record means an automatic high score.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        let result = self.session.finalize()?;
        self.is_new_high_score = is_new_high_score(&result, self.top_score.as_ref());
        self.name_input.clear();
        self.score_saved = false;
        self.state = AppState::Results;
        Ok(())
    }

    pub fn play_again(&mut self) -> Result<(), SessionError> {
        self.session.restart(&self.source)?;
        self.is_new_high_score = false;
        self.name_input.clear();
        self.score_saved = false;
        self.state = AppState::Typing;
        Ok(())
    }

    /// Writes the record only on explicit confirmation with a non-empty
    /// name; otherwise the write stays deferred.
    pub fn save_high_score(&mut self, store: &dyn HighScoreStore) -> io::Result<()> {
        let name = self.name_input.trim();
        if name.is_empty() || self.score_saved {
            return Ok(());
        }
        let Some(result) = self.session.result() else {
            return Ok(());
        };
        let record = HighScoreRecord {
            player: name.to_string(),
            speed: result.speed,
            accuracy: result.accuracy,
        };
        store.write(&record)?;
        self.top_score = Some(record);
        self.score_saved = true;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = match &cli.config_file {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let mut config = config_store.load();
    if let Some(secs) = cli.number_of_secs {
        config.number_of_secs = secs;
    }
    if let Some(words) = cli.number_of_words {
        config.number_of_words = words;
    }
    config.number_of_secs = config.number_of_secs.max(1);
    config.number_of_words = config.number_of_words.max(1);
    // Raw mode is not on yet, so a failed save can still reach stderr.
    if let Err(err) = config_store.save(&config) {
        eprintln!("warning: could not save config: {err}");
    }

    let score_store = match &cli.score_file {
        Some(path) => FileHighScoreStore::with_path(path),
        None => FileHighScoreStore::new(),
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let res = run_app(&mut terminal, &mut app, &score_store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &FileHighScoreStore,
) -> Result<(), Box<dyn Error>> {
    let events = CrosstermEventSource::new();
    runtime::forward_high_scores(store.subscribe(), events.sender());
    let mut runner = Runner::new(events, FixedTicker::new(Duration::from_millis(TICK_RATE_MS)));

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => {
                app.session.on_tick();
                if app.session.has_expired() && app.state == AppState::Typing {
                    app.finish()?;
                }
            }
            AppEvent::Resize => {}
            AppEvent::Score(record) => app.on_high_score_update(record),
            AppEvent::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break;
                }
                match app.state {
                    AppState::Typing => match key.code {
                        KeyCode::Esc => break,
                        KeyCode::Char(c) => {
                            let index = app.session.input_cursor;
                            app.session.on_key(c, index);
                        }
                        _ => {}
                    },
                    AppState::Results => match key.code {
                        KeyCode::Esc => break,
                        KeyCode::Enter => {
                            if app.is_new_high_score && !app.score_saved {
                                app.save_high_score(store)?;
                            } else {
                                app.play_again()?;
                            }
                        }
                        KeyCode::Backspace => {
                            app.name_input.pop();
                        }
                        KeyCode::Char(c) => {
                            if app.is_new_high_score && !app.score_saved {
                                app.name_input.push(c);
                            } else if c == 'r' {
                                app.play_again()?;
                            }
                        }
                        _ => {}
                    },
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Phase;
    use tempfile::tempdir;

    fn test_config() -> Config {
        Config {
            number_of_secs: 2,
            number_of_words: 3,
        }
    }

    #[test]
    fn test_app_starts_typing_with_no_cached_record() {
        let app = App::new(&test_config());
        assert_eq!(app.state, AppState::Typing);
        assert!(app.top_score.is_none());
        assert_eq!(app.session.phase(), Phase::Idle);
    }

    #[test]
    fn test_update_replaces_cached_record_and_notifies() {
        let mut app = App::new(&test_config());
        app.on_high_score_update(HighScoreRecord {
            player: "ada".into(),
            speed: 50,
            accuracy: 95,
        });
        app.on_high_score_update(HighScoreRecord {
            player: "grace".into(),
            speed: 60,
            accuracy: 99,
        });

        assert_eq!(app.top_score.as_ref().map(|r| r.player.as_str()), Some("grace"));
        let banner = app.banner.current().unwrap_or_default();
        assert!(banner.contains("grace"));
    }

    #[test]
    fn test_finish_flags_high_score_when_record_absent() {
        let mut app = App::new(&test_config());
        let index = app.session.input_cursor;
        app.session.on_key(' ', index);
        app.session.on_tick();
        app.session.on_tick();
        assert!(app.session.has_expired());

        app.finish().unwrap();
        assert_eq!(app.state, AppState::Results);
        // No store update ever arrived: absent record always qualifies.
        assert!(app.is_new_high_score);
    }

    #[test]
    fn test_save_requires_name() {
        let dir = tempdir().unwrap();
        let store = FileHighScoreStore::with_path(dir.path().join("score.json"));

        let mut app = App::new(&test_config());
        let index = app.session.input_cursor;
        app.session.on_key(' ', index);
        app.session.on_tick();
        app.session.on_tick();
        app.finish().unwrap();

        // Deferred: no name entered, nothing written.
        app.save_high_score(&store).unwrap();
        assert!(!app.score_saved);
        assert!(store.subscribe().try_recv().is_err());

        app.name_input.push_str("ada");
        app.save_high_score(&store).unwrap();
        assert!(app.score_saved);
        assert_eq!(
            store.subscribe().recv().unwrap().player,
            "ada".to_string()
        );
    }

    #[test]
    fn test_play_again_returns_to_typing() {
        let mut app = App::new(&test_config());
        let index = app.session.input_cursor;
        app.session.on_key(' ', index);
        app.session.on_tick();
        app.session.on_tick();
        app.finish().unwrap();

        app.play_again().unwrap();
        assert_eq!(app.state, AppState::Typing);
        assert_eq!(app.session.phase(), Phase::Idle);
        assert_eq!(app.session.seconds_remaining, 2);
        assert!(!app.is_new_high_score);
    }
}
