//! Application state and logic.

use crate::config::Config;
use crate::merge::import_examples;
use crate::models::{now, Bucket, Lists};
use crate::scheduler::{next_due, transition};
use crate::session::QuizSession;
use crate::store::{load_input_data, ListStore};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

pub struct App {
    pub store: ListStore,
    pub input_file: PathBuf,
    pub lists: Lists,
    pub session: QuizSession,
    pub warning: Option<String>,
    pub message: Option<String>,
    pub show_help: bool,
}

impl App {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_paths(config.storage.data_dir.clone(), config.storage.input_file.clone())
    }

    pub fn with_paths(data_dir: PathBuf, input_file: PathBuf) -> anyhow::Result<Self> {
        let store = ListStore::new(data_dir);
        store.ensure_dir()?;

        let mut app = Self {
            store,
            input_file,
            lists: Lists::new(),
            session: QuizSession::new(),
            warning: None,
            message: None,
            show_help: false,
        };
        tracing::info!(
            session = %app.session.id,
            data_dir = %app.store.data_dir().display(),
            "session started"
        );

        app.refresh()?;
        Ok(app)
    }

    /// One interaction cycle: reload buckets from disk, import new examples,
    /// and pick a card if none is held.
    pub fn refresh(&mut self) -> anyhow::Result<()> {
        self.lists = self.store.load_all()?;

        let groups = load_input_data(&self.input_file)?;
        if groups.is_empty() {
            self.warning = Some(format!(
                "Could not find {}. Please create the file with the JSON data.",
                self.input_file.display()
            ));
        } else {
            self.warning = None;
            import_examples(&self.store, &groups, &mut self.lists, now())?;
        }

        self.select_next();
        Ok(())
    }

    fn select_next(&mut self) {
        if !self.session.is_idle() {
            return;
        }
        if let Some((bucket, card)) = next_due(&self.lists, now()) {
            self.session.offer(bucket, card.clone());
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        self.message = None;

        if self.show_help {
            self.show_help = false;
            return Ok(());
        }

        self.refresh()?;

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.session.reveal();
            }
            KeyCode::Char('?') => self.show_help = true,
            // Reload already happened above.
            KeyCode::Char('r') => {}
            KeyCode::Char(c) => {
                if let Some(to) = Bucket::from_key(c) {
                    self.judge(to)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Move the revealed card into `to`. Ignored while the answer is hidden.
    fn judge(&mut self, to: Bucket) -> anyhow::Result<()> {
        let Some((from, card)) = self.session.resolve() else {
            return Ok(());
        };

        transition(&self.store, card, from, to, &mut self.lists, now())?;
        self.message = Some(format!(
            "Moved to {} (next review in {} min)",
            to.title(),
            to.interval_minutes()
        ));

        self.select_next();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::fs;
    use tempfile::TempDir;

    const WORDS: &str = r#"[
        {"word": "走る", "examples": [
            {"sentence": "彼は走る", "romaji": "kare wa hashiru",
             "english": "He runs", "romaji_meaning": "kare=he, wa=topic, hashiru=run"},
            {"sentence": "犬が走る", "romaji": "inu ga hashiru",
             "english": "The dog runs", "romaji_meaning": "inu=dog, ga=subject, hashiru=run"}
        ]}
    ]"#;

    fn press(app: &mut App, c: char) -> anyhow::Result<()> {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn setup(words: Option<&str>) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("words.json");
        if let Some(words) = words {
            fs::write(&input, words).unwrap();
        }
        let app = App::with_paths(dir.path().join("data"), input).unwrap();
        (dir, app)
    }

    #[test]
    fn test_startup_imports_and_offers_first_card() {
        let (_dir, app) = setup(Some(WORDS));
        assert!(app.warning.is_none());
        assert_eq!(app.lists[Bucket::Unknown].len(), 2);

        let (bucket, card) = app.session.current().unwrap();
        assert_eq!(bucket, Bucket::Unknown);
        assert_eq!(card.sentence, "彼は走る");
        assert!(!app.session.is_revealed());
    }

    #[test]
    fn test_missing_source_warns() {
        let (_dir, app) = setup(None);
        assert!(app.warning.as_deref().unwrap().contains("words.json"));
        assert!(app.session.is_idle());
        assert_eq!(app.lists.total(), 0);
    }

    #[test]
    fn test_judgment_requires_reveal() {
        let (_dir, mut app) = setup(Some(WORDS));
        press(&mut app, '1').unwrap();
        assert_eq!(app.lists[Bucket::Difficult].len(), 0);
        assert!(!app.session.is_idle());
    }

    #[test]
    fn test_reveal_then_judge_moves_card() {
        let (_dir, mut app) = setup(Some(WORDS));
        press(&mut app, ' ').unwrap();
        assert!(app.session.is_revealed());

        press(&mut app, '1').unwrap();
        assert_eq!(app.lists[Bucket::Difficult].len(), 1);
        assert_eq!(app.lists[Bucket::Difficult][0].sentence, "彼は走る");
        assert_eq!(app.lists[Bucket::Unknown].len(), 1);
        assert!(app.message.as_deref().unwrap().contains("Difficult"));

        // persisted, and the next due card is already held
        let on_disk = app.store.load_all().unwrap();
        assert_eq!(on_disk, app.lists);
        assert_eq!(app.session.current().unwrap().1.sentence, "犬が走る");
    }

    #[test]
    fn test_idle_once_everything_is_scheduled() {
        let (_dir, mut app) = setup(Some(WORDS));
        press(&mut app, ' ').unwrap();
        press(&mut app, '3').unwrap();
        press(&mut app, ' ').unwrap();
        press(&mut app, '3').unwrap();

        assert_eq!(app.lists[Bucket::Easy].len(), 2);
        assert!(app.session.is_idle());

        press(&mut app, 'r').unwrap();
        assert!(app.session.is_idle());
        assert_eq!(app.lists.total(), 2);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let (_dir, mut app) = setup(Some(WORDS));
        press(&mut app, '?').unwrap();
        assert!(app.show_help);
        press(&mut app, ' ').unwrap();
        assert!(!app.show_help);
        assert!(!app.session.is_revealed());
    }

    #[test]
    fn test_malformed_list_fails_the_cycle() {
        let (_dir, mut app) = setup(Some(WORDS));
        fs::write(app.store.list_path(Bucket::Hard), "not json").unwrap();
        assert!(press(&mut app, 'r').is_err());
    }
}
