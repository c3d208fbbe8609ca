// One page session: the opened store plus the loaded config
//
// This is the explicit home for everything the widgets share. The UI
// layer holds exactly one of these and threads it through render and
// update paths instead of reaching for globals.

use crate::lists::{Bookmarks, Todos};
use crate::{keys, Config, Result};
use startpage_store::Store;

pub struct PageSession {
    store: Store,
    config: Config,
}

impl PageSession {
    /// Open the on-disk store described by `config`
    pub fn init(config: Config) -> Result<Self> {
        let db_path = config.db_path()?;
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::debug!("Opening store at {}", db_path.display());
        let store = Store::open(&db_path)?;
        Ok(Self { store, config })
    }

    /// Session over an in-memory store, for tests
    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Store::open_in_memory()?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bookmarks(&self) -> Bookmarks<'_> {
        Bookmarks::new(&self.store)
    }

    pub fn todos(&self) -> Todos<'_> {
        Todos::new(&self.store)
    }

    /// The note editor's content blob; empty string when never saved
    pub fn note(&self) -> String {
        self.store.load(keys::NOTE_CONTENT, String::new())
    }

    pub fn save_note(&self, content: &str) -> Result<()> {
        self.store.save(keys::NOTE_CONTENT, &content.to_string())?;
        Ok(())
    }

    /// Destructive: drop the note blob (caller confirms first)
    pub fn clear_note(&self) -> Result<()> {
        tracing::info!("Clearing note content");
        self.store.delete(keys::NOTE_CONTENT)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_round_trip() {
        let session = PageSession::in_memory(Config::default()).unwrap();
        assert_eq!(session.note(), "");

        session.save_note("# scratch\nsome **bold** text").unwrap();
        assert_eq!(session.note(), "# scratch\nsome **bold** text");

        session.clear_note().unwrap();
        assert_eq!(session.note(), "");
    }

    #[test]
    fn test_widgets_are_independent_keys() {
        let session = PageSession::in_memory(Config::default()).unwrap();
        session.bookmarks().add("Example", "https://example.com").unwrap();
        session.todos().add("task").unwrap();
        session.save_note("note").unwrap();

        // Resetting one widget leaves the others alone
        session.bookmarks().reset().unwrap();
        assert!(session.bookmarks().all().is_empty());
        assert_eq!(session.todos().all().len(), 1);
        assert_eq!(session.note(), "note");
    }
}
