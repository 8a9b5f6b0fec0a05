//! JSON-file backed score store with local accounts.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::{Player, ScoreStore};
use crate::document::{ScoreDocument, UserRecord};
use crate::error::StoreError;

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based.
    pub rank: usize,
    pub username: String,
    pub high_score: u32,
    /// This row belongs to the logged-in user.
    pub is_current: bool,
}

/// Score store persisted as a single JSON document.
///
/// Every mutation rewrites the whole file: the document is serialized into a
/// sibling temp file which is then renamed over the target, so a crash never
/// leaves a half-written store behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    doc: ScoreDocument,
}

impl JsonFileStore {
    /// Load the store at `path`. A missing (or empty) file starts a fresh
    /// document seeded with the demo account; malformed JSON is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let doc = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => ScoreDocument::seeded(),
            Ok(text) => {
                let mut doc: ScoreDocument =
                    serde_json::from_str(&text).map_err(|source| StoreError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                if doc.users.is_empty() {
                    doc.users = ScoreDocument::seeded().users;
                }
                doc
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "score store not found, starting fresh");
                ScoreDocument::seeded()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self { path, doc })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &ScoreDocument {
        &self.doc
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.doc.users
    }

    /// Write the document to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        self.write(&self.doc)
    }

    /// Persist `doc` and only then adopt it, so a failed write leaves the
    /// in-memory document matching the file.
    fn commit(&mut self, doc: ScoreDocument) -> Result<(), StoreError> {
        self.write(&doc)?;
        self.doc = doc;
        Ok(())
    }

    fn write(&self, doc: &ScoreDocument) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(doc)?;
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let tmp = tmp_path(&self.path);
        let mut file = fs::File::create(&tmp).map_err(io_err)?;
        file.write_all(&json).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }

    /// Create an account and log it in.
    pub fn sign_up(
        &mut self,
        username: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Player, StoreError> {
        if password != confirm {
            return Err(StoreError::PasswordMismatch);
        }
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(StoreError::EmptyPassword);
        }
        if self.doc.user(username).is_some() {
            return Err(StoreError::UsernameTaken(username.to_string()));
        }

        let mut doc = self.doc.clone();
        doc.users.push(UserRecord {
            username: username.to_string(),
            password: password.to_string(),
            high_score: 0,
        });
        doc.current_user = Some(username.to_string());
        self.commit(doc)?;

        info!(username, "account created");
        Ok(Player::user(username))
    }

    pub fn log_in(&mut self, username: &str, password: &str) -> Result<Player, StoreError> {
        let user = self
            .doc
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .ok_or(StoreError::InvalidCredentials)?;
        let player = Player::user(user.username.clone());

        let mut doc = self.doc.clone();
        doc.current_user = Some(user.username.clone());
        self.commit(doc)?;

        info!(username, "logged in");
        Ok(player)
    }

    /// Forget the logged-in user. A no-op when nobody is logged in.
    pub fn log_out(&mut self) -> Result<(), StoreError> {
        if let Some(username) = self.doc.current_user.clone() {
            let mut doc = self.doc.clone();
            doc.current_user = None;
            self.commit(doc)?;
            info!(username = %username, "logged out");
        }
        Ok(())
    }

    /// The logged-in user, or anonymous. A `currentUser` that names no
    /// account is treated as anonymous.
    pub fn current_player(&self) -> Player {
        self.doc
            .current_user
            .as_deref()
            .filter(|name| self.doc.user(name).is_some())
            .map(Player::user)
            .unwrap_or_default()
    }

    /// All accounts by high score, best first. Ties keep sign-up order.
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut users: Vec<&UserRecord> = self.doc.users.iter().collect();
        users.sort_by(|a, b| b.high_score.cmp(&a.high_score));

        let current = self.doc.current_user.as_deref();
        users
            .into_iter()
            .enumerate()
            .map(|(i, user)| LeaderboardEntry {
                rank: i + 1,
                username: user.username.clone(),
                high_score: user.high_score,
                is_current: current == Some(user.username.as_str()),
            })
            .collect()
    }

    fn stored_best(&self, player: &Player) -> u32 {
        match player {
            Player::Anonymous => self.doc.best_score,
            Player::User(name) => self.doc.user(name).map_or(0, |u| u.high_score),
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn load_best_score(&mut self, player: &Player) -> u32 {
        self.stored_best(player)
    }

    fn persist_best_score(&mut self, player: &Player, score: u32) {
        if score <= self.stored_best(player) {
            return;
        }
        match player {
            Player::Anonymous => self.doc.best_score = score,
            Player::User(name) => match self.doc.user_mut(name) {
                Some(user) => user.high_score = score,
                None => {
                    warn!(username = %name, score, "best score for unknown account dropped");
                    return;
                }
            },
        }

        if let Err(err) = self.save() {
            warn!(error = %err, "failed to persist best score");
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "scores.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
