//! Walk the per-user part of a dump and decode what it contains.
//!
//! [`DumpTraversal`] is a lazy iterator over `U/`:
//!
//! 1. every subdirectory of `U` is a user;
//! 2. every regular file directly inside a user directory is decoded
//!    (names without a schema come out as [`Outcome::Skipped`]);
//! 3. user subdirectories whose name starts with six digits are sessions,
//!    anything else is ignored;
//! 4. each category directory inside a session is handed to the
//!    [`CategoryHandler`](crate::dump::category::CategoryHandler) registered
//!    for its name; categories without a handler are ignored.
//!
//! Work is expanded one directory at a time, so nothing is read before the
//! caller asks for the next item. Failures never stop the walk: a file that
//! does not decode is an [`Outcome::Failed`] item, and a directory that
//! cannot be listed is reported once and its branch is dropped.
//!
//! Directory order is whatever the file system returns.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::dump::category::HandlerSet;
use crate::dump::decoder::decode_file;
use crate::dump::layout::{is_session_id, USERS_DIR};
use crate::dump::record::Record;
use crate::dump::sports::{SportReference, SportsIndex};
use crate::util::fs::{list_dirs, list_files};
use crate::PolarError;

/// Where in the dump an item was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub user: Option<String>,
    pub session: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug)]
pub enum Outcome {
    Decoded {
        record: Record,
        references: Vec<SportReference>,
    },
    /// The file name has no schema.
    Skipped,
    Failed(PolarError),
}

#[derive(Debug)]
pub struct DumpItem {
    pub path: PathBuf,
    pub scope: Scope,
    pub outcome: Outcome,
}

impl DumpItem {
    pub fn record(&self) -> Option<&Record> {
        match &self.outcome {
            Outcome::Decoded { record, .. } => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PolarError> {
        match &self.outcome {
            Outcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

enum Task {
    Users(PathBuf),
    User { dir: PathBuf, scope: Scope },
    Session { dir: PathBuf, scope: Scope },
    Category { dir: PathBuf, scope: Scope },
    Decode { path: PathBuf, scope: Scope },
    Emit(DumpItem),
}

/// Lazy, single-pass walk over a dump's user data.
pub struct DumpTraversal<'a> {
    sports: &'a SportsIndex,
    handlers: &'a HandlerSet,
    pending: VecDeque<Task>,
}

impl<'a> DumpTraversal<'a> {
    /// Walk `<dump_root>/U` with the built-in category handlers.
    pub fn new(dump_root: &Path, sports: &'a SportsIndex) -> Self {
        Self::with_handlers(dump_root, sports, HandlerSet::builtin())
    }

    pub fn with_handlers(dump_root: &Path, sports: &'a SportsIndex, handlers: &'a HandlerSet) -> Self {
        let mut pending = VecDeque::new();
        pending.push_back(Task::Users(dump_root.join(USERS_DIR)));
        DumpTraversal {
            sports,
            handlers,
            pending,
        }
    }

    /// Walk a single user directory, e.g. one branch of a parallel walk.
    pub fn for_user(
        user_dir: PathBuf,
        user: &str,
        sports: &'a SportsIndex,
        handlers: &'a HandlerSet,
    ) -> Self {
        let mut pending = VecDeque::new();
        pending.push_back(Task::User {
            dir: user_dir,
            scope: Scope {
                user: Some(user.to_string()),
                ..Scope::default()
            },
        });
        DumpTraversal {
            sports,
            handlers,
            pending,
        }
    }

    /// Queue `children` ahead of everything else, keeping their order.
    fn push_children(&mut self, children: Vec<Task>) {
        for task in children.into_iter().rev() {
            self.pending.push_front(task);
        }
    }

    fn expand_users(&mut self, users_dir: PathBuf) {
        debug!("Looking for user data in {}", users_dir.display());
        let children = match list_dirs(&users_dir) {
            Ok(users) => users
                .into_iter()
                .map(|user| Task::User {
                    dir: users_dir.join(&user),
                    scope: Scope {
                        user: Some(user),
                        ..Scope::default()
                    },
                })
                .collect(),
            Err(e) => vec![enumeration_failure(users_dir, Scope::default(), e)],
        };
        self.push_children(children);
    }

    fn expand_user(&mut self, dir: PathBuf, scope: Scope) {
        debug!("Parsing {}", dir.display());

        let files = match list_files(&dir) {
            Ok(f) => f,
            Err(e) => return self.push_children(vec![enumeration_failure(dir, scope, e)]),
        };
        let mut children: Vec<Task> = files
            .into_iter()
            .map(|f| Task::Decode {
                path: dir.join(f),
                scope: scope.clone(),
            })
            .collect();

        match list_dirs(&dir) {
            Ok(subdirs) => {
                let (sessions, other): (Vec<String>, Vec<String>) =
                    subdirs.into_iter().partition(|d| is_session_id(d));
                debug!("Found session dirs: {:?}", sessions);
                if !other.is_empty() {
                    debug!("Ignoring non-session dirs: {:?}", other);
                }
                children.extend(sessions.into_iter().map(|session| Task::Session {
                    dir: dir.join(&session),
                    scope: Scope {
                        session: Some(session),
                        ..scope.clone()
                    },
                }));
            }
            Err(e) => children.push(enumeration_failure(dir, scope, e)),
        }
        self.push_children(children);
    }

    fn expand_session(&mut self, dir: PathBuf, scope: Scope) {
        debug!("Parsing {}", dir.display());
        let children = match list_dirs(&dir) {
            Ok(categories) => {
                debug!("Found dirs: {:?}", categories);
                categories
                    .into_iter()
                    .filter(|c| {
                        let known = self.handlers.get(c).is_some();
                        if !known {
                            debug!("No handler for category {}", c);
                        }
                        known
                    })
                    .map(|category| Task::Category {
                        dir: dir.join(&category),
                        scope: Scope {
                            category: Some(category),
                            ..scope.clone()
                        },
                    })
                    .collect()
            }
            Err(e) => vec![enumeration_failure(dir, scope, e)],
        };
        self.push_children(children);
    }

    fn expand_category(&mut self, dir: PathBuf, scope: Scope) {
        let handler = match scope.category.as_deref().and_then(|c| self.handlers.get(c)) {
            Some(h) => h,
            None => return,
        };
        let children = handler
            .targets(&dir)
            .into_iter()
            .map(|target| match target {
                Ok(path) => Task::Decode {
                    path,
                    scope: scope.clone(),
                },
                Err(e) => enumeration_failure(dir.clone(), scope.clone(), e),
            })
            .collect();
        self.push_children(children);
    }

    fn decode(&self, path: PathBuf, scope: Scope) -> DumpItem {
        let outcome = match decode_file(&path) {
            Ok(record) => {
                let references = match scope.category.as_deref().and_then(|c| self.handlers.get(c)) {
                    Some(handler) => handler.references(&record, self.sports),
                    None => record
                        .sport_ids()
                        .into_iter()
                        .map(|id| self.sports.resolve(id))
                        .collect(),
                };
                Outcome::Decoded { record, references }
            }
            Err(e) if e.is_skip() => Outcome::Skipped,
            Err(e) => {
                warn!("{}", e);
                Outcome::Failed(e)
            }
        };
        DumpItem {
            path,
            scope,
            outcome,
        }
    }
}

impl Iterator for DumpTraversal<'_> {
    type Item = DumpItem;

    fn next(&mut self) -> Option<DumpItem> {
        loop {
            match self.pending.pop_front()? {
                Task::Users(dir) => self.expand_users(dir),
                Task::User { dir, scope } => self.expand_user(dir, scope),
                Task::Session { dir, scope } => self.expand_session(dir, scope),
                Task::Category { dir, scope } => self.expand_category(dir, scope),
                Task::Decode { path, scope } => return Some(self.decode(path, scope)),
                Task::Emit(item) => return Some(item),
            }
        }
    }
}

fn enumeration_failure(dir: PathBuf, scope: Scope, error: PolarError) -> Task {
    warn!("{}", error);
    let path = match &error {
        PolarError::DirectoryEnumeration { path, .. } => path.clone(),
        _ => dir,
    };
    Task::Emit(DumpItem {
        path,
        scope,
        outcome: Outcome::Failed(error),
    })
}

/// Walk every user directory in parallel.
///
/// Each user branch is an independent [`DumpTraversal`] collecting into its
/// own `Vec`; the index and handlers are only read. Branch results are
/// concatenated in user enumeration order.
#[cfg(feature = "cli")]
pub fn traverse_parallel(
    dump_root: &Path,
    sports: &SportsIndex,
    handlers: &HandlerSet,
) -> Vec<DumpItem> {
    use rayon::prelude::*;

    let users_dir = dump_root.join(USERS_DIR);
    let users = match list_dirs(&users_dir) {
        Ok(u) => u,
        Err(e) => {
            warn!("{}", e);
            return vec![DumpItem {
                path: users_dir,
                scope: Scope::default(),
                outcome: Outcome::Failed(e),
            }];
        }
    };

    let branches: Vec<Vec<DumpItem>> = users
        .par_iter()
        .map(|user| {
            DumpTraversal::for_user(users_dir.join(user), user, sports, handlers).collect()
        })
        .collect();
    branches.into_iter().flatten().collect()
}
