//! Git synchronization of the data directory via libgit2.
//!
//! The sequence per run is pull (fetch + fast-forward) before records are
//! read, then commit + push after they are written. Anything that is not a
//! fast-forward is reported as an error; there is no merge.

use std::path::{Path, PathBuf};

use chrono::Local;
use git2::build::CheckoutBuilder;
use git2::{Cred, ErrorCode, FetchOptions, PushOptions, Remote, RemoteCallbacks, Repository, Signature};
use tracing::{debug, info};

use crate::model::GitConfig;

const REMOTE: &str = "origin";

/// Error type for git synchronization
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{path} is not a git repository: {source}")]
    NotARepository { path: PathBuf, source: git2::Error },
    #[error("HEAD is detached; check out a branch in the data directory")]
    DetachedHead,
    #[error("cannot fast-forward {branch}: local and remote history diverged")]
    Diverged { branch: String },
    #[error("git: {0}")]
    Git(#[from] git2::Error),
}

pub struct GitSync {
    repo: Repository,
    git: GitConfig,
}

impl GitSync {
    pub fn open(workdir: &Path, git: GitConfig) -> Result<Self, SyncError> {
        let repo = Repository::open(workdir).map_err(|e| SyncError::NotARepository {
            path: workdir.to_path_buf(),
            source: e,
        })?;
        Ok(GitSync { repo, git })
    }

    /// Name of the branch HEAD points at, even before the first commit.
    fn branch(&self) -> Result<String, SyncError> {
        let head = self.repo.find_reference("HEAD")?;
        let target = head.symbolic_target().ok_or(SyncError::DetachedHead)?;
        Ok(target.trim_start_matches("refs/heads/").to_string())
    }

    fn origin(&self) -> Result<Option<Remote<'_>>, SyncError> {
        match self.repo.find_remote(REMOTE) {
            Ok(remote) => Ok(Some(remote)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Credentials from config; a second request means the first was
    /// rejected, so bail instead of letting libgit2 retry forever.
    fn callbacks(&self) -> RemoteCallbacks<'static> {
        let username = self.git.username.clone();
        let token = self.git.token.clone();
        let mut attempts = 0u32;
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |_url, _user, _allowed| {
            attempts += 1;
            if attempts > 1 {
                return Err(git2::Error::from_str("credentials rejected by remote"));
            }
            Cred::userpass_plaintext(&username, &token)
        });
        callbacks
    }

    /// Fetch from origin and fast-forward the current branch.
    pub fn pull(&self) -> Result<(), SyncError> {
        let Some(mut remote) = self.origin()? else {
            debug!("no {REMOTE} remote, skipping pull");
            return Ok(());
        };
        let branch = self.branch()?;
        let mut fetch = FetchOptions::new();
        fetch.remote_callbacks(self.callbacks());
        remote.fetch::<&str>(&[], Some(&mut fetch), None)?;

        let tracking = format!("refs/remotes/{REMOTE}/{branch}");
        let reference = match self.repo.find_reference(&tracking) {
            Ok(r) => r,
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!(%branch, "remote has no such branch yet");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let fetched = self.repo.reference_to_annotated_commit(&reference)?;
        let (analysis, _) = self.repo.merge_analysis(&[&fetched])?;

        if analysis.is_up_to_date() {
            debug!(%branch, "already up to date");
            return Ok(());
        }
        if !(analysis.is_fast_forward() || analysis.is_unborn()) {
            return Err(SyncError::Diverged { branch });
        }

        let local = format!("refs/heads/{branch}");
        match self.repo.find_reference(&local) {
            Ok(mut r) => {
                r.set_target(fetched.id(), "tally: fast-forward")?;
            }
            Err(_) => {
                self.repo
                    .reference(&local, fetched.id(), true, "tally: fast-forward")?;
            }
        }
        self.repo.set_head(&local)?;
        self.repo
            .checkout_head(Some(CheckoutBuilder::default().force()))?;
        info!(%branch, "fast-forwarded to {}", fetched.id());
        Ok(())
    }

    /// Stage `file` (relative to the work tree) and commit it. Returns
    /// `false` when the tree did not change.
    pub fn commit(&self, file: &Path) -> Result<bool, SyncError> {
        let mut index = self.repo.index()?;
        index.add_path(file)?;
        index.write()?;
        let tree_id = index.write_tree()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(e.into()),
        };
        if parent.as_ref().is_some_and(|p| p.tree_id() == tree_id) {
            debug!("nothing to commit");
            return Ok(false);
        }

        let tree = self.repo.find_tree(tree_id)?;
        let signature = Signature::now(&self.git.username, &self.git.mail)?;
        let message = format!(
            "tally: update records ({})",
            Local::now().format("%Y-%m-%d %H:%M")
        );
        let parents: Vec<_> = parent.iter().collect();
        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, &message, &tree, &parents)?;
        debug!(%oid, "created commit");
        Ok(true)
    }

    /// Push the current branch to origin.
    pub fn push(&self) -> Result<(), SyncError> {
        let Some(mut remote) = self.origin()? else {
            debug!("no {REMOTE} remote, skipping push");
            return Ok(());
        };
        let branch = self.branch()?;
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");

        let mut callbacks = self.callbacks();
        callbacks.push_update_reference(|refname, status| match status {
            Some(message) => Err(git2::Error::from_str(&format!(
                "push of {refname} rejected: {message}"
            ))),
            None => Ok(()),
        });
        let mut push = PushOptions::new();
        push.remote_callbacks(callbacks);
        remote.push(&[refspec.as_str()], Some(&mut push))?;
        info!(%branch, "pushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn git_config() -> GitConfig {
        GitConfig {
            username: "tester".into(),
            mail: "tester@example.com".into(),
            token: String::new(),
        }
    }

    #[test]
    fn open_outside_repository_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            GitSync::open(tmp.path(), git_config()),
            Err(SyncError::NotARepository { .. })
        ));
    }

    #[test]
    fn commit_only_when_tree_changes() {
        let tmp = TempDir::new().unwrap();
        let repo = Repository::init(tmp.path()).unwrap();
        let sync = GitSync::open(tmp.path(), git_config()).unwrap();

        fs::write(tmp.path().join("records.toml"), "next_task_index = 1\n").unwrap();
        assert!(sync.commit(Path::new("records.toml")).unwrap());
        assert!(!sync.commit(Path::new("records.toml")).unwrap());

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert!(head.message().unwrap().starts_with("tally: update records"));
        assert_eq!(head.author().name(), Some("tester"));
    }

    #[test]
    fn pull_and_push_without_remote_are_noops() {
        let tmp = TempDir::new().unwrap();
        Repository::init(tmp.path()).unwrap();
        let sync = GitSync::open(tmp.path(), git_config()).unwrap();
        sync.pull().unwrap();
        sync.push().unwrap();
    }

    #[test]
    fn push_then_pull_through_bare_remote() {
        let tmp = TempDir::new().unwrap();
        let remote_dir = tmp.path().join("remote.git");
        Repository::init_bare(&remote_dir).unwrap();
        let url = remote_dir.to_string_lossy().into_owned();

        let first = tmp.path().join("first");
        let repo = Repository::init(&first).unwrap();
        repo.remote(REMOTE, &url).unwrap();
        let writer = GitSync::open(&first, git_config()).unwrap();
        fs::write(first.join("records.toml"), "next_task_index = 1\n").unwrap();
        writer.commit(Path::new("records.toml")).unwrap();
        writer.push().unwrap();

        let second = tmp.path().join("second");
        Repository::clone(&url, &second).unwrap();
        let reader = GitSync::open(&second, git_config()).unwrap();

        fs::write(first.join("records.toml"), "next_task_index = 2\n").unwrap();
        writer.commit(Path::new("records.toml")).unwrap();
        writer.push().unwrap();

        reader.pull().unwrap();
        let text = fs::read_to_string(second.join("records.toml")).unwrap();
        assert_eq!(text, "next_task_index = 2\n");
    }
}
