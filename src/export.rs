use crate::config::{Config, Group};
use crate::domain::urls::repo_name;
use crate::domain::vcs::Vcs;
use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Commits by this identity are tooling noise, never a contestant.
const BOT_AUTHOR: &str = "x-m-el";

/// Everything one run needs: the parsed config, a VCS adapter and the paths
/// and cutoff that would otherwise live in ambient globals. Tests inject
/// temporary directories and a fake [`Vcs`] here.
pub struct Context<V> {
    pub config: Config,
    pub vcs: V,
    pub repos_dir: PathBuf,
    pub out_dir: PathBuf,
    pub since: NaiveDate,
}

impl<V: Vcs> Context<V> {
    /// Full pipeline: clone what is missing, then rebuild every author's
    /// diff file from scratch.
    pub fn run(&self) -> Result<()> {
        self.clone_missing()?;
        for (group, repos) in self.config.groups() {
            let authors = self.authors_in_group(group, repos)?;
            info!("{group}: {} authors since {}", authors.len(), self.since);
            for author in &authors {
                self.export_author(group, repos, author)?;
            }
        }
        Ok(())
    }

    /// Ensure a local clone exists at `repos_dir/<group>/<name>` for every
    /// configured repository. An existing directory is trusted as-is; there
    /// is no freshness check and no fetch.
    pub fn clone_missing(&self) -> Result<()> {
        for (group, repos) in self.config.groups() {
            for url in &repos.repo {
                let path = self.repo_path(group, url)?;
                if path.is_dir() {
                    debug!("{} already cloned", path.display());
                    continue;
                }
                info!("cloning {url} into {}", path.display());
                self.vcs.clone_repo(url, &path)?;
            }
        }
        Ok(())
    }

    /// Distinct human authors with commits in the window, across all of the
    /// group's repositories.
    pub fn authors_in_group(&self, group: &str, repos: &Group) -> Result<HashSet<String>> {
        let mut authors = HashSet::new();
        for url in &repos.repo {
            let path = self.repo_path(group, url)?;
            authors.extend(self.vcs.log_authors(&path, self.since)?);
        }
        // Some system user thing?
        authors.remove(BOT_AUTHOR);
        authors.remove("");
        Ok(authors)
    }

    /// Rebuild `out_dir/<group>/<author>.diff`: the author's patch text from
    /// every repository of the group, concatenated in config order. An
    /// author with zero matching commits still gets the (empty) file.
    pub fn export_author(&self, group: &str, repos: &Group, author: &str) -> Result<()> {
        let dir = self.out_dir.join(group);
        fs::create_dir_all(&dir)
            .with_context(|| format!("cannot create {}", dir.display()))?;
        let path = dir.join(format!("{author}.diff"));
        if path.is_file() {
            fs::remove_file(&path)
                .with_context(|| format!("cannot remove stale {}", path.display()))?;
        }

        let mut contrib = String::new();
        for url in &repos.repo {
            let repo_path = self.repo_path(group, url)?;
            contrib.push_str(&self.vcs.log_patches(&repo_path, self.since, author)?);
        }

        // Stage next to the final path and rename on success, so an aborted
        // run never leaves a half-written diff behind.
        let tmp = dir.join(format!("{author}.diff.tmp"));
        fs::write(&tmp, &contrib)
            .with_context(|| format!("cannot write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("cannot move {} into place", tmp.display()))?;

        info!("wrote {} ({} bytes)", path.display(), contrib.len());
        Ok(())
    }

    fn repo_path(&self, group: &str, url: &str) -> Result<PathBuf> {
        Ok(self.repos_dir.join(group).join(repo_name(url)?))
    }
}
