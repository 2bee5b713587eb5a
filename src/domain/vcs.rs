use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, TimeZone};
use git2::{Repository, Sort};
use std::collections::HashSet;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// The slice of version-control behaviour the pipeline needs.
///
/// One adapter per VCS; [`GitClient`] is the real one, the tests in
/// `export.rs` run against an in-memory fake.
pub trait Vcs {
    /// Full clone of `url` into `dest`.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;

    /// Distinct author display names of commits at or after `since`,
    /// trailing whitespace stripped. The walk is time-sorted and stops at
    /// the first pre-cutoff commit, like git's `--since` pruning; on
    /// histories with non-monotonic committer dates this can still see a
    /// commit the patch query's own pruning skips, which at worst yields an
    /// empty diff file for that author.
    fn log_authors(&self, repo_path: &Path, since: NaiveDate) -> Result<HashSet<String>>;

    /// Concatenated patch text of commits by `author` at or after `since`:
    /// for each commit the author name line followed by the diff body.
    fn log_patches(&self, repo_path: &Path, since: NaiveDate, author: &str) -> Result<String>;
}

/// Git adapter: libgit2 for cloning and history walks, the `git` executable
/// for patch text so the export matches `git log -p` output byte for byte.
pub struct GitClient;

impl Vcs for GitClient {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        Repository::clone(url, dest)
            .with_context(|| format!("cannot clone {url} into {}", dest.display()))?;
        Ok(())
    }

    fn log_authors(&self, repo_path: &Path, since: NaiveDate) -> Result<HashSet<String>> {
        let repo = Repository::open(repo_path)
            .with_context(|| format!("cannot open repo at {}", repo_path.display()))?;
        let cutoff = local_midnight(since).timestamp();

        let mut rw = repo.revwalk().context("revwalk")?;
        rw.push_head()
            .with_context(|| format!("no HEAD in {}", repo_path.display()))?;
        rw.set_sorting(Sort::TIME).context("revwalk sorting")?;

        let mut authors = HashSet::new();
        for id in rw {
            let commit = repo.find_commit(id?)?;
            // --since compares against the committer date; the walk is
            // sorted by it, so everything after the first old commit is
            // old too
            if commit.time().seconds() < cutoff {
                break;
            }
            let name = String::from_utf8_lossy(commit.author().name_bytes())
                .trim_end()
                .to_string();
            authors.insert(name);
        }
        debug!(
            "{}: {} distinct authors since {since}",
            repo_path.display(),
            authors.len()
        );
        Ok(authors)
    }

    fn log_patches(&self, repo_path: &Path, since: NaiveDate, author: &str) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(repo_path)
            .args([
                "log",
                &format!("--since={since}"),
                "--pretty=tformat:%an",
                "-p",
                &format!("--author={author}"),
            ])
            .output()
            .with_context(|| format!("cannot run git log in {}", repo_path.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "git log failed in {} ({}): {}",
                repo_path.display(),
                output.status,
                stderr.trim_end()
            );
        }

        // Commit content is not guaranteed to be valid UTF-8; substitute
        // replacement markers instead of failing the whole export.
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn local_midnight(date: NaiveDate) -> chrono::DateTime<Local> {
    Local
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
        .unwrap()
}
