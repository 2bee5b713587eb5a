use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One reporting bucket: a team and the repositories it worked on.
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    pub repo: Vec<String>,
}

/// The whole config document: group name → repositories, e.g.
///
/// ```yaml
/// backend:
///   repo:
///     - https://example.com/org/service-a.git
///     - https://example.com/org/service-b.git
/// ```
///
/// Loaded once at startup and never written back.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Config(pub BTreeMap<String, Group>);

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("malformed config in {}", path.display()))
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &Group)> {
        self.0.iter().map(|(name, group)| (name.as_str(), group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
backend:
  repo:
    - https://example.com/org/service-a.git
    - https://example.com/org/service-b.git
frontend:
  repo:
    - https://example.com/org/web.git
";

    #[test]
    fn parses_groups_and_repo_lists() {
        let cfg: Config = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(cfg.0.len(), 2);
        assert_eq!(cfg.0["backend"].repo.len(), 2);
        assert_eq!(cfg.0["frontend"].repo[0], "https://example.com/org/web.git");
    }

    #[test]
    fn load_reads_a_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, SAMPLE).unwrap();

        let cfg = Config::load(&path).unwrap();
        let groups: Vec<_> = cfg.groups().map(|(name, _)| name).collect();
        assert_eq!(groups, ["backend", "frontend"]);
    }

    #[test]
    fn load_reports_a_missing_file() {
        let err = Config::load(Path::new("/no/such/config.yml")).unwrap_err();
        assert!(err.to_string().contains("cannot read config file"));
    }

    #[test]
    fn load_reports_a_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "backend: [not, a, mapping").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("malformed config"));
    }

    #[test]
    fn group_without_repo_list_is_a_parse_error() {
        let err = serde_yaml::from_str::<Config>("backend: {}").unwrap_err();
        assert!(err.to_string().contains("repo"));
    }
}
