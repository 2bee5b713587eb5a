use anyhow::{bail, Result};

/// Short repository name from a clone URL ending in `/<name>.git`.
///
/// The name doubles as the clone's directory name, so anything that does not
/// match that shape is refused outright rather than guessed at.
pub fn repo_name(url: &str) -> Result<&str> {
    let name = url
        .rsplit_once('/')
        .and_then(|(_, last)| last.strip_suffix(".git"))
        .filter(|name| !name.is_empty());
    match name {
        Some(name) => Ok(name),
        None => bail!("repo URL does not end in /<name>.git: {url}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_path_and_suffix() {
        assert_eq!(
            repo_name("https://example.com/org/demo.git").unwrap(),
            "demo"
        );
        assert_eq!(repo_name("git@host:a/b/tool.git").unwrap(), "tool");
    }

    #[test]
    fn keeps_inner_dots_in_the_name() {
        assert_eq!(repo_name("https://host/org/site.git.git").unwrap(), "site.git");
        assert_eq!(repo_name("https://host/org/v2.0.git").unwrap(), "v2.0");
    }

    #[test]
    fn refuses_urls_without_the_git_suffix() {
        assert!(repo_name("https://example.com/org/demo").is_err());
        assert!(repo_name("https://example.com/org/demo.git/").is_err());
    }

    #[test]
    fn refuses_urls_without_a_slash_or_name() {
        assert!(repo_name("demo.git").is_err());
        assert!(repo_name("https://example.com/.git").is_err());
        assert!(repo_name("").is_err());
    }
}
