pub mod urls;
pub mod vcs;
