// src/config.rs
// =============================================================================
// Compiled-in configuration for the documentation check.
//
// There is no config file and no environment lookup: the values below are
// built once in main() and handed (by reference) to the walker and the link
// validator. Nothing mutates them after that.
// =============================================================================

use std::collections::BTreeMap;

/// Host that serves the project's repository.
pub const HOSTING_DOMAIN: &str = "github.com";

/// Path prefix of this project's own repository on the hosting domain.
pub const PROJECT_PREFIX: &str = "/google/cadvisor";

/// File and directory names skipped during the walk.
pub const IGNORE_PATTERNS: &[&str] = &[
    "Godeps",
    ".[^.]*", // hidden files and directories
];

/// Only names matching this pattern are checked as documents.
pub const MARKDOWN_PATTERN: &str = "*.md";

/// Where line-anchored links with these titles are expected to point.
const LINE_EXPECTATIONS: &[(&str, &str)] = &[
    ("ContainerInfo struct", "type ContainerInfo struct {"),
    ("MachineInfo struct in the source", "type MachineInfo struct {"),
];

#[derive(Debug, Clone)]
pub struct Config {
    pub hosting_domain: String,
    pub project_prefix: String,
    pub ignore_patterns: Vec<String>,
    pub markdown_pattern: String,
    /// Link title -> literal source text the anchored line must contain.
    pub line_expectations: BTreeMap<String, String>,
    /// Compare line anchors against the files they point at.
    pub verify_lines: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosting_domain: HOSTING_DOMAIN.to_string(),
            project_prefix: PROJECT_PREFIX.to_string(),
            ignore_patterns: IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            markdown_pattern: MARKDOWN_PATTERN.to_string(),
            line_expectations: LINE_EXPECTATIONS
                .iter()
                .map(|(title, line)| (title.to_string(), line.to_string()))
                .collect(),
            verify_lines: false,
        }
    }
}

impl Config {
    pub fn with_verify_lines(mut self, verify_lines: bool) -> Self {
        self.verify_lines = verify_lines;
        self
    }
}
