//! the repository's INI-like config file: bareness flag and remote URLs.
//!
//! A full git-config-grammar parser (includes, conditional sections, multi-valued keys,
//! case-insensitive matching) is more than this format needs: just two section shapes
//! and flat `key = value` pairs, so it's hand-rolled instead (see DESIGN.md).

use crate::error::Result;
use crate::lockfile;
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// `(section, subsection) -> key -> value`. `subsection` is `None` for a plain
/// `[section]` header, `Some(name)` for `[section "name"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    sections: BTreeMap<(String, Option<String>), BTreeMap<String, String>>,
}

impl Config {
    pub fn get(&self, section: &str, subsection: Option<&str>, key: &str) -> Option<&str> {
        self.sections.get(&(section.to_owned(), subsection.map(str::to_owned)))?.get(key).map(String::as_str)
    }

    pub fn set(&mut self, section: &str, subsection: Option<&str>, key: &str, value: &str) {
        self.sections
            .entry((section.to_owned(), subsection.map(str::to_owned)))
            .or_default()
            .insert(key.to_owned(), value.to_owned());
    }

    pub fn is_bare(&self) -> bool {
        self.get("core", None, "bare") == Some("true")
    }

    pub fn set_bare(&mut self, bare: bool) {
        self.set("core", None, "bare", if bare { "true" } else { "false" });
    }

    pub fn remote_url(&self, name: &str) -> Option<&str> {
        self.get("remote", Some(name), "url")
    }

    pub fn set_remote_url(&mut self, name: &str, url: &str) {
        self.set("remote", Some(name), "url", url);
    }

    pub fn remotes(&self) -> Vec<String> {
        self.sections
            .keys()
            .filter(|(section, sub)| section == "remote" && sub.is_some())
            .filter_map(|(_, sub)| sub.clone())
            .collect()
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current: Option<(String, Option<String>)> = None;
        for (lineno, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = Some(
                    parse_header(header)
                        .with_context(|| format!("line {}: malformed section header", lineno + 1))?,
                );
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .with_context(|| format!("line {}: expected `key = value`", lineno + 1))?;
            let (section, subsection) = current
                .clone()
                .with_context(|| format!("line {}: key outside any section", lineno + 1))?;
            config
                .sections
                .entry((section, subsection))
                .or_default()
                .insert(key.trim().to_owned(), value.trim().to_owned());
        }
        Ok(config)
    }

    pub fn serialize(&self) -> String {
        let mut buf = String::new();
        for ((section, subsection), entries) in &self.sections {
            match subsection {
                Some(sub) => buf.push_str(&format!("[{} \"{}\"]\n", section, sub)),
                None => buf.push_str(&format!("[{}]\n", section)),
            }
            for (key, value) in entries {
                buf.push_str(&format!("  {} = {}\n", key, value));
            }
        }
        buf
    }

    pub fn read(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        lockfile::write_atomic(path, self.serialize().as_bytes())
    }
}

fn parse_header(header: &str) -> Result<(String, Option<String>)> {
    match header.split_once(' ') {
        None => Ok((header.trim().to_owned(), None)),
        Some((section, rest)) => {
            let sub = rest
                .trim()
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .with_context(|| format!("malformed subsection header `{}`", rest))?;
            Ok((section.trim().to_owned(), Some(sub.to_owned())))
        }
    }
}
