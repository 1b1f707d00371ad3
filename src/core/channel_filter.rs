//! Channel name filtering
//!
//! A pattern is a list of entries separated by commas or whitespace:
//!
//! - `Net` matches the channel `Net` exactly
//! - `Gpu*` matches every channel starting with `Gpu`; `*` alone matches all
//! - `-Cdrom` excludes `Cdrom` (the same wildcard rule applies after the `-`)
//!
//! An empty pattern matches everything. When the pattern has at least one
//! include entry a channel must match one of them; a channel matching any
//! exclude entry is always rejected. Matching is case-sensitive.

use super::error::{LoggerError, Result};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    Exact(String),
    Prefix(String),
}

impl Rule {
    fn parse(pattern: &str, entry: &str) -> Result<Self> {
        match entry.find('*') {
            None => Ok(Rule::Exact(entry.to_string())),
            Some(pos) if pos == entry.len() - 1 => Ok(Rule::Prefix(entry[..pos].to_string())),
            Some(_) => Err(LoggerError::filter(
                pattern,
                format!("wildcard must be the last character of '{}'", entry),
            )),
        }
    }

    #[inline]
    fn matches(&self, channel: &str) -> bool {
        match self {
            Rule::Exact(name) => name == channel,
            Rule::Prefix(prefix) => channel.starts_with(prefix.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelFilter {
    pattern: String,
    include: Vec<Rule>,
    exclude: Vec<Rule>,
}

impl ChannelFilter {
    /// A filter that lets every channel through
    pub const fn empty() -> Self {
        Self {
            pattern: String::new(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Parse a filter pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_channel_logger::ChannelFilter;
    ///
    /// let filter = ChannelFilter::parse("Net, Gpu* -GpuShader").unwrap();
    /// assert!(filter.matches("Net"));
    /// assert!(filter.matches("GpuDevice"));
    /// assert!(!filter.matches("GpuShader"));
    /// assert!(!filter.matches("Disk"));
    ///
    /// assert!(ChannelFilter::parse("Ne*t").is_err());
    /// ```
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut filter = Self {
            pattern: pattern.trim().to_string(),
            ..Self::empty()
        };

        let entries = pattern
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|entry| !entry.is_empty());

        for entry in entries {
            match entry.strip_prefix('-') {
                Some("") => {
                    return Err(LoggerError::filter(pattern, "exclusion without a channel name"))
                }
                Some(excluded) => filter.exclude.push(Rule::parse(pattern, excluded)?),
                None => filter.include.push(Rule::parse(pattern, entry)?),
            }
        }

        Ok(filter)
    }

    /// Whether the filter lets `channel` through
    pub fn matches(&self, channel: &str) -> bool {
        if self.exclude.iter().any(|rule| rule.matches(channel)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|rule| rule.matches(channel))
    }

    /// True when the filter has no entries and matches every channel
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// The pattern this filter was parsed from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for ChannelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
