//! Path stemming
//!
//! Rewrites Windows paths into architecture-aware symbolic forms so that
//! command lines from different machines compare equal:
//!
//! | alias      | stands for                                        |
//! |------------|---------------------------------------------------|
//! | `?sys32`   | the 32-bit system directory                       |
//! | `?sys64`   | the 64-bit system directory (x86_64 only)         |
//! | `?pf86`    | the 32-bit Program Files directory                |
//! | `?pf64`    | the 64-bit Program Files directory (x86_64 only)  |
//! | `?usrtmp\` | a user's `AppData\Local\Temp\` directory          |
//! | `?usr\`    | a user's profile directory                        |
//! | `?win\`    | the Windows directory                             |
//! | `?c\`      | the system drive                                  |
//! | `{guid}`   | any GUID, with or without braces                  |
//!
//! Rules are applied in order to the lower-cased path. Order matters: the
//! system drive rule would otherwise eat the prefix of every narrower rule.
//! Both drive and Windows directory patterns accept an optional NT device
//! prefix (`\??\` or `\?\`).

use crate::wincmd::error::ConfigError;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

const SYSTEM_DRIVE: &str = r"(\\\?\?\\|\\\?\\)?c:\\";
const SYSTEM_ROOT: &str = r"(\\\?\?\\|\\\?\\)?c:\\windows\\";
const USER_TEMP: &str = r"users\\[^\\]+\\appdata\\local\\temp\\";
const USER: &str = r"users\\[^\\]+\\";
const GUID: &str = r"[{]?[0-9a-fA-F]{8}-([0-9a-fA-F]{4}-){3}[0-9a-fA-F]{12}[}]?";

/// Host architecture whose directory layout the aliases follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
    #[serde(rename = "x86")]
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X86_64 => "x86_64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86" => Ok(Architecture::X86),
            "x86_64" => Ok(Architecture::X86_64),
            other => Err(ConfigError::InvalidArchitecture(other.to_string())),
        }
    }
}

/// Directory names as they appear on a given architecture. On x86 there is a
/// single Program Files and a single system directory, both of which get the
/// 32-bit aliases.
struct Layout {
    program_files_32: &'static str,
    program_files_64: Option<&'static str>,
    system_32: &'static str,
    system_64: Option<&'static str>,
}

impl Layout {
    fn of(architecture: Architecture) -> Self {
        match architecture {
            Architecture::X86_64 => Layout {
                program_files_32: r"program files \(x86\)",
                program_files_64: Some("program files"),
                system_32: "syswow64",
                system_64: Some("system32"),
            },
            Architecture::X86 => Layout {
                program_files_32: "program files",
                program_files_64: None,
                system_32: "system32",
                system_64: None,
            },
        }
    }
}

/// A compiled pattern and the literal text that replaces its matches.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Rule {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    /// Short name of the alias this rule produces, e.g. `pf64`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &'static str {
        self.replacement
    }

    /// Replace every match in `path`, or `None` if nothing matched.
    fn apply(&self, path: &str) -> Option<String> {
        if !self.pattern.is_match(path) {
            return None;
        }
        Some(
            self.pattern
                .replace_all(path, NoExpand(self.replacement))
                .into_owned(),
        )
    }
}

/// Build the ordered rule list for an architecture.
///
/// The 64-bit aliases only exist on x86_64. Every pattern is a constant, so
/// this cannot fail.
pub fn rules_for(architecture: Architecture) -> Vec<Rule> {
    let layout = Layout::of(architecture);
    let mut rules = vec![Rule::new(
        "sys32",
        &format!("{SYSTEM_ROOT}{}", layout.system_32),
        "?sys32",
    )];
    if let Some(system_64) = layout.system_64 {
        rules.push(Rule::new(
            "sys64",
            &format!("{SYSTEM_ROOT}{system_64}"),
            "?sys64",
        ));
    }
    rules.push(Rule::new(
        "pf86",
        &format!("{SYSTEM_DRIVE}{}", layout.program_files_32),
        "?pf86",
    ));
    if let Some(program_files_64) = layout.program_files_64 {
        rules.push(Rule::new(
            "pf64",
            &format!("{SYSTEM_DRIVE}{program_files_64}"),
            "?pf64",
        ));
    }
    rules.extend([
        Rule::new("usrtmp", &format!("{SYSTEM_DRIVE}{USER_TEMP}"), r"?usrtmp\"),
        Rule::new("usr", &format!("{SYSTEM_DRIVE}{USER}"), r"?usr\"),
        Rule::new("win", SYSTEM_ROOT, r"?win\"),
        Rule::new("c", SYSTEM_DRIVE, r"?c\"),
        Rule::new("guid", GUID, "{guid}"),
    ]);
    rules
}

static X86_NORMALIZER: Lazy<PathNormalizer> =
    Lazy::new(|| PathNormalizer::for_architecture(Architecture::X86));
static X86_64_NORMALIZER: Lazy<PathNormalizer> =
    Lazy::new(|| PathNormalizer::for_architecture(Architecture::X86_64));

/// Canonicalizes Windows paths with the rules of one architecture.
///
/// Immutable once built, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    architecture: Architecture,
    rules: Vec<Rule>,
}

impl PathNormalizer {
    /// Build a normalizer from an architecture literal (`x86` or `x86_64`).
    pub fn new(architecture: &str) -> Result<Self, ConfigError> {
        Ok(Self::for_architecture(architecture.parse()?))
    }

    pub fn for_architecture(architecture: Architecture) -> Self {
        PathNormalizer {
            architecture,
            rules: rules_for(architecture),
        }
    }

    /// Process-wide normalizer for an architecture, built on first use.
    pub fn shared(architecture: Architecture) -> &'static PathNormalizer {
        match architecture {
            Architecture::X86 => &X86_NORMALIZER,
            Architecture::X86_64 => &X86_64_NORMALIZER,
        }
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Lower-case `path` and run every rule over it in order.
    pub fn normalize_path(&self, path: &str) -> String {
        let mut path = path.to_lowercase();
        for rule in &self.rules {
            if let Some(rewritten) = rule.apply(&path) {
                trace!(rule = rule.name, from = %path, to = %rewritten, "path rule applied");
                path = rewritten;
            }
        }
        path
    }
}

impl Default for PathNormalizer {
    fn default() -> Self {
        Self::for_architecture(Architecture::X86_64)
    }
}
