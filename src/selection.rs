//! Ant-style include/exclude matching used to select the files of a resource list.

use std::sync::OnceLock;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::{Error, Result};

/// Patterns ant excludes from every file set: SCM metadata, editor backups and OS droppings.
pub const DEFAULT_EXCLUDES: &[&str] = &[
  "**/%*%",
  "**/.#*",
  "**/._*",
  "**/#*#",
  "**/*~",
  "**/.DS_Store",
  "**/CVS",
  "**/CVS/**",
  "**/.cvsignore",
  "**/SCCS",
  "**/SCCS/**",
  "**/.bzr",
  "**/.bzr/**",
  "**/.bzrignore",
  "**/vssver.scc",
  "**/.svn",
  "**/.svn/**",
  "**/.git",
  "**/.git/**",
  "**/.gitattributes",
  "**/.gitignore",
  "**/.gitmodules",
  "**/.hg",
  "**/.hg/**",
  "**/.hgignore",
  "**/.hgsub",
  "**/.hgsubstate",
  "**/.hgtags",
];

fn default_excludes() -> &'static GlobSet {
  static DEFAULTS: OnceLock<GlobSet> = OnceLock::new();
  DEFAULTS.get_or_init(|| {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_EXCLUDES {
      builder.add(ant_glob(pattern).expect("invalid default exclude glob"));
    }
    builder.build().expect("invalid default exclude set")
  })
}

/// Trait describing which source files take part in a resource list.
pub trait FileInclusion {
  /// Returns `true` when the `/`-separated path, relative to its source root, is selected.
  fn is_included(&self, relative_path: &str) -> bool;
}

/// Compiled include and exclude patterns of one list definition.
///
/// Patterns follow ant conventions: `*` and `?` never cross a `/`, `**` spans any number of
/// directories and a pattern ending in `/` selects everything below that directory.
/// [`DEFAULT_EXCLUDES`] always apply on top of the configured excludes.
#[derive(Debug, Clone)]
pub struct PatternSelection {
  include: Option<GlobSet>,
  exclude: GlobSet,
}

impl PatternSelection {
  /// Compile the patterns configured for the list called `name`.
  ///
  /// An empty include list selects everything, an empty exclude list removes nothing.
  pub fn new(name: &str, includes: &[String], excludes: &[String]) -> Result<Self> {
    let include = if includes.is_empty() {
      None
    } else {
      Some(compile(name, includes)?)
    };

    Ok(Self {
      include,
      exclude: compile(name, excludes)?,
    })
  }

  /// Selection that accepts every file outside the [`DEFAULT_EXCLUDES`].
  pub fn all() -> Self {
    Self {
      include: None,
      exclude: GlobSet::empty(),
    }
  }

  /// Returns `true` when no configured include or exclude rule is active.
  pub fn is_unfiltered(&self) -> bool {
    self.include.is_none() && self.exclude.is_empty()
  }
}

impl FileInclusion for PatternSelection {
  fn is_included(&self, relative_path: &str) -> bool {
    let candidate = relative_path.replace('\\', "/");
    if default_excludes().is_match(&candidate) || self.exclude.is_match(&candidate) {
      return false;
    }

    match &self.include {
      Some(include) => include.is_match(&candidate),
      None => true,
    }
  }
}

fn compile(name: &str, patterns: &[String]) -> Result<GlobSet> {
  let invalid = |pattern: &str, source: globset::Error| Error::InvalidPattern {
    name: name.to_string(),
    pattern: pattern.to_string(),
    source,
  };

  let mut builder = GlobSetBuilder::new();
  for pattern in patterns {
    builder.add(ant_glob(pattern).map_err(|err| invalid(pattern.as_str(), err))?);
  }
  builder
    .build()
    .map_err(|err| invalid(patterns.join(", ").as_str(), err))
}

fn ant_glob(pattern: &str) -> std::result::Result<Glob, globset::Error> {
  GlobBuilder::new(&normalise_pattern(pattern))
    .literal_separator(true)
    .backslash_escape(false)
    .build()
}

/// Bring a pattern into the form matched against relative paths.
///
/// Separators are unified to `/`, leading slashes are dropped and a trailing slash is
/// expanded to `**` the way ant treats directory patterns.
fn normalise_pattern(pattern: &str) -> String {
  let unified = pattern.trim().replace('\\', "/");
  let relative = unified.trim_start_matches('/');
  if relative.is_empty() {
    "**".to_string()
  } else if relative.ends_with('/') {
    format!("{relative}**")
  } else {
    relative.to_string()
  }
}
