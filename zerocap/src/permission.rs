use std::fmt::Display;

use itertools::{EitherOrBoth, Itertools};
use serde::{Deserialize, Serialize};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Separates the segments of an action or resource path.
pub const PATH_SEPARATOR: char = '/';

/// Represents everything below the hierarchical level it is used at. e.g. `foo/*` or `*`.
pub const WILDCARD: &str = "*";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// One or more `/`-delimited paths, such as `test/read` or `["foo/foo", "foo/bar"]`.
///
/// On the wire a single path is a plain string and several paths are an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scope {
    /// A single path.
    Single(String),

    /// Several paths.
    Many(Vec<String>),
}

/// The action half of a [`Permission`], such as `test/read`.
pub type Action = Scope;

/// The resource half of a [`Permission`], such as `foo/bar`.
pub type Resource = Scope;

/// An action that may be performed on a resource.
///
/// As a grant, a permission covers every action and resource its paths match, where a `*` segment
/// matches the rest of a path. As a request, every listed action and resource must be covered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// The action.
    pub act: Action,

    /// The resource.
    pub res: Resource,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Scope {
    /// Returns the paths of the scope.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Scope::Single(path) => std::slice::from_ref(path),
            Scope::Many(paths) => paths,
        }
    }

    /// Returns `true` if the scope holds no path at all.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Checks that every path of `self` is matched by at least one path of `granted`.
    ///
    /// An empty scope is never covered.
    pub fn is_covered_by(&self, granted: &Scope) -> bool {
        !self.is_empty()
            && self
                .as_slice()
                .iter()
                .all(|expected| granted.as_slice().iter().any(|g| match_pattern(expected, g)))
    }
}

impl Permission {
    /// Creates a new permission.
    pub fn new(act: impl Into<Action>, res: impl Into<Resource>) -> Self {
        Self {
            act: act.into(),
            res: res.into(),
        }
    }

    /// Checks if the `requested` permission is covered by this permission.
    pub fn permits(&self, requested: &Permission) -> bool {
        has_permission(requested, self)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Checks if the `actual` (granted) path matches the `expected` (requested) path.
///
/// Segments are compared in order and exactly. A `*` segment in `actual` matches the expected
/// segment at the same position and everything after it. `actual` must not run out of segments
/// before a `*` is reached, and must not be longer than `expected`.
///
/// `*` in `expected` is an ordinary segment, so `foo/*` is only granted by `foo/*`, `*` or a prefix
/// of it ending in `*`.
pub fn match_pattern(expected: &str, actual: &str) -> bool {
    for segments in expected
        .split(PATH_SEPARATOR)
        .zip_longest(actual.split(PATH_SEPARATOR))
    {
        match segments {
            EitherOrBoth::Both(_, WILDCARD) => return true,
            EitherOrBoth::Both(expected, actual) if expected == actual => continue,
            _ => return false,
        }
    }

    true
}

/// Checks if the `granted` permission covers the `expected` permission.
///
/// Both the action and the resource must be covered. For each of them, every expected path must be
/// matched by at least one granted path.
pub fn has_permission(expected: &Permission, granted: &Permission) -> bool {
    expected.act.is_covered_by(&granted.act) && expected.res.is_covered_by(&granted.res)
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Single(path) => write!(f, "{path}"),
            Scope::Many(paths) => write!(f, "[{}]", paths.join(", ")),
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {}", self.act, self.res)
    }
}

impl From<&str> for Scope {
    fn from(path: &str) -> Self {
        Scope::Single(path.to_string())
    }
}

impl From<String> for Scope {
    fn from(path: String) -> Self {
        Scope::Single(path)
    }
}

impl From<Vec<String>> for Scope {
    fn from(paths: Vec<String>) -> Self {
        Scope::Many(paths)
    }
}

impl<const N: usize> From<[&str; N]> for Scope {
    fn from(paths: [&str; N]) -> Self {
        Scope::Many(paths.iter().map(|p| p.to_string()).collect())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
