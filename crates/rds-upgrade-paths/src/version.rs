//! Dotted version parsing and same-major comparison.
//!
//! Engine versions reported by the catalog look like `14.9`, `8.0.15` or
//! `5.7.44-rds.20240408`. They are compared numerically per component, with
//! missing trailing components treated as zero. A `-` suffix is a pre-release
//! and sorts before the bare core, following semantic versioning precedence.
//! Build metadata after `+` is ignored.

use std::cmp::Ordering;

/// A parsed engine version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    core: Vec<u64>,
    pre: Vec<String>,
}

impl Version {
    /// Parse a version string.
    ///
    /// Returns `None` when the core is empty, contains a non-numeric
    /// component, or the pre-release has an empty identifier.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.strip_prefix('v').unwrap_or(s);
        let s = s.split_once('+').map_or(s, |(head, _build)| head);
        let (core, pre) = match s.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (s, None),
        };

        let core = core
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    part.parse::<u64>().ok()
                }
            })
            .collect::<Option<Vec<_>>>()?;

        let pre = match pre {
            Some(pre) => {
                let ids: Vec<String> = pre.split('.').map(str::to_string).collect();
                if ids.iter().any(String::is_empty) {
                    return None;
                }
                ids
            }
            None => Vec::new(),
        };

        Some(Self { core, pre })
    }

    /// The leading numeric component.
    pub fn major(&self) -> u64 {
        self.core[0]
    }

    fn component(&self, idx: usize) -> u64 {
        self.core.get(idx).copied().unwrap_or(0)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.core.len().max(other.core.len());
        for idx in 0..len {
            match self.component(idx).cmp(&other.component(idx)) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        compare_pre_release(&self.pre, &other.pre)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compare_pre_release(a: &[String], b: &[String]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    for (x, y) in a.iter().zip(b) {
        let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

/// Returns `true` if `candidate` is on the same major line as `baseline` and
/// not older than it.
///
/// A different major always yields `false`, even when the candidate is
/// numerically larger. Unparsable input on either side also yields `false`.
///
/// # Examples
///
/// ```
/// use rds_upgrade_paths::version::is_higher_or_equal_within_major;
///
/// assert!(is_higher_or_equal_within_major("14.9", "14.2"));
/// assert!(!is_higher_or_equal_within_major("13.99", "14.0"));
/// assert!(!is_higher_or_equal_within_major("15.1", "14.9"));
/// ```
pub fn is_higher_or_equal_within_major(candidate: &str, baseline: &str) -> bool {
    let (Some(candidate), Some(baseline)) = (Version::parse(candidate), Version::parse(baseline))
    else {
        return false;
    };
    candidate.major() == baseline.major() && candidate >= baseline
}
