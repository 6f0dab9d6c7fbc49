//! Ordering of changelog version strings.
//!
//! `MAJOR.MINOR.PATCH[-PRERELEASE]` where the prerelease is `alphaN`, `betaN`
//! or `rcN`. Final releases sort above every prerelease of the same numbers.

use std::cmp::Ordering;

use crate::error::ReleaseError;

/// Prerelease stage. Declaration order is the ordering: unrecognized < alpha
/// < beta < rc < final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrereleaseStage {
    Unknown,
    Alpha,
    Beta,
    Rc,
    Final,
}

impl PrereleaseStage {
    /// Numeric weight: final 3, rc 2, beta 1, alpha 0, unrecognized -1.
    pub fn rank(self) -> i8 {
        match self {
            PrereleaseStage::Unknown => -1,
            PrereleaseStage::Alpha => 0,
            PrereleaseStage::Beta => 1,
            PrereleaseStage::Rc => 2,
            PrereleaseStage::Final => 3,
        }
    }
}

const STAGE_KEYWORDS: [(&str, PrereleaseStage); 3] = [
    ("alpha", PrereleaseStage::Alpha),
    ("beta", PrereleaseStage::Beta),
    ("rc", PrereleaseStage::Rc),
];

/// Sort key for a version string. Compares release numbers, then stage, then
/// the number after the stage keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedVersion {
    pub release: Vec<u64>,
    pub stage: PrereleaseStage,
    pub sequence: u64,
}

impl ParsedVersion {
    pub fn parse(version: &str) -> Result<Self, ReleaseError> {
        let invalid = || ReleaseError::InvalidVersion(version.to_string());
        let (main, pre) = match version.trim().split_once('-') {
            Some((main, pre)) => (main, Some(pre)),
            None => (version.trim(), None),
        };

        let release = main
            .split('.')
            .map(|part| part.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        let (stage, sequence) = match pre {
            None | Some("") => (PrereleaseStage::Final, 0),
            Some(pre) => parse_prerelease(pre),
        };

        Ok(Self {
            release,
            stage,
            sequence,
        })
    }
}

/// `rc2`, `Beta11`, `alpha1.hotfix` are recognized by their leading keyword
/// and digits; anything else is [`PrereleaseStage::Unknown`] with sequence 0.
fn parse_prerelease(pre: &str) -> (PrereleaseStage, u64) {
    let lower = pre.to_ascii_lowercase();
    for (keyword, stage) in STAGE_KEYWORDS {
        if let Some(rest) = lower.strip_prefix(keyword) {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            return match digits.parse::<u64>() {
                Ok(n) => (stage, n),
                Err(_) => (PrereleaseStage::Unknown, 0),
            };
        }
    }
    (PrereleaseStage::Unknown, 0)
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.release
            .cmp(&other.release)
            .then(self.stage.cmp(&other.stage))
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
