//! CAS tokens
//!
//! A token is the store-wide revision a caller last observed. Absent, empty,
//! and the literal `"0"` all mean "unset": write without conflict checking.

use revkv_core::{Error, Result, Revision};

/// Parsed compare-and-swap token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasToken {
    /// No conflict check requested
    Unset,
    /// Write only if the global revision equals this value
    Expected(i64),
}

impl CasToken {
    /// Sentinel meaning "no token"
    pub const UNSET_SENTINEL: &'static str = "0";

    /// Parse a raw token as received from a caller
    ///
    /// Any integer is accepted; one that can never equal a revision (such as
    /// a negative number) simply fails the comparison later.
    ///
    /// # Examples
    ///
    /// ```
    /// use revkv_concurrency::CasToken;
    ///
    /// assert_eq!(CasToken::parse(None).unwrap(), CasToken::Unset);
    /// assert_eq!(CasToken::parse(Some("0")).unwrap(), CasToken::Unset);
    /// assert_eq!(CasToken::parse(Some("7")).unwrap(), CasToken::Expected(7));
    /// assert!(CasToken::parse(Some("seven")).is_err());
    /// ```
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None | Some("") | Some(Self::UNSET_SENTINEL) => Ok(CasToken::Unset),
            Some(raw) => raw
                .parse::<i64>()
                .map(CasToken::Expected)
                .map_err(|_| Error::InvalidCasToken(raw.to_owned())),
        }
    }

    /// Check if this token requests a conflict check
    pub fn is_guarded(&self) -> bool {
        matches!(self, CasToken::Expected(_))
    }

    /// Check the token against the current global revision
    ///
    /// An unset token always passes.
    pub fn check(&self, current: Revision) -> Result<()> {
        match *self {
            CasToken::Unset => Ok(()),
            CasToken::Expected(expected) if u64::try_from(expected) == Ok(current.as_u64()) => {
                Ok(())
            }
            CasToken::Expected(expected) => Err(Error::RevisionMismatch { expected, current }),
        }
    }
}

impl From<Revision> for CasToken {
    fn from(revision: Revision) -> Self {
        CasToken::Expected(i64::try_from(revision.as_u64()).unwrap_or(i64::MAX))
    }
}
