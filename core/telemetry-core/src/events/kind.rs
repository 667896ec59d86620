use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event types that open (or renew) an attribution context.
///
/// The set is closed. Adding a member means revisiting the candidate selection in the
/// resolver, which matches on these variants explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstablisherKind {
    Init,
    Upgrade,
}

impl EstablisherKind {
    pub const ALL: [EstablisherKind; 2] = [EstablisherKind::Init, EstablisherKind::Upgrade];

    /// Cache key the ingestion side stores this event type under.
    pub fn as_str(self) -> &'static str {
        match self {
            EstablisherKind::Init => "init",
            EstablisherKind::Upgrade => "upgrade",
        }
    }
}

impl fmt::Display for EstablisherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a session-establishing event type")]
pub struct UnknownEstablisher(pub String);

impl FromStr for EstablisherKind {
    type Err = UnknownEstablisher;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EstablisherKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEstablisher(s.to_string()))
    }
}
