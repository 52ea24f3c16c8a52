//! Errors surfaced to the host
//!
//! The frame step itself never fails. These cover the calls a host makes
//! between frames: resolving an upgrade offer, pausing/resuming, and loading
//! settings.

use thiserror::Error;

use crate::sim::UpgradeId;

#[derive(Debug, Error)]
pub enum SimError {
    /// `choose_upgrade`/`skip_upgrade` called with no offer outstanding
    #[error("no upgrade offer is pending")]
    NoOfferPending,

    /// The chosen upgrade was not part of the current offer
    #[error("upgrade {0:?} was not offered")]
    UpgradeNotOffered(UpgradeId),

    /// `resume` called while the world is running or waiting on an offer
    #[error("simulation is not paused")]
    NotPaused,

    /// The run has ended; start a new world instead
    #[error("run is over")]
    GameOver,

    #[error("invalid settings: {0}")]
    Config(#[from] serde_json::Error),

    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
}
