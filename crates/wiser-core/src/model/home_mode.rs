// ── Home mode and cloud status ──

use strum::{Display, EnumString};

/// Hub-wide operating mode.
///
/// The hub itself only understands `manual` vs `schedule` at the HVAC
/// level; energy-saver and holiday are schedule overlays. Hence
/// [`hub_mode`](Self::hub_mode) collapses everything but Manual to
/// `"schedule"` when talking to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum HomeMode {
    Manual,
    Schedule,
    EnergySaver,
    Holiday,
}

impl HomeMode {
    /// All selectable modes, in display order.
    pub const ALL: [HomeMode; 4] = [
        HomeMode::Manual,
        HomeMode::Schedule,
        HomeMode::EnergySaver,
        HomeMode::Holiday,
    ];

    /// The mode argument the hub expects: `"manual"` for Manual,
    /// `"schedule"` for everything else.
    pub fn hub_mode(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            _ => "schedule",
        }
    }

    /// Parse the hub's reported mode, falling back to Schedule for
    /// values the hub firmware may add later.
    pub fn parse_lossy(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Schedule)
    }
}

/// Wiser cloud connectivity as reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudStatus {
    Up,
    Down,
}

impl CloudStatus {
    /// The hub reports `"up"` when connected; treat anything else
    /// (including a missing field) as down.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("up") => Self::Up,
            _ => Self::Down,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}
