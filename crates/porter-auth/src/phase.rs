use serde::Serialize;
use std::fmt;

/// Where a session is in the sign-in → building-ready sequence.
///
/// ```text
/// unauthenticated → authenticating → authenticated_no_building
///                                  → fetching_building → ready
/// fetching_building → authenticated_no_building   (fetch failed, explicit refresh retries)
/// ready             → fetching_building           (explicit refresh)
/// any               → unauthenticated             (logout, 401, 403 on building fetch)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Unauthenticated,
    Authenticating,
    AuthenticatedNoBuilding,
    FetchingBuilding,
    Ready,
}

impl SessionPhase {
    /// Starting phase for a process that may have a persisted session.
    #[must_use]
    pub const fn initial(has_session: bool) -> Self {
        if has_session {
            Self::AuthenticatedNoBuilding
        } else {
            Self::Unauthenticated
        }
    }

    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Unauthenticated => &[Self::Authenticating],
            Self::Authenticating => &[Self::AuthenticatedNoBuilding, Self::Unauthenticated],
            Self::AuthenticatedNoBuilding => &[Self::FetchingBuilding, Self::Unauthenticated],
            Self::FetchingBuilding => &[
                Self::Ready,
                Self::AuthenticatedNoBuilding,
                Self::Unauthenticated,
            ],
            Self::Ready => &[Self::FetchingBuilding, Self::Unauthenticated],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Forced logout: every phase collapses to `Unauthenticated`.
    #[must_use]
    pub const fn expire(self) -> Self {
        Self::Unauthenticated
    }

    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        !matches!(self, Self::Unauthenticated | Self::Authenticating)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticating => "authenticating",
            Self::AuthenticatedNoBuilding => "authenticated_no_building",
            Self::FetchingBuilding => "fetching_building",
            Self::Ready => "ready",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_allowed() {
        let path = [
            SessionPhase::Unauthenticated,
            SessionPhase::Authenticating,
            SessionPhase::AuthenticatedNoBuilding,
            SessionPhase::FetchingBuilding,
            SessionPhase::Ready,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn every_authenticated_phase_can_expire() {
        for phase in [
            SessionPhase::Authenticating,
            SessionPhase::AuthenticatedNoBuilding,
            SessionPhase::FetchingBuilding,
            SessionPhase::Ready,
        ] {
            assert!(phase.can_transition_to(phase.expire()));
        }
    }

    #[test]
    fn cannot_skip_building_fetch() {
        assert!(!SessionPhase::AuthenticatedNoBuilding.can_transition_to(SessionPhase::Ready));
        assert!(!SessionPhase::Unauthenticated.can_transition_to(SessionPhase::FetchingBuilding));
    }

    #[test]
    fn initial_phase_depends_on_session() {
        assert_eq!(SessionPhase::initial(false), SessionPhase::Unauthenticated);
        assert_eq!(SessionPhase::initial(true), SessionPhase::AuthenticatedNoBuilding);
        assert!(SessionPhase::initial(true).is_authenticated());
    }
}
