//! Load-once state for resources fetched on demand.
//!
//! Replaces the "attempted" boolean + data + error triple with one tagged
//! value. `Failed` is terminal until an explicit refresh: a failed fetch does
//! not retry by itself, and a stuck `Loading` cannot happen because every
//! attempt ends in `Ready` or `Failed`.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum CacheState<T> {
    #[default]
    Uninitialized,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> CacheState<T> {
    /// Only an untouched resource may start a fetch without a refresh.
    #[must_use]
    pub const fn should_fetch(&self) -> bool {
        matches!(self, Self::Uninitialized)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(error) => Some(error.as_str()),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_uninitialized_fetches() {
        assert!(CacheState::<u8>::Uninitialized.should_fetch());
        assert!(!CacheState::<u8>::Loading.should_fetch());
        assert!(!CacheState::Ready(1u8).should_fetch());
        assert!(!CacheState::<u8>::Failed("boom".into()).should_fetch());
    }

    #[test]
    fn accessors() {
        let ready = CacheState::Ready(5u8);
        assert_eq!(ready.data(), Some(&5));
        assert!(ready.error().is_none());

        let failed = CacheState::<u8>::Failed("offline".into());
        assert_eq!(failed.error(), Some("offline"));
        assert!(failed.data().is_none());
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(CacheState::Ready(3u8)).unwrap();
        assert_eq!(json["state"], "ready");
        assert_eq!(json["value"], 3);
        let json = serde_json::to_value(CacheState::<u8>::Uninitialized).unwrap();
        assert_eq!(json["state"], "uninitialized");
    }
}
