// ABOUTME: Typed models for Strava API resources with representation-level tracking
// ABOUTME: Defines the Resource trait that drives cache identity and completeness checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// How complete a fetched resource representation is.
///
/// The Strava API returns every resource with a numeric `resource_state`
/// field. The ordering matters: a `Meta` snapshot carries only an identifier
/// and never satisfies a full get-by-id request, so the cache-hit decision in
/// the service facades is a plain ordinal comparison against `Meta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceState {
    /// Identifier only; the remote holds more detail than we were given.
    Meta,
    /// Summary representation returned by list endpoints.
    Summary,
    /// Full representation returned by single-entity endpoints.
    Detailed,
    /// Representation returned in response to an update.
    Updated,
}

impl ResourceState {
    /// Wire value used by the API.
    #[must_use]
    pub const fn as_wire(self) -> u8 {
        match self {
            Self::Meta => 1,
            Self::Summary => 2,
            Self::Detailed => 3,
            Self::Updated => 4,
        }
    }

    /// Decode the wire value. Unknown values degrade to `Meta` so an
    /// unrecognized snapshot is treated as incomplete and re-fetched.
    #[must_use]
    pub const fn from_wire(value: u8) -> Self {
        match value {
            2 => Self::Summary,
            3 => Self::Detailed,
            4 => Self::Updated,
            _ => Self::Meta,
        }
    }
}

impl Default for ResourceState {
    fn default() -> Self {
        Self::Meta
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Meta => "meta",
            Self::Summary => "summary",
            Self::Detailed => "detailed",
            Self::Updated => "updated",
        };
        write!(f, "{name}")
    }
}

impl Serialize for ResourceState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for ResourceState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)
            .map_err(|e| de::Error::custom(format!("resource_state: {e}")))?;
        Ok(Self::from_wire(value))
    }
}

/// A cacheable API resource: identified, with a tracked representation level.
///
/// `placeholder` synthesizes the META shell returned when the remote confirms
/// a resource exists but the token is not authorized to view its detail.
pub trait Resource: Clone + Send + Sync + 'static {
    /// Identifier type; athletes use `i64`, as do segments and activities.
    type Id: Copy + Eq + Hash + fmt::Display + Send + Sync + 'static;

    /// The resource identifier.
    fn id(&self) -> Self::Id;

    /// How complete this snapshot is.
    fn resource_state(&self) -> ResourceState;

    /// Synthesize a META-level shell carrying only the identifier.
    fn placeholder(id: Self::Id) -> Self;
}

/// Athlete gender as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// An athlete profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Athlete {
    pub id: i64,
    #[serde(default)]
    pub resource_state: ResourceState,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sex: Option<Gender>,
    /// Weight in kilograms.
    #[serde(default)]
    pub weight: Option<f32>,
    #[serde(default)]
    pub premium: Option<bool>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Athlete {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn resource_state(&self) -> ResourceState {
        self.resource_state
    }

    fn placeholder(id: i64) -> Self {
        Self {
            id,
            resource_state: ResourceState::Meta,
            ..Self::default()
        }
    }
}

/// Fields accepted by the update-authenticated-athlete endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AthleteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
}

/// A segment: a fixed portion of road or trail athletes compete over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Segment {
    pub id: i64,
    #[serde(default)]
    pub resource_state: ResourceState,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub activity_type: Option<String>,
    /// Length in meters.
    #[serde(default)]
    pub distance: Option<f32>,
    #[serde(default)]
    pub average_grade: Option<f32>,
    #[serde(default)]
    pub maximum_grade: Option<f32>,
    #[serde(default)]
    pub elevation_high: Option<f32>,
    #[serde(default)]
    pub elevation_low: Option<f32>,
    #[serde(default)]
    pub climb_category: Option<u8>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub starred: Option<bool>,
}

impl Resource for Segment {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn resource_state(&self) -> ResourceState {
        self.resource_state
    }

    fn placeholder(id: i64) -> Self {
        Self {
            id,
            resource_state: ResourceState::Meta,
            ..Self::default()
        }
    }
}

/// An athlete's timed attempt on a segment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentEffort {
    pub id: i64,
    #[serde(default)]
    pub resource_state: ResourceState,
    #[serde(default)]
    pub name: Option<String>,
    /// Elapsed time in seconds.
    #[serde(default)]
    pub elapsed_time: Option<u32>,
    /// Moving time in seconds.
    #[serde(default)]
    pub moving_time: Option<u32>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Distance covered in meters.
    #[serde(default)]
    pub distance: Option<f32>,
    #[serde(default)]
    pub athlete: Option<Athlete>,
    #[serde(default)]
    pub segment: Option<Segment>,
    /// Rank on the segment leaderboard at upload time, 1-10 or absent.
    #[serde(default)]
    pub kom_rank: Option<u8>,
    /// Personal-record rank at upload time, 1-3 or absent.
    #[serde(default)]
    pub pr_rank: Option<u8>,
}

impl Resource for SegmentEffort {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn resource_state(&self) -> ResourceState {
        self.resource_state
    }

    fn placeholder(id: i64) -> Self {
        Self {
            id,
            resource_state: ResourceState::Meta,
            ..Self::default()
        }
    }
}

/// A recorded activity (ride, run, etc.).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    #[serde(default)]
    pub resource_state: ResourceState,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub sport_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Elapsed time in seconds.
    #[serde(default)]
    pub elapsed_time: Option<u64>,
    /// Moving time in seconds.
    #[serde(default)]
    pub moving_time: Option<u64>,
    /// Distance in meters.
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub total_elevation_gain: Option<f64>,
    #[serde(default)]
    pub average_speed: Option<f64>,
    #[serde(default)]
    pub max_speed: Option<f64>,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub trainer: Option<bool>,
    #[serde(default)]
    pub commute: Option<bool>,
}

impl Resource for Activity {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn resource_state(&self) -> ResourceState {
        self.resource_state
    }

    fn placeholder(id: i64) -> Self {
        Self {
            id,
            resource_state: ResourceState::Meta,
            ..Self::default()
        }
    }
}

/// Fields accepted by the update-activity endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commute: Option<bool>,
}

/// Totals for one group of activities within athlete statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTotals {
    #[serde(default)]
    pub count: u64,
    /// Total distance in meters.
    #[serde(default)]
    pub distance: f64,
    /// Total moving time in seconds.
    #[serde(default)]
    pub moving_time: u64,
    /// Total elapsed time in seconds.
    #[serde(default)]
    pub elapsed_time: u64,
    #[serde(default)]
    pub elevation_gain: f64,
    #[serde(default)]
    pub achievement_count: Option<u64>,
}

/// Aggregate athlete statistics. Not identified, so never cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub biggest_ride_distance: Option<f64>,
    #[serde(default)]
    pub biggest_climb_elevation_gain: Option<f64>,
    #[serde(default)]
    pub recent_ride_totals: Option<ActivityTotals>,
    #[serde(default)]
    pub recent_run_totals: Option<ActivityTotals>,
    #[serde(default)]
    pub ytd_ride_totals: Option<ActivityTotals>,
    #[serde(default)]
    pub ytd_run_totals: Option<ActivityTotals>,
    #[serde(default)]
    pub all_ride_totals: Option<ActivityTotals>,
    #[serde(default)]
    pub all_run_totals: Option<ActivityTotals>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_state_ordering() {
        assert!(ResourceState::Meta < ResourceState::Summary);
        assert!(ResourceState::Summary < ResourceState::Detailed);
        assert!(ResourceState::Detailed < ResourceState::Updated);
    }

    #[test]
    fn test_resource_state_wire_round_trip() {
        for state in [
            ResourceState::Meta,
            ResourceState::Summary,
            ResourceState::Detailed,
            ResourceState::Updated,
        ] {
            assert_eq!(ResourceState::from_wire(state.as_wire()), state);
        }
    }

    #[test]
    fn test_unknown_wire_value_degrades_to_meta() {
        assert_eq!(ResourceState::from_wire(0), ResourceState::Meta);
        assert_eq!(ResourceState::from_wire(99), ResourceState::Meta);
    }

    #[test]
    fn test_athlete_deserializes_wire_state() {
        let athlete: Athlete =
            serde_json::from_str(r#"{"id": 42, "resource_state": 3, "firstname": "Jo"}"#).unwrap();
        assert_eq!(athlete.id, 42);
        assert_eq!(athlete.resource_state, ResourceState::Detailed);
        assert_eq!(athlete.firstname.as_deref(), Some("Jo"));
    }

    #[test]
    fn test_placeholder_is_meta() {
        let athlete = Athlete::placeholder(7);
        assert_eq!(athlete.id(), 7);
        assert_eq!(athlete.resource_state(), ResourceState::Meta);
        assert!(athlete.username.is_none());
    }
}
