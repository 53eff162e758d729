// ABOUTME: Activity facade behavior: cached gets, history listing write-through,
// ABOUTME: and activity update translation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Result;

use strava_client::models::{ActivityUpdate, ResourceState};
use strava_client::transport::ActivityTransport;
use strava_client::ActivityService;

use common::{activity, valid_token, MockActivityTransport, Outcome};

fn service_over(mock: &Arc<MockActivityTransport>) -> Arc<ActivityService> {
    Arc::new(ActivityService::with_transport(
        valid_token(),
        Arc::clone(mock) as Arc<dyn ActivityTransport>,
    ))
}

#[tokio::test]
async fn get_activity_fetches_once_then_serves_from_cache() -> Result<()> {
    let mock = Arc::new(MockActivityTransport::returning(activity(
        8,
        ResourceState::Detailed,
    )));
    let service = service_over(&mock);

    service.get_activity(8).await?;
    let cached = service.get_activity(8).await?.unwrap();

    assert_eq!(cached.id, 8);
    assert_eq!(mock.get_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn private_activity_becomes_placeholder() -> Result<()> {
    let mock = Arc::new(MockActivityTransport::with_outcome(Outcome::Unauthorized));
    let service = service_over(&mock);

    let placeholder = service.get_activity(8).await?.unwrap();

    assert_eq!(placeholder.id, 8);
    assert_eq!(placeholder.resource_state, ResourceState::Meta);
    Ok(())
}

#[tokio::test]
async fn history_listing_caches_activities() -> Result<()> {
    let mock = Arc::new(MockActivityTransport {
        activity_pages: vec![vec![
            activity(1, ResourceState::Summary),
            activity(2, ResourceState::Summary),
        ]],
        ..MockActivityTransport::with_outcome(Outcome::NotFound)
    });
    let service = service_over(&mock);

    let history = service.list_all_authenticated_athlete_activities().await?;
    assert_eq!(history.len(), 2);

    let cached = service.get_activity(1).await?.unwrap();
    assert_eq!(cached.resource_state, ResourceState::Summary);
    assert_eq!(mock.get_calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn update_writes_response_through_the_cache() -> Result<()> {
    let mut renamed = activity(8, ResourceState::Updated);
    renamed.name = Some("Morning commute".to_owned());
    let mock = Arc::new(MockActivityTransport {
        updated_activity: Outcome::Ok(renamed),
        ..MockActivityTransport::with_outcome(Outcome::NotFound)
    });
    let service = service_over(&mock);

    let update = ActivityUpdate {
        name: Some("Morning commute".to_owned()),
        ..ActivityUpdate::default()
    };
    service.update_activity(8, &update).await?;

    let cached = service.get_activity(8).await?.unwrap();
    assert_eq!(cached.name.as_deref(), Some("Morning commute"));
    assert_eq!(mock.get_calls.load(Ordering::SeqCst), 0);
    assert_eq!(mock.update_calls.load(Ordering::SeqCst), 1);
    Ok(())
}
