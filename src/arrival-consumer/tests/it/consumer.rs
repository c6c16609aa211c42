use arrival_consumer::consumer::ConsumerStats;
use chrono::{Duration, Utc};
use serde_json::json;
use vessel_core::{ArrivalConfidence, ArrivalMethod, BadgeTone, NavigationStatus, VesselSnapshot};

use crate::helper::{TEST_MAX_LINE_LENGTH, TestHelper};

#[tokio::test]
async fn test_each_record_produces_a_verdict_in_input_order() {
    let (stats, verdicts) = TestHelper::default()
        .send_json(json!({ "navigation_status": "At anchor", "speed": 0 }))
        .send_json(json!({ "navigation_status": "Under way using engine", "speed": 15 }))
        .run()
        .await;

    assert_eq!(
        ConsumerStats {
            processed: 2,
            failed: 0,
            arrived: 1,
        },
        stats
    );
    assert_eq!(2, verdicts.len());

    assert!(verdicts[0].result.has_arrived);
    assert_eq!(ArrivalMethod::NavigationStatus, verdicts[0].result.arrival_method);

    assert!(!verdicts[1].result.has_arrived);
    assert_eq!(ArrivalConfidence::High, verdicts[1].result.confidence);
    assert_eq!(ArrivalMethod::NavigationStatus, verdicts[1].result.arrival_method);
}

#[tokio::test]
async fn test_invalid_lines_are_skipped_and_counted() {
    let (stats, verdicts) = TestHelper::default()
        .send_line("{this is not json")
        .send_json(json!({ "navigation_status": "Berthed" }))
        .send_line("")
        .send_line("   ")
        .run()
        .await;

    assert_eq!(1, stats.processed);
    assert_eq!(1, stats.failed);
    assert_eq!(1, verdicts.len());
    assert!(verdicts[0].result.has_arrived);
}

#[tokio::test]
async fn test_too_long_lines_are_skipped() {
    let long_destination = "X".repeat(TEST_MAX_LINE_LENGTH);

    let (stats, verdicts) = TestHelper::default()
        .send_json(json!({ "destination": long_destination }))
        .send_json(json!({ "navigation_status": "Aground", "speed": 1 }))
        .run()
        .await;

    assert_eq!(1, stats.failed);
    assert_eq!(1, stats.processed);
    assert_eq!(1, verdicts.len());
    assert!(verdicts[0].result.has_arrived);
}

#[tokio::test]
async fn test_legacy_cased_moored_record_has_arrived() {
    let last_position = "2025-06-15T12:00:00Z";

    let (_, verdicts) = TestHelper::default()
        .send_json(json!({
            "name": "SPANACO ADVENTURE",
            "imo": 9014078,
            "navigation_status": "Moored",
            "speed": "0.5",
            "eta_epoch": (Utc::now() - Duration::hours(1)).timestamp(),
            "destination": "Cartagena, CO",
            "last_position_UTC": last_position,
        }))
        .run()
        .await;

    let verdict = &verdicts[0];
    assert_eq!(Some(9014078), verdict.imo);
    assert_eq!(Some("SPANACO ADVENTURE".to_string()), verdict.name);
    assert!(verdict.result.has_arrived);
    assert_eq!(ArrivalMethod::MooredValidation, verdict.result.arrival_method);
    assert_eq!(
        Some(last_position.parse().unwrap()),
        verdict.result.estimated_arrival_time
    );
}

#[tokio::test]
async fn test_previous_record_enables_port_change_detection() {
    let (stats, verdicts) = TestHelper::default()
        .send_json(json!({
            "current": {
                "dep_port_unlocode": "COCTG",
                "destination": "Miami, US",
                "atd_UTC": "2025-06-15 04:00:00",
            },
            "previous": {
                "dest_port_unlocode": "COCTG",
                "dep_port_unlocode": "USMIA",
            },
        }))
        .run()
        .await;

    assert_eq!(1, stats.arrived);

    let result = &verdicts[0].result;
    assert!(result.has_arrived);
    assert_eq!(ArrivalConfidence::High, result.confidence);
    assert_eq!(ArrivalMethod::PortChange, result.arrival_method);
    assert_eq!(
        Some("2025-06-15T04:00:00Z".parse().unwrap()),
        result.estimated_arrival_time
    );
    assert_eq!(Some("Miami, US".to_string()), result.next_destination);
}

#[tokio::test]
async fn test_record_without_usable_data_defaults_to_transit() {
    let (_, verdicts) = TestHelper::default()
        .send_json(json!({ "navigation_status": "Towing astern", "eta_epoch": null }))
        .run()
        .await;

    assert!(!verdicts[0].result.has_arrived);
    assert_eq!(ArrivalMethod::None, verdicts[0].result.arrival_method);
}

#[tokio::test]
async fn test_canonical_snapshot_round_trips_through_the_consumer() {
    let mut snapshot = VesselSnapshot::test_default();
    snapshot.navigation_status = Some(NavigationStatus::AtAnchor);
    snapshot.speed = Some(0.2);

    let (_, verdicts) = TestHelper::default()
        .send_snapshot(&snapshot)
        .run()
        .await;

    let verdict = &verdicts[0];
    assert_eq!(snapshot.mmsi, verdict.mmsi);
    assert_eq!(snapshot.imo, verdict.imo);
    assert!(verdict.result.has_arrived);
    assert_eq!(
        snapshot.last_position_utc,
        verdict.result.estimated_arrival_time
    );
}

#[tokio::test]
async fn test_invalid_utf8_line_is_skipped_and_later_lines_are_classified() {
    let (stats, verdicts) = TestHelper::default()
        .send_bytes(b"{\"destination\":\"Cartagena\xff\"}".to_vec())
        .send_json(json!({ "navigation_status": "At anchor", "speed": 0 }))
        .run()
        .await;

    assert_eq!(
        ConsumerStats {
            processed: 1,
            failed: 1,
            arrived: 1,
        },
        stats
    );
    assert_eq!(1, verdicts.len());
    assert!(verdicts[0].result.has_arrived);
    assert_eq!(ArrivalMethod::NavigationStatus, verdicts[0].result.arrival_method);
}

#[tokio::test]
async fn test_verdicts_carry_the_badge_of_their_result() {
    let (_, verdicts) = TestHelper::default()
        .send_json(json!({ "navigation_status": "Berthed", "speed": 0 }))
        .send_json(json!({
            "current": { "destination": "Houston, US" },
            "previous": { "destination": "Cartagena, CO" },
        }))
        .send_json(json!({ "navigation_status": "Under way sailing" }))
        .run()
        .await;

    assert_eq!(BadgeTone::Green, verdicts[0].badge_tone);
    assert_eq!("Arrived (high)", verdicts[0].badge_label);

    assert_eq!(ArrivalMethod::DestinationChange, verdicts[1].result.arrival_method);
    assert_eq!(BadgeTone::Orange, verdicts[1].badge_tone);
    assert_eq!("Arrived (low)", verdicts[1].badge_label);

    assert_eq!(BadgeTone::Blue, verdicts[2].badge_tone);
    assert_eq!("In transit", verdicts[2].badge_label);
}
