//! End-to-end tests: event source -> tracker -> dispatcher

mod common;

use std::sync::Arc;

use common::{RecordingPlatform, dispatcher};
use msm::CallEvent;
use msm::config::{Config, DispatchMode, WHATSAPP_PACKAGE};
use msm::dispatch::DeepLink;
use msm::service::CallService;
use msm::source::{ChannelSource, LineSource};
use tokio::io::BufReader;

fn open_mode() -> Config {
    let mut config = Config::default();
    config.dispatch.mode = DispatchMode::Open;
    config.settings.custom_message = "Write me on WhatsApp".to_string();
    config
}

#[tokio::test]
async fn test_scripted_calls() {
    let script = "\
# missed, number only on first ring
RINGING 3001234567
IDLE
# answered
RINGING 3009876543
OFFHOOK
IDLE
# outgoing
OFFHOOK
IDLE
# missed, number on second ring
RINGING
{\"state\": \"RINGING\", \"number\": \"3009876543\"}
{\"state\": 0}
";
    let platform = Arc::new(RecordingPlatform::new(&[]));
    let (dispatcher, settings) = dispatcher(platform.clone(), &open_mode());
    let source = LineSource::new(BufReader::new(script.as_bytes()));

    let report = CallService::new(source, settings, Arc::new(dispatcher))
        .run()
        .await
        .unwrap();

    assert_eq!(report.stats.events_received, 10);
    assert_eq!(report.stats.missed_calls, 2);
    assert_eq!(report.stats.delivered, 2);
    assert_eq!(report.stats.skipped, 0);
    assert_eq!(
        platform.opened(),
        vec![
            DeepLink::web("573001234567", "Write me on WhatsApp"),
            DeepLink::web("573009876543", "Write me on WhatsApp"),
        ]
    );
}

#[tokio::test]
async fn test_events_from_other_lines_are_ignored() {
    let mut config = open_mode();
    config.settings.selected_line_id = Some(1);
    let platform = Arc::new(RecordingPlatform::new(&[WHATSAPP_PACKAGE]));
    let (dispatcher, settings) = dispatcher(platform.clone(), &config);

    let (tx, source) = ChannelSource::new(16);
    let service = tokio::spawn(CallService::new(source, settings, Arc::new(dispatcher)).run());

    tx.send(CallEvent::ringing(Some("3001111111")).on_line(2)).await.unwrap();
    tx.send(CallEvent::idle().on_line(2)).await.unwrap();
    tx.send(CallEvent::ringing(Some("3002222222")).on_line(1)).await.unwrap();
    tx.send(CallEvent::idle().on_line(1)).await.unwrap();
    drop(tx);

    let report = service.await.unwrap().unwrap();

    assert_eq!(report.stats.events_filtered, 2);
    assert_eq!(report.stats.missed_calls, 1);
    let opened = platform.opened();
    assert_eq!(opened.len(), 1);
    assert_eq!(
        opened[0],
        DeepLink::for_package(WHATSAPP_PACKAGE, "573002222222", "Write me on WhatsApp")
    );
}

#[tokio::test]
async fn test_undeliverable_actions_are_counted() {
    let mut platform = RecordingPlatform::new(&[]);
    platform.notifications_enabled = false;
    let platform = Arc::new(platform);
    let (dispatcher, settings) = dispatcher(platform.clone(), &Config::default());

    let (tx, source) = ChannelSource::new(16);
    let service = tokio::spawn(CallService::new(source, settings, Arc::new(dispatcher)).run());

    tx.send(CallEvent::ringing(Some("3001234567"))).await.unwrap();
    tx.send(CallEvent::idle()).await.unwrap();
    drop(tx);

    let report = service.await.unwrap().unwrap();
    assert_eq!(report.stats.missed_calls, 1);
    assert_eq!(report.stats.delivered, 0);
    assert_eq!(report.stats.skipped, 1);
    assert!(platform.notifications().is_empty());
}

#[tokio::test]
async fn test_disabling_mid_call_suppresses_action() {
    let platform = Arc::new(RecordingPlatform::new(&[]));
    let (dispatcher, settings) = dispatcher(platform.clone(), &open_mode());

    let (tx, source) = ChannelSource::new(16);
    let service = tokio::spawn(
        CallService::new(source, settings.clone(), Arc::new(dispatcher)).run(),
    );

    tx.send(CallEvent::ringing(Some("3001234567"))).await.unwrap();
    // Let the service consume the ringing event before flipping the flag
    tokio::task::yield_now().await;
    settings.set_service_enabled(false);
    tx.send(CallEvent::idle()).await.unwrap();
    drop(tx);

    let report = service.await.unwrap().unwrap();
    assert_eq!(report.stats.missed_calls, 0);
    assert!(platform.opened().is_empty());
}
