mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{scenario_a, StubProvider};
use host_monitor_lib::{
    DeliveryChannel, FailureReason, OverlapPolicy, QueryKind, SnapshotCollector,
};

const TIMEOUT: Duration = Duration::from_secs(2);

fn collector(provider: &Arc<StubProvider>) -> SnapshotCollector<StubProvider> {
    SnapshotCollector::with_shared(Arc::clone(provider), TIMEOUT)
}

fn channel(provider: &Arc<StubProvider>, policy: OverlapPolicy) -> DeliveryChannel<StubProvider> {
    DeliveryChannel::new(collector(provider), policy)
}

#[tokio::test]
async fn collect_passes_provider_answers_through_unchanged() {
    let provider = Arc::new(StubProvider::default());
    let snapshot = collector(&provider).collect().await.expect("snapshot");

    assert_eq!(snapshot, scenario_a());
    assert!(snapshot.memory.used <= snapshot.memory.total);
    assert!(snapshot.memory.free <= snapshot.memory.total);
}

#[tokio::test]
async fn any_failing_subset_fails_the_whole_collection() {
    for mask in 1u8..32 {
        let failing: Vec<QueryKind> = QueryKind::ALL
            .iter()
            .enumerate()
            .filter(|(idx, _)| mask & (1 << idx) != 0)
            .map(|(_, kind)| *kind)
            .collect();

        let provider = Arc::new(StubProvider::default());
        provider.fail(&failing);

        let err = collector(&provider)
            .collect()
            .await
            .expect_err("partial snapshot escaped");
        assert_eq!(err.failed_kinds(), failing, "mask {:#07b}", mask);

        // Every query is still attempted.
        for kind in QueryKind::ALL {
            assert_eq!(provider.calls(kind), 1, "{} not attempted for mask {:#07b}", kind, mask);
        }

        assert_eq!(channel(&provider, OverlapPolicy::Serialize).request_snapshot().await, None);
    }
}

#[tokio::test]
async fn memory_failure_yields_absence() {
    let provider = Arc::new(StubProvider::default());
    provider.fail(&[QueryKind::Memory]);

    let err = collector(&provider).collect().await.expect_err("memory failed");
    assert_eq!(err.failed_kinds(), vec![QueryKind::Memory]);
    assert!(err.to_string().contains("memory query failed"));

    let channel = channel(&provider, OverlapPolicy::Serialize);
    assert_eq!(channel.request_snapshot().await, None);
}

#[tokio::test]
async fn channel_returns_collected_snapshot_and_recovers_after_failure() {
    let provider = Arc::new(StubProvider::default());
    let channel = channel(&provider, OverlapPolicy::Serialize);

    assert_eq!(channel.request_snapshot().await, Some(scenario_a()));

    provider.fail(&[QueryKind::Network]);
    assert_eq!(channel.request_snapshot().await, None);

    provider.recover();
    assert_eq!(channel.request_snapshot().await, Some(scenario_a()));
}

#[tokio::test]
async fn every_request_queries_the_provider_again() {
    let provider = Arc::new(StubProvider::default());
    let channel = channel(&provider, OverlapPolicy::Serialize);

    for round in 1..=20 {
        let snapshot = channel.request_snapshot().await.expect("snapshot");
        assert_eq!(snapshot.hostname, "host1");
        for kind in QueryKind::ALL {
            assert_eq!(provider.calls(kind), round, "{} after {} requests", kind, round);
        }
    }
}

#[tokio::test]
async fn slow_query_times_out_as_a_failure() {
    let provider = Arc::new(StubProvider::default());
    provider.delay(QueryKind::Network, Duration::from_millis(500));
    let collector =
        SnapshotCollector::with_shared(Arc::clone(&provider), Duration::from_millis(50));

    let err = collector.collect().await.expect_err("timeout should fail");
    assert_eq!(err.failures.len(), 1);
    assert_eq!(err.failures[0].kind, QueryKind::Network);
    assert_eq!(
        err.failures[0].reason,
        FailureReason::TimedOut(Duration::from_millis(50))
    );
}

#[tokio::test]
async fn panicking_query_is_contained() {
    let provider = Arc::new(StubProvider::default());
    provider.panic_on(QueryKind::Cpu);

    let err = collector(&provider).collect().await.expect_err("panic should fail");
    assert_eq!(err.failed_kinds(), vec![QueryKind::Cpu]);
    assert!(matches!(err.failures[0].reason, FailureReason::Aborted(_)));

    assert_eq!(channel(&provider, OverlapPolicy::Concurrent).request_snapshot().await, None);
}

#[tokio::test]
async fn empty_hostname_still_produces_a_snapshot() {
    let mut data = scenario_a();
    data.hostname.clear();
    let provider = Arc::new(StubProvider::new(data.clone()));

    let snapshot = channel(&provider, OverlapPolicy::Serialize)
        .request_snapshot()
        .await
        .expect("empty hostname must not discard the snapshot");
    assert_eq!(snapshot, data);
    assert_eq!(snapshot.hostname, "");
}

#[tokio::test]
async fn empty_storage_and_network_are_still_sequences() {
    let mut data = scenario_a();
    data.storage.clear();
    data.network.clear();
    let provider = Arc::new(StubProvider::new(data));

    let snapshot = collector(&provider).collect().await.expect("snapshot");
    assert!(snapshot.storage.is_empty());
    assert!(snapshot.network.is_empty());

    let wire = serde_json::to_value(&snapshot).expect("serialize");
    assert!(wire["storage"].is_array());
    assert!(wire["network"].is_array());
    assert_eq!(wire["cpu"]["physicalCores"], 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn serialized_requests_never_overlap() {
    let provider = Arc::new(StubProvider::default());
    provider.delay(QueryKind::Identity, Duration::from_millis(100));
    let channel = channel(&provider, OverlapPolicy::Serialize);

    let (first, second) = tokio::join!(channel.request_snapshot(), channel.request_snapshot());
    assert!(first.is_some() && second.is_some());
    assert_eq!(provider.calls(QueryKind::Identity), 2);
    assert_eq!(provider.identity_max_in_flight(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_requests_each_run_their_own_collection() {
    let provider = Arc::new(StubProvider::default());
    provider.delay(QueryKind::Identity, Duration::from_millis(200));
    let channel = channel(&provider, OverlapPolicy::Concurrent);

    let (first, second) = tokio::join!(channel.request_snapshot(), channel.request_snapshot());
    assert_eq!(first, Some(scenario_a()));
    assert_eq!(second, Some(scenario_a()));
    for kind in QueryKind::ALL {
        assert_eq!(provider.calls(kind), 2);
    }
    assert_eq!(provider.identity_max_in_flight(), 2);
}
