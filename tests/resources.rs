//! Lifecycle tests for resources and their composites.
//!
//! Every test records `init`/`deinit` calls into a shared journal and checks
//! the exact order, including rollback after a failed member.

mod common;

use common::{StubResource, events, init_tracing, journal};
use salt_stores::*;

// =============================================================================
// Guarded use
// =============================================================================

#[test]
fn use_resource_releases_once_after_success() {
    let log = journal();
    let mut stub = StubResource::ok("a", 4, &log);

    let written = use_resource(&mut stub, |acquired| acquired.write(b"ab")).unwrap();

    assert_eq!(written, 2);
    assert_eq!(events(&log), ["init a", "deinit a"]);
    assert_eq!(&stub.bytes()[..2], b"ab");
}

#[test]
fn use_resource_releases_once_after_block_error() {
    let log = journal();
    let mut stub = StubResource::ok("a", 4, &log);

    let result: Result<(), _> = use_resource(&mut stub, |_| Err(StoreError::Backend("boom".into())));

    assert!(matches!(result, Err(StoreError::Backend(_))));
    assert_eq!(events(&log), ["init a", "deinit a"]);
}

#[test]
fn use_resource_skips_block_when_init_fails() {
    let log = journal();
    let mut stub = StubResource::failing("a", &log);
    let mut called = false;

    let result = use_resource(&mut stub, |_| {
        called = true;
        Ok(())
    });

    assert!(matches!(result, Err(StoreError::AcquireFailed { .. })));
    assert!(!called);
    assert_eq!(events(&log), ["init a failed"]);
}

// =============================================================================
// Pair resources
// =============================================================================

#[test]
fn pair_resource_rolls_back_first_when_second_fails() {
    init_tracing();
    let log = journal();
    let mut pair = PairResource::new(StubResource::ok("a", 4, &log), StubResource::failing("b", &log));

    assert!(pair.init().is_err());
    assert_eq!(events(&log), ["init a", "init b failed", "deinit a"]);
}

#[test]
fn pair_resource_first_failure_touches_nothing_else() {
    let log = journal();
    let mut pair = PairResource::new(StubResource::failing("a", &log), StubResource::ok("b", 4, &log));

    assert!(pair.init().is_err());
    assert_eq!(events(&log), ["init a failed"]);
}

#[test]
fn pair_resource_releases_in_reverse() {
    let log = journal();
    let mut pair = PairResource::new(StubResource::ok("a", 4, &log), StubResource::ok("b", 4, &log));

    use_resource(&mut pair, |acquired| acquired.write(b"both")).unwrap();

    assert_eq!(events(&log), ["init a", "init b", "deinit b", "deinit a"]);
    let (a, b) = pair.into_parts();
    assert_eq!(a.bytes(), b"both");
    assert_eq!(b.bytes(), b"both");
}

#[test]
fn fallback_resource_rolls_back_primary_when_secondary_fails() {
    let log = journal();
    let mut tiers = FallbackResource::new(StubResource::ok("a", 4, &log), StubResource::failing("b", &log));

    let result = use_resource(&mut tiers, |_| Ok(()));

    assert!(matches!(result, Err(StoreError::AcquireFailed { .. })));
    assert_eq!(events(&log), ["init a", "init b failed", "deinit a"]);
}

#[test]
fn fallback_resource_releases_in_reverse() {
    let log = journal();
    let mut tiers = FallbackResource::new(StubResource::ok("a", 4, &log), StubResource::ok("b", 4, &log));

    use_resource(&mut tiers, |acquired| acquired.write(b"hot")).unwrap();

    assert_eq!(events(&log), ["init a", "init b", "deinit b", "deinit a"]);
    assert_eq!(&tiers.primary().bytes()[..3], b"hot");
    assert_eq!(tiers.secondary().bytes(), &[0u8; 4]);
}

#[test]
fn fallback_resource_caches_backing_reads() {
    let log = journal();
    let mut tiers = FallbackResource::new(HeapResource::new(8), StubResource::ok("disk", 8, &log));

    use_resource(&mut tiers, |acquired| {
        let mut store = acquired.store();
        store.secondary().unwrap().write(b"original")?;

        let mut out = [0u8; 8];
        assert_eq!(store.read(&mut out)?, 8);
        assert_eq!(&out, b"original");
        assert_eq!(store.primary().unwrap().written(), 8);
        Ok(())
    })
    .unwrap();

    assert_eq!(events(&log), ["init disk", "deinit disk"]);
}

// =============================================================================
// List resources
// =============================================================================

#[test]
fn list_rollback_is_reverse_and_skips_later_members() {
    init_tracing();
    let log = journal();
    let mut list = PairListResource::new(vec![
        StubResource::ok("a", 4, &log),
        StubResource::ok("b", 4, &log),
        StubResource::failing("c", &log),
        StubResource::ok("d", 4, &log),
    ])
    .unwrap();

    assert!(list.init().is_err());
    assert_eq!(
        events(&log),
        ["init a", "init b", "init c failed", "deinit b", "deinit a"]
    );
}

#[test]
fn fallback_list_rollback_is_reverse_and_skips_later_tiers() {
    let log = journal();
    let mut tiers = FallbackListResource::new(vec![
        StubResource::ok("l1", 4, &log),
        StubResource::ok("l2", 4, &log),
        StubResource::failing("l3", &log),
        StubResource::ok("l4", 4, &log),
        StubResource::ok("l5", 4, &log),
    ])
    .unwrap();
    let mut called = false;

    let result = use_resource(&mut tiers, |_| {
        called = true;
        Ok(())
    });

    assert!(result.is_err());
    assert!(!called);
    assert_eq!(
        events(&log),
        ["init l1", "init l2", "init l3 failed", "deinit l2", "deinit l1"]
    );
}

#[test]
fn list_releases_all_in_reverse() {
    let log = journal();
    let mut list = FallbackListResource::new(vec![
        StubResource::ok("l1", 4, &log),
        StubResource::ok("l2", 4, &log),
        StubResource::ok("l3", 4, &log),
    ])
    .unwrap();

    use_resource(&mut list, |_| Ok(())).unwrap();

    assert_eq!(
        events(&log),
        ["init l1", "init l2", "init l3", "deinit l3", "deinit l2", "deinit l1"]
    );
}

#[test]
fn pair_list_resource_mirrors_writes() {
    let log = journal();
    let mut list = PairListResource::new(vec![
        StubResource::ok("a", 4, &log),
        StubResource::ok("b", 2, &log),
    ])
    .unwrap();

    let written = use_resource(&mut list, |acquired| acquired.write(b"wxyz")).unwrap();

    assert_eq!(written, 2);
    assert_eq!(list.get(0).unwrap().bytes(), b"wxyz");
    assert_eq!(list.get(1).unwrap().bytes(), b"wx");
}

#[test]
fn empty_list_is_rejected() {
    assert!(matches!(
        PairListResource::<HeapResource>::new(Vec::new()),
        Err(StoreError::EmptyList { .. })
    ));
}

// =============================================================================
// First
// =============================================================================

#[test]
fn first_picks_earliest_success_and_releases_only_it() {
    let log = journal();
    let mut first = First::new(vec![
        StubResource::failing("a", &log),
        StubResource::ok("b", 4, &log),
        StubResource::ok("c", 4, &log),
    ]);

    use_resource(&mut first, |acquired| acquired.write(b"b!")).unwrap();

    assert_eq!(events(&log), ["init a failed", "init b", "deinit b"]);
    assert_eq!(&first.candidate(1).unwrap().bytes()[..2], b"b!");
    // Releasing forgets the choice.
    assert_eq!(first.chosen(), None);
}

#[test]
fn first_remembers_choice_while_acquired() {
    let log = journal();
    let mut first = First::new(vec![StubResource::failing("a", &log), StubResource::ok("b", 4, &log)]);

    first.init().unwrap();
    assert_eq!(first.chosen(), Some(1));
    first.deinit();

    assert_eq!(first.chosen(), None);
    assert_eq!(events(&log), ["init a failed", "init b", "deinit b"]);
}

#[test]
fn first_with_no_success_reports_attempts() {
    let log = journal();
    let mut first = First::new(vec![StubResource::failing("a", &log), StubResource::failing("b", &log)]);

    assert!(matches!(
        first.init(),
        Err(StoreError::NoCandidate { attempts: 2 })
    ));
    assert_eq!(first.chosen(), None);
}

// =============================================================================
// Lazy
// =============================================================================

#[test]
fn lazy_defers_init_until_first_use() {
    let log = journal();
    let mut lazy = Lazy::new(StubResource::ok("a", 4, &log));

    use_resource(&mut lazy, |acquired| {
        assert!(events(&log).is_empty());
        acquired.write(b"now")?;
        assert_eq!(events(&log), ["init a"]);
        acquired.write(b"again")?;
        Ok(())
    })
    .unwrap();

    assert_eq!(events(&log), ["init a", "deinit a"]);
    assert!(!lazy.is_initialized());
}

#[test]
fn lazy_never_used_is_never_released() {
    let log = journal();
    let mut lazy = Lazy::new(StubResource::ok("a", 4, &log));

    use_resource(&mut lazy, |_| Ok(())).unwrap();

    assert!(events(&log).is_empty());
}

#[test]
fn lazy_retries_after_failed_init() {
    let log = journal();
    let mut lazy = Lazy::new(StubResource::failing("a", &log));

    use_resource(&mut lazy, |acquired| {
        assert!(acquired.write(b"x").is_err());
        assert!(acquired.write(b"x").is_err());
        // Splits still run, against a store that refuses everything.
        let ran = acquired.split(0, 1, &mut |sub| {
            assert!(sub.read(&mut [0u8; 1]).is_err());
            Ok(7)
        })?;
        assert_eq!(ran, 7);
        Ok(())
    })
    .unwrap();

    assert_eq!(
        events(&log),
        ["init a failed", "init a failed", "init a failed"]
    );
}

// =============================================================================
// Format, mutex and logger resources
// =============================================================================

#[test]
fn format_resource_reads_rendered_text() {
    let mut value = FormatResource::new(std::net::Ipv4Addr::new(10, 0, 4, 2));
    let text = use_resource(&mut value, |acquired| {
        let mut out = [0u8; 16];
        let n = acquired.read(&mut out)?;
        Ok(out[..n].to_vec())
    })
    .unwrap();
    assert_eq!(text, b"10.0.4.2");
}

#[test]
fn mutex_resource_guards_its_store() {
    let mut guarded = MutexResource::new(HeapResource::new(4));
    use_resource(&mut guarded, |acquired| {
        acquired.write(b"safe")?;
        Ok(())
    })
    .unwrap();
    assert!(!guarded.lock().is_locked());
}

#[test]
fn logger_resource_logs_init_and_store_operations() {
    let messages = LogMessages::new()
        .on(Operation::Init, Outcome::Success, "up")
        .on(Operation::Write, Outcome::Success, "stored");
    let mut log = Pipe::new();
    let mut logged = LoggerResource::new(HeapResource::new(8), &mut log, &messages);

    use_resource(&mut logged, |acquired| acquired.write(b"abc")).unwrap();
    drop(logged);

    assert_eq!(log.take(), b"up: init() -> ok\nstored: write(3) -> 3\n");
}
