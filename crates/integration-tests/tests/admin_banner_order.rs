//! Integration tests for the admin banner ordering screen.
//!
//! These tests drive a full load -> edit -> save cycle against an in-memory
//! console API, mixing drag gestures, typed ranks and the carousel preview.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;
use std::time::Duration;

use shopdeck_admin::banners::{
    CarouselPreviewController, DragDirection, RankRejection, ReorderError, ShiftDirection,
};
use shopdeck_admin::config::CarouselConfig;
use shopdeck_admin::services::{BannerReorderSession, StoreError};
use shopdeck_core::{BannerId, TenantId};
use shopdeck_integration_tests::{ABC_FIXTURE, MemoryBannerStore, init_tracing};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

const TENANT: TenantId = TenantId::new(7);
const A: BannerId = BannerId::new(1);
const B: BannerId = BannerId::new(2);
const C: BannerId = BannerId::new(3);

fn store() -> MemoryBannerStore {
    MemoryBannerStore::new().with_tenant_json(TENANT, ABC_FIXTURE)
}

fn ranks(session: &BannerReorderSession) -> Vec<(BannerId, usize)> {
    session
        .banners()
        .iter()
        .map(|banner| (banner.id, banner.rank.get()))
        .collect()
}

// =============================================================================
// Drag & Drop
// =============================================================================

#[tokio::test]
async fn test_drag_preview_then_drop_then_save() {
    init_tracing();
    let store = store();
    let mut session = BannerReorderSession::load(&store, TENANT).await.unwrap();
    assert_eq!(ranks(&session), vec![(A, 1), (B, 2), (C, 3)]);

    session.drag_start(0).unwrap();
    session.drag_over(2);

    let state = session.drag().state().unwrap();
    assert_eq!(state.direction(), DragDirection::Down);
    assert_eq!(session.shift_for(1), Some(ShiftDirection::Up));
    assert_eq!(session.shift_for(2), Some(ShiftDirection::Up));
    assert_eq!(ranks(&session), vec![(A, 1), (B, 2), (C, 3)]);

    session.drop_at(2).unwrap();
    assert_eq!(ranks(&session), vec![(B, 1), (C, 2), (A, 3)]);

    let payload = session.save(&store).await.unwrap();
    let saves = store.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].0, TENANT);
    assert_eq!(saves[0].1, payload);

    // Reloading picks up the persisted order.
    let reloaded = BannerReorderSession::load(&store, TENANT).await.unwrap();
    assert_eq!(ranks(&reloaded), vec![(B, 1), (C, 2), (A, 3)]);
    assert!(!reloaded.is_dirty());
}

#[tokio::test]
async fn test_cancelled_drag_is_never_saved() {
    init_tracing();
    let store = store();
    let mut session = BannerReorderSession::load(&store, TENANT).await.unwrap();

    session.drag_start(2).unwrap();
    for dest in [1, 0, 1, 0] {
        session.drag_over(dest);
    }
    assert!(session.cancel_drag());
    assert!(!session.is_dirty());
    assert_eq!(ranks(&session), vec![(A, 1), (B, 2), (C, 3)]);
}

// =============================================================================
// Manual Rank Entry
// =============================================================================

#[tokio::test]
async fn test_typed_rank_moves_banner() {
    init_tracing();
    let store = store();
    let mut session = BannerReorderSession::load(&store, TENANT).await.unwrap();

    session.enter_rank(C, "1").unwrap();
    assert_eq!(ranks(&session), vec![(C, 1), (A, 2), (B, 3)]);
}

#[tokio::test]
async fn test_out_of_range_rank_is_scoped_to_banner() {
    init_tracing();
    let store = store();
    let mut session = BannerReorderSession::load(&store, TENANT).await.unwrap();

    let err = session.enter_rank(C, "5").unwrap_err();
    match err {
        ReorderError::InvalidRank(invalid) => {
            assert_eq!(invalid.id, C);
            assert_eq!(invalid.reason, RankRejection::OutOfRange { value: 5, max: 3 });
        }
        other => panic!("expected InvalidRank, got {other:?}"),
    }
    assert_eq!(ranks(&session), vec![(A, 1), (B, 2), (C, 3)]);

    let editor = session.rank_editor();
    assert!(editor.error_for(C).is_some());
    assert!(editor.error_for(A).is_none());
    assert!(editor.error_for(B).is_none());

    // Other banners stay editable while C shows its error.
    session.enter_rank(A, "2").unwrap();
    assert_eq!(ranks(&session), vec![(B, 1), (A, 2), (C, 3)]);
    assert!(session.rank_editor().error_for(C).is_some());
}

// =============================================================================
// Interleaved Edits
// =============================================================================

#[tokio::test]
async fn test_interleaved_edits_keep_contiguous_ranks() {
    init_tracing();
    let fixture = (1..=9)
        .map(|i| format!(r#"{{"id": {i}, "display_name": "banner {i}", "rank": {}}}"#, i * 10))
        .collect::<Vec<_>>()
        .join(",");
    let store = MemoryBannerStore::new().with_tenant_json(TENANT, &format!("[{fixture}]"));
    let mut session = BannerReorderSession::load(&store, TENANT).await.unwrap();

    let edits: [(&str, usize, &str); 6] = [
        ("drag", 0, "8"),
        ("rank", 4, "1"),
        ("drag", 8, "3"),
        ("rank", 9, "9"),
        ("rank", 2, "4.5"),
        ("drag", 5, "5"),
    ];
    for (kind, a, b) in edits {
        if kind == "drag" {
            session.drag_start(a).unwrap();
            let dest = b.parse().unwrap();
            session.drag_over(dest);
            session.drop_at(dest).unwrap();
        } else {
            let id = BannerId::new(i32::try_from(a).unwrap());
            let _ = session.enter_rank(id, b);
        }

        let seen: BTreeSet<usize> = session
            .banners()
            .iter()
            .map(|banner| banner.rank.get())
            .collect();
        assert_eq!(seen, (1..=9).collect());
    }

    let payload = session.save(&store).await.unwrap();
    assert_eq!(payload.len(), 9);
    for (index, assignment) in payload.iter().enumerate() {
        assert_eq!(assignment.rank.position(), index);
    }
}

// =============================================================================
// Load / Save Failures
// =============================================================================

#[tokio::test]
async fn test_unknown_tenant() {
    let store = store();
    let err = BannerReorderSession::load(&store, TenantId::new(99))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(t) if t == TenantId::new(99)));
}

#[tokio::test]
async fn test_failed_save_can_be_retried_by_caller() {
    init_tracing();
    let store = store();
    let mut session = BannerReorderSession::load(&store, TENANT).await.unwrap();
    session.enter_rank(B, "3").unwrap();

    store.fail_saves(true);
    assert!(matches!(
        session.save(&store).await,
        Err(StoreError::Request(_))
    ));
    assert!(session.is_dirty());
    assert!(store.saves().is_empty());

    store.fail_saves(false);
    session.save(&store).await.unwrap();
    assert!(!session.is_dirty());
    assert_eq!(store.saves().len(), 1);
}

// =============================================================================
// Carousel Preview
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_carousel_previews_current_order_without_editing_it() {
    init_tracing();
    let store = store();
    let mut session = BannerReorderSession::load(&store, TENANT).await.unwrap();
    session.enter_rank(C, "1").unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = CarouselConfig {
        interval: Duration::from_secs(3),
        autoplay_on_open: true,
    };
    let mut carousel = CarouselPreviewController::new(config, Handle::current(), tx);
    carousel.open(session.banners());
    assert_eq!(carousel.current_banner().map(|b| b.id), Some(C));

    let mut shown = vec![C];
    for _ in 0..3 {
        let tick = rx.recv().await.unwrap();
        carousel.on_tick(tick);
        shown.push(carousel.current_banner().unwrap().id);
    }
    assert_eq!(shown, vec![C, A, B, C]);

    carousel.previous();
    assert_eq!(carousel.current_banner().map(|b| b.id), Some(B));
    carousel.close();

    assert_eq!(ranks(&session), vec![(C, 1), (A, 2), (B, 3)]);
    assert!(session.is_dirty());
}

#[tokio::test(start_paused = true)]
async fn test_carousel_single_banner_is_static() {
    let store = MemoryBannerStore::new().with_tenant_json(
        TENANT,
        r#"[{"id": 1, "display_name": "Only", "images": [{"url": "https://cdn.shopdeck.test/only.png"}]}]"#,
    );
    let session = BannerReorderSession::load(&store, TENANT).await.unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut carousel =
        CarouselPreviewController::new(CarouselConfig::default(), Handle::current(), tx);
    carousel.open(session.banners());
    assert!(!carousel.is_playing());

    carousel.toggle_autoplay();
    carousel.next();
    carousel.go_to(4);
    assert_eq!(carousel.current_index(), Some(0));

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(rx.try_recv().is_err());
}
