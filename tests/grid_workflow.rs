//! Integration tests for the forecast grid workflow.
//!
//! Exercises the full path over the in-memory adapters:
//! 1. Cycle lifecycle transitions gate the whole workflow
//! 2. BuildGridHandler reconciles catalog and forecast data into rows
//! 3. Grid edits synthesize draft records on first touch
//! 4. SubmitAllHandler saves, validates, and submits best-effort
//! 5. The deadline evaluator reports the closing window

use std::sync::Arc;

use chrono::NaiveDate;

use plan_pilot::adapters::{InMemoryCatalogSource, InMemoryCycleStore, InMemoryForecastStore};
use plan_pilot::application::handlers::cycle::{
    GetActiveCycleHandler, TransitionCycleCommand, TransitionCycleError, TransitionCycleHandler,
};
use plan_pilot::application::handlers::forecast::{SubmitAllCommand, SubmitAllHandler};
use plan_pilot::application::handlers::grid::{
    BuildGridError, BuildGridHandler, BuildGridQuery, SelectionTracker,
};
use plan_pilot::domain::catalog::Product;
use plan_pilot::domain::cycle::{
    evaluate_deadline, Cycle, CycleEvent, CycleStatus, Severity,
};
use plan_pilot::domain::forecast::RecordStatus;
use plan_pilot::domain::foundation::{
    CustomerId, CycleId, ErrorCode, PlanningMonth, ProductId,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

struct Fixture {
    forecasts: Arc<InMemoryForecastStore>,
    tracker: Arc<SelectionTracker>,
    grid_handler: BuildGridHandler,
    submit_handler: SubmitAllHandler,
    cycle: Cycle,
    customer_id: CustomerId,
    p1: ProductId,
    p2: ProductId,
}

fn open_cycle() -> Cycle {
    Cycle::reconstitute(
        CycleId::new(),
        "2025-01 S&OP".to_string(),
        2025,
        1,
        CycleStatus::Open,
        Some("2025-01-02".to_string()),
        Some("2025-01-20".to_string()),
        PlanningMonth::new(2025, 1).unwrap(),
    )
}

fn product(name: &str) -> Product {
    Product {
        id: ProductId::new(),
        name: name.to_string(),
        active: true,
        default_unit_price: Some(10.0),
    }
}

/// An open cycle, one customer, two active products, no records yet.
fn fixture() -> Fixture {
    init_tracing();
    let catalog = Arc::new(InMemoryCatalogSource::new());
    let forecasts = Arc::new(InMemoryForecastStore::new());
    let tracker = Arc::new(SelectionTracker::new());

    let p1 = product("P1");
    let p2 = product("P2");
    let (id1, id2) = (p1.id, p2.id);
    catalog.add_product(p1);
    catalog.add_product(p2);

    let grid_handler = BuildGridHandler::new(
        catalog.clone(),
        forecasts.clone(),
        tracker.clone(),
        50,
    );
    let submit_handler = SubmitAllHandler::new(forecasts.clone());

    Fixture {
        forecasts,
        tracker,
        grid_handler,
        submit_handler,
        cycle: open_cycle(),
        customer_id: CustomerId::new(),
        p1: id1,
        p2: id2,
    }
}

fn month(m: u32) -> PlanningMonth {
    PlanningMonth::new(2025, m).unwrap()
}

// =============================================================================
// Grid build and first submit (incomplete record)
// =============================================================================

#[tokio::test]
async fn first_edit_then_submit_blocks_on_missing_mandatory_months() {
    let fx = fixture();

    // Empty grid: one row per product, nothing bound.
    let token = fx.tracker.begin_selection();
    let mut grid = fx
        .grid_handler
        .handle(
            &fx.cycle,
            BuildGridQuery {
                customer_id: fx.customer_id,
                token,
            },
        )
        .await
        .unwrap();
    assert_eq!(grid.rows().len(), 2);
    assert!(grid.rows().iter().all(|r| r.record.is_none()));

    // First edit synthesizes a draft covering the horizon.
    grid.set_quantity(fx.p1, month(1), 100).unwrap();
    let row = grid.row(fx.p1).unwrap();
    assert_eq!(row.total_quantity(), 100);
    assert_eq!(
        row.record.as_ref().unwrap().status(),
        RecordStatus::Draft
    );

    // Submit: the draft is saved but fails validation on 11 empty months.
    let summary = fx
        .submit_handler
        .handle(
            &fx.cycle,
            SubmitAllCommand {
                customer_id: fx.customer_id,
                rows: grid.rows().to_vec(),
            },
        )
        .await
        .unwrap();

    assert_eq!(summary.save.created, 1);
    assert_eq!(summary.submitted, 0);
    assert_eq!(summary.failures.len(), 1);

    let error = &summary.failures[0].error;
    assert_eq!(error.code, ErrorCode::MissingMandatoryMonths);
    let months: Vec<&str> = error.details.get("months").unwrap().split(',').collect();
    assert_eq!(months.len(), 11);
    assert_eq!(months.first(), Some(&"2025-02"));
    assert_eq!(months.last(), Some(&"2025-12"));

    // The saved draft survives for the next pass, bound on rebuild.
    let token = fx.tracker.begin_selection();
    let rebuilt = fx
        .grid_handler
        .handle(
            &fx.cycle,
            BuildGridQuery {
                customer_id: fx.customer_id,
                token,
            },
        )
        .await
        .unwrap();
    let row = rebuilt.row(fx.p1).unwrap();
    let record = row.record.as_ref().unwrap();
    assert!(!record.identity().is_unsaved());
    assert_eq!(record.status(), RecordStatus::Draft);
    assert_eq!(record.total_quantity(), 100);
    assert!(rebuilt.row(fx.p2).unwrap().record.is_none());
}

// =============================================================================
// Complete record: submit succeeds and locks the row
// =============================================================================

#[tokio::test]
async fn complete_record_submits_and_becomes_immutable() {
    let fx = fixture();

    let token = fx.tracker.begin_selection();
    let mut grid = fx
        .grid_handler
        .handle(
            &fx.cycle,
            BuildGridQuery {
                customer_id: fx.customer_id,
                token,
            },
        )
        .await
        .unwrap();

    for m in 1..=12 {
        grid.set_quantity(fx.p1, month(m), 10 * m).unwrap();
    }

    let summary = fx
        .submit_handler
        .handle(
            &fx.cycle,
            SubmitAllCommand {
                customer_id: fx.customer_id,
                rows: grid.rows().to_vec(),
            },
        )
        .await
        .unwrap();
    assert_eq!(summary.submitted, 1);
    assert!(summary.failures.is_empty());

    // Rebuilt grid binds the submitted record and rejects further edits.
    let token = fx.tracker.begin_selection();
    let mut rebuilt = fx
        .grid_handler
        .handle(
            &fx.cycle,
            BuildGridQuery {
                customer_id: fx.customer_id,
                token,
            },
        )
        .await
        .unwrap();
    let record = rebuilt.row(fx.p1).unwrap().record.as_ref().unwrap();
    assert_eq!(record.status(), RecordStatus::Submitted);

    let err = rebuilt.set_quantity(fx.p1, month(1), 999).unwrap_err();
    assert_eq!(err.code, ErrorCode::NotEditable);

    // Untouched rows stay unbound through the whole workflow.
    assert!(rebuilt.row(fx.p2).unwrap().record.is_none());
    assert_eq!(fx.forecasts.record_count(), 1);
}

// =============================================================================
// Stale selections
// =============================================================================

#[tokio::test]
async fn superseded_selection_discards_the_grid_build() {
    let fx = fixture();

    let stale = fx.tracker.begin_selection();
    // The user switches customers before the fetch lands.
    let _current = fx.tracker.begin_selection();

    let result = fx
        .grid_handler
        .handle(
            &fx.cycle,
            BuildGridQuery {
                customer_id: fx.customer_id,
                token: stale,
            },
        )
        .await;
    assert!(matches!(result, Err(BuildGridError::SelectionChanged)));
}

// =============================================================================
// Cycle lifecycle
// =============================================================================

#[tokio::test]
async fn cycle_lifecycle_moves_forward_only() {
    let store = Arc::new(InMemoryCycleStore::new());
    let cycle = Cycle::new("2025-02 S&OP", 2025, 2, PlanningMonth::new(2025, 2).unwrap());
    let cycle_id = cycle.id();
    store.insert(cycle);

    let active = GetActiveCycleHandler::new(store.clone());
    let transition = TransitionCycleHandler::new(store.clone());

    // Draft cycles are not active.
    assert!(active.handle().await.unwrap().is_none());

    // Opening emits the Opened event for downstream dispatch.
    let opened = transition
        .handle(TransitionCycleCommand {
            cycle_id,
            target: CycleStatus::Open,
        })
        .await
        .unwrap();
    assert_eq!(opened.cycle.status(), CycleStatus::Open);
    assert!(opened
        .events
        .iter()
        .any(|e| matches!(e, CycleEvent::Opened { .. })));
    assert_eq!(
        active.handle().await.unwrap().unwrap().id(),
        cycle_id
    );

    // Backward moves are rejected before any request.
    let err = transition
        .handle(TransitionCycleCommand {
            cycle_id,
            target: CycleStatus::Draft,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TransitionCycleError::InvalidTransition(_)));

    // Forward to the end of the lifecycle.
    transition
        .handle(TransitionCycleCommand {
            cycle_id,
            target: CycleStatus::Closed,
        })
        .await
        .unwrap();
    let archived = transition
        .handle(TransitionCycleCommand {
            cycle_id,
            target: CycleStatus::Archived,
        })
        .await
        .unwrap();
    assert_eq!(archived.cycle.status(), CycleStatus::Archived);
    assert!(active.handle().await.unwrap().is_none());
}

#[tokio::test]
async fn closed_cycle_rejects_grid_edits() {
    let fx = fixture();
    let closed = Cycle::reconstitute(
        fx.cycle.id(),
        fx.cycle.name().to_string(),
        2025,
        1,
        CycleStatus::Closed,
        None,
        None,
        PlanningMonth::new(2025, 1).unwrap(),
    );

    let token = fx.tracker.begin_selection();
    let mut grid = fx
        .grid_handler
        .handle(
            &closed,
            BuildGridQuery {
                customer_id: fx.customer_id,
                token,
            },
        )
        .await
        .unwrap();

    let err = grid.set_quantity(fx.p1, month(1), 1).unwrap_err();
    assert_eq!(err.code, ErrorCode::NotEditable);
}

// =============================================================================
// Deadline evaluation
// =============================================================================

#[test]
fn deadline_on_close_day_warns_with_zero_days_remaining() {
    let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
    let mut cycle = open_cycle();
    cycle.set_dates(None, Some("2025-01-20T00:00:00".to_string()));

    let status = evaluate_deadline(&cycle, today);
    assert_eq!(status.severity, Severity::Warning);
    assert_eq!(status.days_remaining, 0);
}

#[test]
fn deadline_after_close_is_an_error() {
    let today = NaiveDate::from_ymd_opt(2025, 1, 25).unwrap();
    let cycle = open_cycle();

    let status = evaluate_deadline(&cycle, today);
    assert_eq!(status.severity, Severity::Error);
    assert!(status.days_remaining < 0);
}
