//! Order Board
//!
//! Polls the full order list and derives per-status counters and revenue.
//! The board is shared between its poller and readers, so loads are guarded
//! by an in-flight flag and by generation tickets.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::models::{Order, OrderStatus};
use staff_client::{ClientResult, StaffApi};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::{ViewError, ViewResult};
use crate::poller::{PollHandle, spawn_periodic};

/// Default poll period
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Load state machine: `Idle -> Loading -> {Loaded | Error}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Sum of order totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revenue {
    Total(Decimal),
    /// At least one price could not be parsed; no sum is reported
    Invalid { malformed: usize },
}

impl Revenue {
    pub fn is_valid(&self) -> bool {
        matches!(self, Revenue::Total(_))
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Revenue::Total(amount) => Some(*amount),
            Revenue::Invalid { .. } => None,
        }
    }
}

impl Default for Revenue {
    fn default() -> Self {
        Revenue::Total(Decimal::ZERO)
    }
}

impl fmt::Display for Revenue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revenue::Total(amount) => write!(f, "{:.2}", amount),
            Revenue::Invalid { .. } => f.write_str("NaN"),
        }
    }
}

/// Counters derived from one order snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardStats {
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
    pub delivered: usize,
    pub total: usize,
    pub revenue: Revenue,
}

impl BoardStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

        let mut sum = Decimal::ZERO;
        let mut malformed = 0;
        for order in orders {
            match order.total_price.parse() {
                Some(price) => match sum.checked_add(price) {
                    Some(total) => sum = total,
                    None => {
                        tracing::warn!(
                            order_id = order.id,
                            total_price = %order.total_price,
                            "Revenue overflowed while adding order total"
                        );
                        malformed += 1;
                    }
                },
                None => {
                    tracing::warn!(
                        order_id = order.id,
                        total_price = %order.total_price,
                        "Order has a malformed total price"
                    );
                    malformed += 1;
                }
            }
        }

        Self {
            pending: count(OrderStatus::Pending),
            preparing: count(OrderStatus::Preparing),
            ready: count(OrderStatus::Ready),
            delivered: count(OrderStatus::Delivered),
            total: orders.len(),
            revenue: if malformed == 0 {
                Revenue::Total(sum)
            } else {
                Revenue::Invalid { malformed }
            },
        }
    }
}

/// Identifies one load; completions older than the newest applied one are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Board state held between polls
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub phase: LoadPhase,
    pub orders: Vec<Order>,
    pub stats: BoardStats,
    pub error: Option<ViewError>,
    issued: u64,
    applied: u64,
    /// Phase to fall back to when a load is abandoned
    settled: LoadPhase,
}

impl BoardState {
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        if self.phase != LoadPhase::Loading {
            self.settled = self.phase;
        }
        self.phase = LoadPhase::Loading;
        LoadTicket(self.issued)
    }

    /// Drop a load that will never complete. The phase returns to where it
    /// was before loading unless a newer load is still running.
    pub fn abandon_load(&mut self, ticket: LoadTicket) {
        if ticket.0 == self.issued && self.phase == LoadPhase::Loading {
            tracing::debug!(ticket = ticket.0, "Order load abandoned");
            self.phase = self.settled;
        }
    }

    /// Apply a completed load. Returns `false` when the result is stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: ClientResult<Vec<Order>>) -> bool {
        if ticket.0 <= self.applied {
            tracing::debug!(ticket = ticket.0, applied = self.applied, "Discarding stale order load");
            return false;
        }
        self.applied = ticket.0;

        match result {
            Ok(orders) => {
                self.stats = BoardStats::from_orders(&orders);
                self.orders = orders;
                self.phase = LoadPhase::Loaded;
                self.error = None;
            }
            Err(e) => {
                // Keep the previous snapshot on screen
                self.phase = LoadPhase::Error;
                self.error = Some(ViewError::LoadOrders.caused_by(&e));
            }
        }
        true
    }
}

/// Result of one refresh attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer load finished first
    Stale,
    /// Another refresh was already in flight
    Skipped,
}

/// Resets the in-flight flag, including when the refresh future is dropped.
/// A load still pending at that point is abandoned.
struct InFlight<'a> {
    board: &'a OrderBoard,
    pending: Option<LoadTicket>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.pending.take() {
            self.board.state.write().abandon_load(ticket);
        }
        self.board.in_flight.store(false, Ordering::Release);
    }
}

/// Dashboard view model
pub struct OrderBoard {
    api: Arc<dyn StaffApi>,
    state: RwLock<BoardState>,
    in_flight: AtomicBool,
    updates: watch::Sender<BoardStats>,
}

impl OrderBoard {
    pub fn new(api: Arc<dyn StaffApi>) -> Self {
        let (updates, _) = watch::channel(BoardStats::default());
        Self {
            api,
            state: RwLock::new(BoardState::default()),
            in_flight: AtomicBool::new(false),
            updates,
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> BoardState {
        self.state.read().clone()
    }

    pub fn stats(&self) -> BoardStats {
        self.state.read().stats
    }

    pub fn phase(&self) -> LoadPhase {
        self.state.read().phase
    }

    pub fn error(&self) -> Option<ViewError> {
        self.state.read().error
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Receives the stats of every successfully applied load
    pub fn subscribe(&self) -> watch::Receiver<BoardStats> {
        self.updates.subscribe()
    }

    /// Fetch all orders and replace the snapshot
    pub async fn refresh(&self) -> ViewResult<RefreshOutcome> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("Order board refresh already in flight, skipping");
            return Ok(RefreshOutcome::Skipped);
        }
        let mut in_flight = InFlight {
            board: self,
            pending: None,
        };

        let ticket = self.state.write().begin_load();
        in_flight.pending = Some(ticket);
        let result = self.api.list_orders(None).await;
        in_flight.pending = None;

        let mut state = self.state.write();
        if !state.finish_load(ticket, result) {
            return Ok(RefreshOutcome::Stale);
        }
        if let Some(err) = state.error {
            return Err(err);
        }
        let stats = state.stats;
        drop(state);

        tracing::debug!(total = stats.total, revenue = %stats.revenue, "Order board refreshed");
        self.updates.send_replace(stats);
        Ok(RefreshOutcome::Applied)
    }

    /// Poll every `period` until the handle is dropped or `shutdown` is cancelled
    pub fn start_polling(self: &Arc<Self>, period: Duration, shutdown: CancellationToken) -> PollHandle {
        let board = Arc::clone(self);
        spawn_periodic("order_board", period, shutdown, move || {
            let board = board.clone();
            async move {
                // Failures are kept in the board state
                let _ = board.refresh().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryApi, order};
    use rust_decimal_macros::dec;
    use shared::models::PriceValue;
    use staff_client::ClientError;

    fn text(s: &str) -> PriceValue {
        PriceValue::Text(s.into())
    }

    fn sample_orders() -> Vec<Order> {
        vec![
            order(1, "pending", text("10.00")),
            order(2, "pending", PriceValue::Number(5.5)),
            order(3, "preparing", text("7.25")),
            order(4, "ready", text("3.00")),
            order(5, "delivered", text("20.00")),
            order(6, "cancelled", text("4.00")),
        ]
    }

    #[test]
    fn test_stats_counts_and_revenue() {
        let stats = BoardStats::from_orders(&sample_orders());
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.preparing, 1);
        assert_eq!(stats.ready, 1);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.revenue, Revenue::Total(dec!(49.75)));
        assert_eq!(stats.revenue.to_string(), "49.75");
    }

    #[test]
    fn test_status_counts_never_exceed_total() {
        let lists = vec![
            vec![],
            sample_orders(),
            vec![order(1, "on_hold", text("1")), order(2, "pending", text("1"))],
        ];
        for orders in lists {
            let stats = BoardStats::from_orders(&orders);
            assert_eq!(stats.total, orders.len());
            assert!(stats.pending + stats.preparing + stats.ready + stats.delivered <= stats.total);
        }
    }

    #[test]
    fn test_malformed_price_flags_revenue() {
        let mut orders = sample_orders();
        orders.push(order(7, "pending", text("twelve")));

        let stats = BoardStats::from_orders(&orders);
        assert!(!stats.revenue.is_valid());
        assert_eq!(stats.revenue, Revenue::Invalid { malformed: 1 });
        assert_eq!(stats.revenue.amount(), None);
        assert_eq!(stats.revenue.to_string(), "NaN");
        assert_eq!(stats.total, 7);
    }

    #[test]
    fn test_empty_list() {
        let stats = BoardStats::from_orders(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.revenue, Revenue::Total(Decimal::ZERO));
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut state = BoardState::default();
        let first = state.begin_load();
        let second = state.begin_load();

        assert!(state.finish_load(second, Ok(sample_orders())));
        assert!(!state.finish_load(first, Ok(vec![])));
        assert_eq!(state.orders.len(), 6);
        assert_eq!(state.phase, LoadPhase::Loaded);
    }

    #[test]
    fn test_failed_load_keeps_snapshot() {
        let mut state = BoardState::default();
        let t = state.begin_load();
        state.finish_load(t, Ok(sample_orders()));

        let t = state.begin_load();
        assert_eq!(state.phase, LoadPhase::Loading);
        state.finish_load(t, Err(ClientError::InvalidResponse("down".into())));

        assert_eq!(state.phase, LoadPhase::Error);
        assert_eq!(state.error, Some(ViewError::LoadOrders));
        assert_eq!(state.orders.len(), 6);
        assert_eq!(state.stats.total, 6);
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let api = Arc::new(MemoryApi::new().with_orders(sample_orders()));
        let board = OrderBoard::new(api.clone());
        let mut updates = board.subscribe();

        assert_eq!(board.phase(), LoadPhase::Idle);
        assert_eq!(board.refresh().await, Ok(RefreshOutcome::Applied));
        assert_eq!(board.phase(), LoadPhase::Loaded);
        assert_eq!(board.stats().total, 6);
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().total, 6);

        api.orders.lock().truncate(2);
        board.refresh().await.unwrap();
        assert_eq!(board.snapshot().orders.len(), 2);
        assert_eq!(board.stats().pending, 2);
        assert_eq!(api.calls(), vec!["list_orders(*)", "list_orders(*)"]);
    }

    #[tokio::test]
    async fn test_refresh_error_then_recovery() {
        let api = Arc::new(MemoryApi::new().with_orders(sample_orders()));
        api.fail_on("list_orders");
        let board = OrderBoard::new(api.clone());

        assert_eq!(board.refresh().await, Err(ViewError::LoadOrders));
        assert_eq!(board.phase(), LoadPhase::Error);
        assert_eq!(board.error(), Some(ViewError::LoadOrders));

        api.recover("list_orders");
        assert_eq!(board.refresh().await, Ok(RefreshOutcome::Applied));
        assert_eq!(board.error(), None);
    }

    #[tokio::test]
    async fn test_overlapping_refresh_is_skipped() {
        let api = Arc::new(MemoryApi::new().with_orders(sample_orders()));
        let gate = api.gate_orders();
        let board = Arc::new(OrderBoard::new(api.clone()));

        let pending = tokio::spawn({
            let board = board.clone();
            async move { board.refresh().await }
        });
        while !board.is_refreshing() {
            tokio::task::yield_now().await;
        }

        assert_eq!(board.refresh().await, Ok(RefreshOutcome::Skipped));

        gate.notify_one();
        assert_eq!(pending.await.unwrap(), Ok(RefreshOutcome::Applied));
        assert!(!board.is_refreshing());
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_reloads_until_shutdown() {
        let api = Arc::new(MemoryApi::new().with_orders(sample_orders()));
        let board = Arc::new(OrderBoard::new(api.clone()));

        let poller = board.start_polling(DEFAULT_POLL_INTERVAL, CancellationToken::new());
        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(api.calls().len(), 3);
        assert_eq!(board.stats().total, 6);

        poller.shutdown().await;
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_abandons_in_flight_request() {
        let api = Arc::new(MemoryApi::new().with_orders(sample_orders()));
        let _gate = api.gate_orders();
        let board = Arc::new(OrderBoard::new(api.clone()));

        let poller = board.start_polling(DEFAULT_POLL_INTERVAL, CancellationToken::new());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(board.is_refreshing());

        poller.shutdown().await;
        assert!(!board.is_refreshing());
        assert_eq!(board.phase(), LoadPhase::Idle);
        assert_eq!(board.stats().total, 0);
    }

    #[test]
    fn test_abandoned_load_restores_phase() {
        let mut state = BoardState::default();
        let t = state.begin_load();
        state.finish_load(t, Ok(sample_orders()));

        let t = state.begin_load();
        state.abandon_load(t);
        assert_eq!(state.phase, LoadPhase::Loaded);
        assert_eq!(state.orders.len(), 6);

        // Only the newest load may reset the phase
        let older = state.begin_load();
        let newer = state.begin_load();
        state.abandon_load(older);
        assert_eq!(state.phase, LoadPhase::Loading);
        state.abandon_load(newer);
        assert_eq!(state.phase, LoadPhase::Loaded);
    }

    #[test]
    fn test_revenue_overflow_is_flagged() {
        let huge = "50000000000000000000000000000";
        let orders = vec![
            order(1, "pending", text(huge)),
            order(2, "ready", text(huge)),
            order(3, "ready", text("2")),
        ];

        let stats = BoardStats::from_orders(&orders);
        assert_eq!(stats.revenue, Revenue::Invalid { malformed: 1 });
        assert_eq!(stats.revenue.to_string(), "NaN");
        assert_eq!(stats.total, 3);
        assert_eq!(stats.ready, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_survives_revenue_overflow() {
        let api = Arc::new(MemoryApi::new().with_orders(vec![
            order(1, "pending", PriceValue::Number(5e28)),
            order(2, "pending", PriceValue::Number(5e28)),
        ]));
        let board = Arc::new(OrderBoard::new(api.clone()));

        let poller = board.start_polling(DEFAULT_POLL_INTERVAL, CancellationToken::new());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(board.phase(), LoadPhase::Loaded);
        assert!(!board.stats().revenue.is_valid());

        api.orders.lock().clear();
        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(api.calls().len(), 4);
        assert!(!poller.is_finished());
        assert_eq!(board.stats().revenue, Revenue::Total(Decimal::ZERO));

        poller.shutdown().await;
    }
}
