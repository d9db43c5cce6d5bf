//! Order store
//!
//! Holds the canonical order collection and the current search term. The
//! filtered view is never stored; it is recomputed from the canonical
//! collection on every read, so edits and deletes only ever touch one list.
//!
//! State sits behind an async `RwLock` that is never held across a remote
//! call. Overlapping writes are therefore allowed; for two edits of the same
//! field the one applied locally last wins.

use chrono::{NaiveDateTime, TimeDelta};
use shared::util::{now_local, within_window};
use shared::{Order, OrderField, OrderPatch};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::http::OrderApi;
use crate::types::{ViewState, WritePolicies, WritePolicy};
use crate::{ClientError, ClientResult};

/// Notice shown after a field update was not accepted remotely
pub const UPDATE_FAILED_NOTICE: &str = "Failed to update order field";

/// Notice shown after a delete was not accepted remotely
pub const DELETE_FAILED_NOTICE: &str = "Failed to delete order";

#[derive(Debug, Default)]
struct StoreState {
    orders: Vec<Order>,
    search_term: String,
    view: ViewState,
    notice: Option<String>,
}

impl StoreState {
    fn filtered(&self) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|order| order.matches(&self.search_term))
            .cloned()
            .collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.orders.iter().position(|order| order.id == id)
    }

    /// Replace the order with a patched copy; `None` if it is gone
    fn apply(&mut self, id: &str, patch: &OrderPatch) -> Option<Order> {
        let idx = self.position(id)?;
        let next = self.orders[idx].with_patch(patch);
        self.orders[idx] = next.clone();
        Some(next)
    }

    fn remove(&mut self, id: &str) -> Option<Order> {
        self.position(id).map(|idx| self.orders.remove(idx))
    }
}

/// In-memory order list backed by a remote order API
#[derive(Debug)]
pub struct OrderStore<A: OrderApi> {
    api: A,
    state: RwLock<StoreState>,
    recency_window: TimeDelta,
    policies: WritePolicies,
}

impl<A: OrderApi> OrderStore<A> {
    /// Create an empty store in the `Loading` state
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RwLock::new(StoreState::default()),
            recency_window: TimeDelta::hours(48),
            policies: WritePolicies::default(),
        }
    }

    /// Set how old an order may be and still be loaded
    pub fn with_recency_window(mut self, window: TimeDelta) -> Self {
        self.recency_window = window;
        self
    }

    /// Set the write policy per operation
    pub fn with_policies(mut self, policies: WritePolicies) -> Self {
        self.policies = policies;
        self
    }

    /// The underlying order API
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn policies(&self) -> WritePolicies {
        self.policies
    }

    // ========== Load ==========

    /// Fetch orders, keep the recent ones, newest first
    ///
    /// Returns the number of orders kept.
    pub async fn load(&self) -> ClientResult<usize> {
        self.load_at(now_local()).await
    }

    /// [`load`](Self::load) against an explicit current time
    #[instrument(skip(self))]
    pub async fn load_at(&self, now: NaiveDateTime) -> ClientResult<usize> {
        self.state.write().await.view = ViewState::Loading;

        let fetched = match self.api.list_orders().await {
            Ok(orders) => orders,
            Err(e) => {
                warn!(error = %e, "Failed to load orders");
                let mut state = self.state.write().await;
                state.orders.clear();
                state.view = ViewState::LoadFailed(e.to_string());
                return Err(e);
            }
        };

        let fetched_count = fetched.len();
        let orders = recent_orders(fetched, now, self.recency_window);
        let kept = orders.len();

        let mut state = self.state.write().await;
        state.orders = orders;
        state.search_term.clear();
        state.view = ViewState::Ready;
        state.notice = None;

        info!(fetched = fetched_count, kept, "Orders loaded");
        Ok(kept)
    }

    // ========== Read Access ==========

    /// Canonical collection, newest first
    pub async fn orders(&self) -> Vec<Order> {
        self.state.read().await.orders.clone()
    }

    /// Canonical collection narrowed by the current search term
    pub async fn filtered_orders(&self) -> Vec<Order> {
        self.state.read().await.filtered()
    }

    /// Look up one loaded order
    pub async fn get(&self, id: &str) -> Option<Order> {
        let state = self.state.read().await;
        state.position(id).map(|idx| state.orders[idx].clone())
    }

    pub async fn search_term(&self) -> String {
        self.state.read().await.search_term.clone()
    }

    pub async fn view_state(&self) -> ViewState {
        self.state.read().await.view.clone()
    }

    /// Last per-operation failure message, if any
    pub async fn notice(&self) -> Option<String> {
        self.state.read().await.notice.clone()
    }

    pub async fn clear_notice(&self) {
        self.state.write().await.notice = None;
    }

    // ========== Search ==========

    /// Set the search term and return the resulting view
    ///
    /// Always filters the canonical collection, never the previous view.
    pub async fn search(&self, term: &str) -> Vec<Order> {
        let mut state = self.state.write().await;
        state.search_term = term.to_string();
        state.filtered()
    }

    // ========== Writes ==========

    /// Change one field of one order from raw user input
    ///
    /// Input that does not parse for the field is rejected before anything
    /// changes. Under the optimistic policy the local change stays even when
    /// the remote write fails; the failure is returned and kept as a notice.
    #[instrument(skip(self, raw), fields(order_id = %id, field = %field))]
    pub async fn update_field(&self, id: &str, field: OrderField, raw: &str) -> ClientResult<Order> {
        let patch = OrderPatch::parse(field, raw).inspect_err(|e| {
            warn!(error = %e, "Rejected field input");
        })?;

        if self.get(id).await.is_none() {
            return Err(ClientError::NotFound(id.to_string()));
        }

        match self.policies.update {
            WritePolicy::Optimistic => {
                let updated = self
                    .state
                    .write()
                    .await
                    .apply(id, &patch)
                    .ok_or_else(|| ClientError::NotFound(id.to_string()))?;

                if let Err(e) = self.api.update_order(id, &patch).await {
                    return Err(self.fail(UPDATE_FAILED_NOTICE, ClientError::Update(Box::new(e))).await);
                }
                info!("Order field updated");
                Ok(updated)
            }
            WritePolicy::Pessimistic => {
                if let Err(e) = self.api.update_order(id, &patch).await {
                    return Err(self.fail(UPDATE_FAILED_NOTICE, ClientError::Update(Box::new(e))).await);
                }
                let updated = self
                    .state
                    .write()
                    .await
                    .apply(id, &patch)
                    .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
                info!("Order field updated");
                Ok(updated)
            }
        }
    }

    /// Remove an order
    ///
    /// Under the default pessimistic policy the order leaves the store only
    /// after the remote delete succeeded; on failure nothing changes.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        if self.get(id).await.is_none() {
            return Err(ClientError::NotFound(id.to_string()));
        }

        match self.policies.delete {
            WritePolicy::Pessimistic => {
                if let Err(e) = self.api.delete_order(id).await {
                    return Err(self.fail(DELETE_FAILED_NOTICE, ClientError::Delete(Box::new(e))).await);
                }
                self.state.write().await.remove(id);
            }
            WritePolicy::Optimistic => {
                self.state.write().await.remove(id);
                if let Err(e) = self.api.delete_order(id).await {
                    return Err(self.fail(DELETE_FAILED_NOTICE, ClientError::Delete(Box::new(e))).await);
                }
            }
        }

        info!("Order deleted");
        Ok(())
    }

    /// Record a per-operation failure as the current notice
    async fn fail(&self, notice: &str, error: ClientError) -> ClientError {
        warn!(error = %error, "{}", notice);
        self.state.write().await.notice = Some(notice.to_string());
        error
    }
}

/// Keep orders no older than `window` at `now`, newest first
///
/// Orders whose date/time does not parse are dropped: their age cannot be
/// shown to be within the window. Equal timestamps keep their input order.
pub fn recent_orders(orders: Vec<Order>, now: NaiveDateTime, window: TimeDelta) -> Vec<Order> {
    let total = orders.len();
    let mut dated: Vec<(NaiveDateTime, Order)> = orders
        .into_iter()
        .filter_map(|order| order.timestamp().map(|ts| (ts, order)))
        .collect();

    let undated = total - dated.len();
    if undated > 0 {
        warn!(count = undated, "Dropped orders with unparseable date/time");
    }

    dated.retain(|(ts, _)| within_window(*ts, now, window));
    // Vec::sort_by is stable
    dated.sort_by(|(a, _), (b, _)| b.cmp(a));
    dated.into_iter().map(|(_, order)| order).collect()
}
