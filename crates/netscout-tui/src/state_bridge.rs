//! State bridge: forwards published [`DashboardState`] snapshots from the
//! controller to the TUI as [`Action::StateUpdated`].
//!
//! [`DashboardState`]: netscout_core::DashboardState

use netscout_core::DashboardState;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::action::Action;

/// Push the current snapshot, then every subsequent change, until the
/// controller goes away, the app stops listening, or `cancel` fires.
pub async fn spawn_state_bridge(
    mut state_rx: watch::Receiver<DashboardState>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let initial = state_rx.borrow_and_update().clone();
    if action_tx.send(Action::StateUpdated(Box::new(initial))).is_err() {
        return;
    }

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                if action_tx.send(Action::StateUpdated(Box::new(state))).is_err() {
                    break;
                }
            }
        }
    }

    debug!("state bridge shut down");
}
