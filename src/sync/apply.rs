//! Event application.
//!
//! Translates one pushed [`OrderEvent`] into cache mutations. Matching is
//! by numeric id equality only; there are no sequence numbers, so an event
//! delivered out of order overwrites or no-ops based on presence, and the
//! cache stays inconsistent until the next baseline refetch.

use tracing::trace;

use crate::cache::OrderCache;
use crate::ws::{EventKind, OrderEvent};

/// Applies a single event to the cache.
///
/// | kind    | payload | list entries                 | by-id entry |
/// |---------|---------|------------------------------|-------------|
/// | created | present | prepend                      | —           |
/// | created | absent  | invalidate all               | —           |
/// | updated | present | replace matching id in place | upsert      |
/// | updated | absent  | invalidate all               | —           |
/// | deleted | present | filter out matching id       | remove      |
/// | deleted | absent  | no-op (nothing to match)     | —           |
///
/// Events are global, not filter-scoped, so list actions touch every
/// cached list entry. An absent payload leaves no id to invalidate on the
/// by-id side; only the lists can be dropped.
pub fn apply_event(cache: &dyn OrderCache, event: &OrderEvent) {
    trace!("applying {} event for order {:?}", event.event, event.order_id());

    match (event.event, &event.order) {
        (EventKind::Created, Some(order)) => {
            cache.update_lists(&mut |_, orders| {
                orders.insert(0, order.clone());
            });
        }
        (EventKind::Created, None) => {
            cache.invalidate_all_lists();
        }
        (EventKind::Updated, Some(order)) => {
            cache.update_lists(&mut |_, orders| {
                for cached in orders.iter_mut() {
                    if cached.id == order.id {
                        *cached = order.clone();
                    }
                }
            });
            cache.put_order(order.clone());
        }
        (EventKind::Updated, None) => {
            cache.invalidate_all_lists();
        }
        (EventKind::Deleted, Some(order)) => {
            let id = order.id;
            cache.update_lists(&mut |_, orders| {
                orders.retain(|cached| cached.id != id);
            });
            cache.remove_order(id);
        }
        (EventKind::Deleted, None) => {}
    }
}
