use std::future::Future;

use dioxus::prelude::*;

use crate::data_client::{ListSlot, SlotUpdate};
use crate::error::FetchError;

/// Fetches a list once on mount and keeps it in a [`ListSlot`].
///
/// The request runs as a task of the calling scope, so it is cancelled when
/// the component unmounts and a late response never lands.
pub fn use_fetched_list<T, F, Fut>(label: &'static str, fetch: F) -> Signal<ListSlot<T>>
where
    T: 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, FetchError>> + 'static,
{
    let mut slot = use_signal(ListSlot::<T>::default);

    use_hook(move || {
        let request = fetch();
        spawn(async move {
            let result = request.await;
            let update = slot.write().apply(result);
            match update {
                SlotUpdate::Rendered(count) => tracing::debug!("{label}: rendered {count} items"),
                SlotUpdate::Empty => tracing::debug!("{label}: empty response, keeping placeholder"),
                SlotUpdate::Failed(err) => tracing::error!("Error fetching {label}: {err}"),
            }
        })
    });

    slot
}
