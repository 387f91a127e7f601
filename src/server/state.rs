use crate::server::store::RecordStore;

#[derive(Clone)]
pub(crate) struct AppState {
    store: RecordStore,
    per_page: usize,
}

impl AppState {
    pub fn new(store: RecordStore, per_page: usize) -> Self {
        Self { store, per_page }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::server::model::record::{FieldValue, OrderRecord};

    #[test]
    fn cloned_state_serves_the_same_orders() {
        let row = |id| OrderRecord::new(vec![("OrderID".to_string(), FieldValue::Int(id))]);
        let state = AppState::new(RecordStore::from(vec![row(1), row(2)]), 25);
        let cloned = state.clone();
        drop(state);
        assert_eq!(cloned.per_page(), 25);
        assert_eq!(cloned.store().records(), &[row(1), row(2)]);
    }
}
