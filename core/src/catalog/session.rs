use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::{Product, SortMode, sort_products};

/// Generation number of a dispatched search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTicket(u64);

/// View state of a product list screen.
///
/// Searches complete out of order; only the results for the most recent ticket are kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchSession {
    query: String,
    sort: Option<SortMode>,
    products: Vec<Product>,
    generation: u64,
    pending: Option<SearchTicket>,
}

impl SearchSession {
    /// `sort: None` keeps products in the order the API returned them.
    pub fn new(query: impl Into<String>, sort: Option<SortMode>) -> Self {
        Self {
            query: query.into(),
            sort,
            ..Default::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> Option<SortMode> {
        self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a search for the current query, superseding any in flight.
    pub fn refresh(&mut self) -> SearchTicket {
        self.generation += 1;
        let ticket = SearchTicket(self.generation);
        self.pending = Some(ticket);
        ticket
    }

    /// Returns a ticket only when the query actually changed.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<SearchTicket> {
        let query = query.into();
        if query == self.query {
            return None;
        }
        self.query = query;
        Some(self.refresh())
    }

    pub fn set_sort(&mut self, sort: SortMode) -> bool {
        if self.sort == Some(sort) {
            return false;
        }
        self.sort = Some(sort);
        true
    }

    /// Stores results for `ticket`, returning `false` if a newer search superseded it.
    pub fn apply_results(&mut self, ticket: SearchTicket, products: Vec<Product>) -> bool {
        if self.pending != Some(ticket) {
            log::debug!("dropping stale results for {:?}", ticket);
            return false;
        }
        self.pending = None;
        self.products = products;
        true
    }

    /// Products in display order.
    pub fn visible(&self) -> Vec<Product> {
        let mut products = self.products.clone();
        if let Some(sort) = self.sort {
            sort_products(&mut products, sort);
        }
        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, SearchApi};
    use alloc::string::ToString;
    use alloc::vec;

    fn product(id: u32, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            description: String::new(),
            price,
        }
    }

    #[test]
    fn stale_results_do_not_overwrite_newer_query() {
        let catalog = Catalog::builtin().unwrap();
        let mut session = SearchSession::new("", None);

        let first = session.set_query("t").unwrap();
        let second = session.set_query("tv").unwrap();

        assert!(session.apply_results(second, catalog.search("tv")));
        assert!(!session.apply_results(first, catalog.search("t")));
        assert_eq!(session.visible(), catalog.search("tv"));
        assert!(!session.is_loading());
    }

    #[test]
    fn unchanged_query_does_not_search_again() {
        let mut session = SearchSession::new("tv", None);
        assert_eq!(session.set_query("tv"), None);
        assert!(!session.is_loading());
    }

    #[test]
    fn loading_until_latest_ticket_lands() {
        let mut session = SearchSession::new("", None);
        let ticket = session.refresh();

        assert!(session.is_loading());
        assert!(session.apply_results(ticket, vec![product(1, "a", 1.0)]));
        assert!(!session.is_loading());
    }

    #[test]
    fn visible_applies_sort_mode() {
        let mut session = SearchSession::new("", Some(SortMode::Name));
        let ticket = session.refresh();
        session.apply_results(
            ticket,
            vec![product(1, "zapatillas", 5.0), product(2, "antena", 50.0)],
        );

        let names: Vec<u32> = session.visible().iter().map(|p| p.id).collect();
        assert_eq!(names, [2, 1]);

        assert!(session.set_sort(SortMode::Price));
        assert!(!session.set_sort(SortMode::Price));
        let prices: Vec<u32> = session.visible().iter().map(|p| p.id).collect();
        assert_eq!(prices, [1, 2]);
    }

    #[test]
    fn unsorted_session_keeps_api_order() {
        let mut session = SearchSession::new("", None);
        let ticket = session.refresh();
        session.apply_results(ticket, vec![product(1, "z", 5.0), product(2, "a", 1.0)]);

        let ids: Vec<u32> = session.visible().iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2]);
    }
}
