// Filter / search / paginate view-model for the project gallery
use std::collections::HashSet;

use crate::models::{Category, CategoryFilter, Project};
use crate::reconcile::reconcile;

/// Cards per gallery page
pub const PAGE_SIZE: usize = 6;

/// Gallery state; every transition goes through one of the reducers below
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    items: Vec<Project>,
    filter: CategoryFilter,
    search: String,
    /// 1-based
    page: usize,
}

impl GalleryState {
    /// Initial snapshot, before any fetch result arrives
    pub fn new(items: Vec<Project>) -> Self {
        Self {
            items,
            filter: CategoryFilter::All,
            search: String::new(),
            page: 1,
        }
    }

    pub fn items(&self) -> &[Project] {
        &self.items
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Merge freshly fetched GitHub projects into the list
    pub fn apply_fetch_result(&mut self, fetched: Vec<Project>) {
        self.items = reconcile(&self.items, fetched);
        self.page = self.page.clamp(1, self.total_pages());
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.page = 1;
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.search != search {
            self.search = search;
            self.page = 1;
        }
    }

    /// Jump to `page`, clamped to `[1, total_pages]`
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Projects passing the active filter and search term
    pub fn visible(&self) -> Vec<&Project> {
        let needle = self.search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|p| self.filter.accepts(p.category))
            .filter(|p| needle.is_empty() || matches_search(p, &needle))
            .collect()
    }

    /// Always at least 1, even when nothing matches
    pub fn total_pages(&self) -> usize {
        total_pages(self.visible().len())
    }

    /// Slice of `visible()` for the current page
    pub fn page_items(&self) -> Vec<&Project> {
        let start = (self.page - 1) * PAGE_SIZE;
        self.visible().into_iter().skip(start).take(PAGE_SIZE).collect()
    }

    /// `All` followed by the master-list categories present in the items
    pub fn categories(&self) -> Vec<CategoryFilter> {
        let present: HashSet<Category> = self.items.iter().map(|p| p.category).collect();
        std::iter::once(CategoryFilter::All)
            .chain(
                Category::ALL
                    .iter()
                    .filter(|c| present.contains(c))
                    .map(|c| CategoryFilter::Only(*c)),
            )
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&Project> {
        self.items.iter().find(|p| p.id == id)
    }
}

pub fn total_pages(count: usize) -> usize {
    ((count + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
}

/// `needle` must already be trimmed and lowercased
fn matches_search(project: &Project, needle: &str) -> bool {
    project.title.to_lowercase().contains(needle)
        || project.description.to_lowercase().contains(needle)
        || project
            .technologies
            .iter()
            .any(|tech| tech.to_lowercase().contains(needle))
}
