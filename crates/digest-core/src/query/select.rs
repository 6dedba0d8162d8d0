//! Query composition: per-entity defaults layered under per-call parts

use std::fmt;
use std::marker::PhantomData;

use super::column::Entity;
use super::filter::Filter;
use super::pager::Pager;
use super::sort::{compare_by, SortField};

/// Which columns a query materializes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection<C> {
    /// Every column of the entity
    Full,
    /// Only the listed columns
    Columns(Vec<C>),
}

/// Per-call additions to a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions<C> {
    pub filters: Vec<Filter<C>>,
    pub sort: Vec<SortField<C>>,
}

impl<C> QueryOptions<C> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort: Vec::new(),
        }
    }

    /// Add a predicate on top of the search filters
    pub fn filter(mut self, filter: Filter<C>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append a sort field; any caller sort replaces the entity default
    pub fn sort_by(mut self, field: SortField<C>) -> Self {
        self.sort.push(field);
        self
    }
}

impl<C> Default for QueryOptions<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter registry and default sort of one entity
pub struct QueryConfig<E: Entity> {
    default_filters: Vec<Filter<E::Column>>,
    default_sort: Vec<SortField<E::Column>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> QueryConfig<E> {
    pub fn new() -> Self {
        Self {
            default_filters: Vec::new(),
            default_sort: E::default_sort(),
            _entity: PhantomData,
        }
    }

    /// Register a predicate applied to every query of the entity
    pub fn with_default_filter(mut self, filter: Filter<E::Column>) -> Self {
        self.default_filters.push(filter);
        self
    }

    /// Replace the sort used when the caller supplies none
    pub fn with_default_sort(mut self, sort: Vec<SortField<E::Column>>) -> Self {
        self.default_sort = sort;
        self
    }

    pub fn default_filters(&self) -> &[Filter<E::Column>] {
        &self.default_filters
    }

    pub fn default_sort(&self) -> &[SortField<E::Column>] {
        &self.default_sort
    }

    /// Compose a query. Defaults come first, then `filters`, then the
    /// option filters. Key columns are appended to the sort so rows with
    /// equal sort values always come back in the same order.
    pub fn select(
        &self,
        filters: Vec<Filter<E::Column>>,
        options: QueryOptions<E::Column>,
        pager: Pager,
        projection: Projection<E::Column>,
    ) -> Select<E> {
        let mut all_filters = self.default_filters.clone();
        all_filters.extend(filters);
        all_filters.extend(options.filters);

        let mut sort = if options.sort.is_empty() {
            self.default_sort.clone()
        } else {
            options.sort
        };
        for key in E::KEY {
            if !sort.iter().any(|field| field.column == *key) {
                sort.push(SortField::asc(*key));
            }
        }

        Select {
            filters: all_filters,
            sort,
            projection,
            pager: pager.normalized(),
        }
    }
}

impl<E: Entity> Default for QueryConfig<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Clone for QueryConfig<E> {
    fn clone(&self) -> Self {
        Self {
            default_filters: self.default_filters.clone(),
            default_sort: self.default_sort.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for QueryConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryConfig")
            .field("table", &E::TABLE)
            .field("default_filters", &self.default_filters)
            .field("default_sort", &self.default_sort)
            .finish()
    }
}

/// A fully composed query, ready to be rendered or evaluated
pub struct Select<E: Entity> {
    pub filters: Vec<Filter<E::Column>>,
    pub sort: Vec<SortField<E::Column>>,
    pub projection: Projection<E::Column>,
    pub pager: Pager,
}

impl<E: Entity> Select<E> {
    /// Columns to materialize, duplicates removed
    pub fn columns(&self) -> Vec<E::Column> {
        match &self.projection {
            Projection::Full => E::COLUMNS.to_vec(),
            Projection::Columns(columns) => {
                let mut out: Vec<E::Column> = Vec::with_capacity(columns.len());
                for column in columns {
                    if !out.contains(column) {
                        out.push(*column);
                    }
                }
                out
            }
        }
    }

    /// Whether a record passes every filter
    pub fn matches(&self, record: &E) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    /// Evaluate the query over in-memory rows
    pub fn apply<'a, I>(&self, rows: I) -> Vec<&'a E>
    where
        I: IntoIterator<Item = &'a E>,
    {
        let mut matched: Vec<&E> = rows.into_iter().filter(|r| self.matches(r)).collect();
        matched.sort_by(|a, b| compare_by(&self.sort, a, b));

        let offset = usize::try_from(self.pager.offset().unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = self
            .pager
            .limit()
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        matched.into_iter().skip(offset).take(limit).collect()
    }

    /// Count matching rows, ignoring the pager
    pub fn count<'a, I>(&self, rows: I) -> usize
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        rows.into_iter().filter(|r| self.matches(r)).count()
    }
}

impl<E: Entity> fmt::Debug for Select<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("table", &E::TABLE)
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .field("projection", &self.projection)
            .field("pager", &self.pager)
            .finish()
    }
}
