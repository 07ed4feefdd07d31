//! Declarative filter and sort registries.
//!
//! A [`Leaderboard`] pairs a [`FilterRegistry`] (identifier → options plus a
//! predicate-building strategy) with a [`SortRegistry`] (identifier →
//! ascending/descending comparator pair) over a single record type.
//!
//! [`Leaderboard::apply`] is the composition contract a front end calls:
//!
//! 1. Every filter with a non-empty selection builds a predicate; a record is
//!    kept only if all predicates pass. Empty selections are skipped.
//! 2. Kept rows are ordered by the chosen sort, falling back to the
//!    leaderboard's default order when the sort reports `Equal` (or when no
//!    sort is chosen).
//!
//! Input records are only borrowed; the result is a `Vec<&R>`.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::RegistryError;

/// A predicate produced by a filter strategy. Closes over the selection.
pub type Predicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// A strict weak ordering over two records.
pub type Comparator<R> = fn(&R, &R) -> Ordering;

/// Turns a selected subset of option values into a predicate.
pub type Strategy<R, V> = fn(&[V]) -> Predicate<R>;

// ── Filters ──

/// One selectable entry in a filter's option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption<V> {
    pub label: String,
    pub value: V,
}

impl<V> FilterOption<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Generate `n` options labelled `1..=n` carrying zero-based values.
///
/// `option_sequence(3, Ward)` yields `("1", Ward(0)), ("2", Ward(1)), ("3", Ward(2))`.
pub fn option_sequence<V>(n: u8, value: impl Fn(u8) -> V) -> Vec<FilterOption<V>> {
    (0..n)
        .map(|i| FilterOption::new((u16::from(i) + 1).to_string(), value(i)))
        .collect()
}

/// A filter: its display options and the strategy that turns a selection
/// of option values into a predicate.
pub struct FilterDef<R, V> {
    options: Vec<FilterOption<V>>,
    strategy: Strategy<R, V>,
}

impl<R, V> FilterDef<R, V> {
    pub fn new(options: Vec<FilterOption<V>>, strategy: Strategy<R, V>) -> Self {
        Self { options, strategy }
    }

    /// Options in display order.
    pub fn options(&self) -> &[FilterOption<V>] {
        &self.options
    }

    /// Build the predicate for `selected`.
    ///
    /// Emptiness is not special-cased here: membership filters reject every
    /// record for an empty selection. [`Leaderboard::apply`] skips empty
    /// selections instead of calling this.
    pub fn predicate(&self, selected: &[V]) -> Predicate<R> {
        (self.strategy)(selected)
    }
}

impl<R, V: Clone> FilterDef<R, V> {
    /// Every declared option value, i.e. the full selection.
    pub fn values(&self) -> Vec<V> {
        self.options.iter().map(|o| o.value.clone()).collect()
    }
}

impl<R, V: fmt::Display> FilterDef<R, V> {
    /// Map a user token to an option value.
    ///
    /// Labels are matched before value text so one-based labels win over
    /// zero-based values ("3" selects the option labelled "3"). Matching is
    /// ASCII case-insensitive.
    pub fn resolve(&self, token: &str) -> Option<&V> {
        let token = token.trim();
        self.options
            .iter()
            .find(|o| o.label.eq_ignore_ascii_case(token))
            .or_else(|| {
                self.options
                    .iter()
                    .find(|o| o.value.to_string().eq_ignore_ascii_case(token))
            })
            .map(|o| &o.value)
    }
}

impl<R, V: fmt::Debug> fmt::Debug for FilterDef<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterDef")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Filter definitions keyed by identifier, in declaration order.
pub struct FilterRegistry<R, V> {
    defs: IndexMap<&'static str, FilterDef<R, V>>,
}

impl<R, V> Default for FilterRegistry<R, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, V> FilterRegistry<R, V> {
    pub fn new() -> Self {
        Self {
            defs: IndexMap::new(),
        }
    }

    /// Register `def` under `id`, replacing any previous definition.
    pub fn with(mut self, id: &'static str, def: FilterDef<R, V>) -> Self {
        self.defs.insert(id, def);
        self
    }

    pub fn get(&self, id: &str) -> Option<&FilterDef<R, V>> {
        self.defs.get(id)
    }

    pub fn lookup(&self, id: &str) -> Result<&FilterDef<R, V>, RegistryError> {
        self.get(id).ok_or_else(|| RegistryError::UnknownFilter(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FilterDef<R, V>)> {
        self.defs.iter().map(|(id, def)| (*id, def))
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl<R, V: Clone + fmt::Display> FilterRegistry<R, V> {
    /// Resolve user tokens for filter `id` into option values.
    pub fn parse_selection<S: AsRef<str>>(
        &self,
        id: &str,
        tokens: &[S],
    ) -> Result<Vec<V>, RegistryError> {
        let def = self.lookup(id)?;
        tokens
            .iter()
            .map(|t| {
                def.resolve(t.as_ref())
                    .cloned()
                    .ok_or_else(|| RegistryError::UnknownOption {
                        filter: id.to_string(),
                        token: t.as_ref().to_string(),
                    })
            })
            .collect()
    }
}

// ── Sorts ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => f.pad("asc"),
            Direction::Descending => f.pad("desc"),
        }
    }
}

/// Negate `cmp`: `inverse(cmp, a, b) == cmp(a, b).reverse()`.
pub fn inverse<R>(cmp: Comparator<R>, a: &R, b: &R) -> Ordering {
    cmp(a, b).reverse()
}

/// A comparator pair for one sort key.
pub struct SortDef<R> {
    asc: Comparator<R>,
    desc: Option<Comparator<R>>,
}

impl<R> Clone for SortDef<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for SortDef<R> {}

impl<R> SortDef<R> {
    /// A sort whose descending order is the negation of `asc`.
    pub const fn new(asc: Comparator<R>) -> Self {
        Self { asc, desc: None }
    }

    /// A sort with an independently defined descending order.
    pub const fn with_desc(asc: Comparator<R>, desc: Comparator<R>) -> Self {
        Self {
            asc,
            desc: Some(desc),
        }
    }

    /// Whether descending is plain negation of ascending.
    pub fn is_symmetric(&self) -> bool {
        self.desc.is_none()
    }

    pub fn compare(&self, direction: Direction, a: &R, b: &R) -> Ordering {
        match (direction, self.desc) {
            (Direction::Ascending, _) => (self.asc)(a, b),
            (Direction::Descending, Some(desc)) => desc(a, b),
            (Direction::Descending, None) => inverse(self.asc, a, b),
        }
    }
}

impl<R> fmt::Debug for SortDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortDef")
            .field("symmetric", &self.is_symmetric())
            .finish()
    }
}

/// Sort definitions keyed by identifier, in declaration order.
pub struct SortRegistry<R> {
    defs: IndexMap<&'static str, SortDef<R>>,
}

impl<R> Default for SortRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SortRegistry<R> {
    pub fn new() -> Self {
        Self {
            defs: IndexMap::new(),
        }
    }

    pub fn with(mut self, id: &'static str, def: SortDef<R>) -> Self {
        self.defs.insert(id, def);
        self
    }

    pub fn get(&self, id: &str) -> Option<&SortDef<R>> {
        self.defs.get(id)
    }

    pub fn lookup(&self, id: &str) -> Result<&SortDef<R>, RegistryError> {
        self.get(id).ok_or_else(|| RegistryError::UnknownSort(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SortDef<R>)> {
        self.defs.iter().map(|(id, def)| (*id, def))
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

// ── Composition ──

/// Current filter selections and sort choice, owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<V> {
    filters: IndexMap<String, Vec<V>>,
    sort: Option<(String, Direction)>,
}

impl<V> Default for Query<V> {
    fn default() -> Self {
        Self {
            filters: IndexMap::new(),
            sort: None,
        }
    }
}

impl<V> Query<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `values` for filter `id`. Repeating an id replaces its selection.
    pub fn filter(mut self, id: impl Into<String>, values: Vec<V>) -> Self {
        self.filters.insert(id.into(), values);
        self
    }

    pub fn sort(mut self, id: impl Into<String>, direction: Direction) -> Self {
        self.sort = Some((id.into(), direction));
        self
    }

    pub fn filters(&self) -> impl Iterator<Item = (&str, &[V])> {
        self.filters.iter().map(|(id, v)| (id.as_str(), v.as_slice()))
    }

    pub fn sort_choice(&self) -> Option<(&str, Direction)> {
        self.sort.as_ref().map(|(id, dir)| (id.as_str(), *dir))
    }
}

/// A filter registry, a sort registry and the default order for one record type.
pub struct Leaderboard<R, V> {
    name: &'static str,
    filters: FilterRegistry<R, V>,
    sorters: SortRegistry<R>,
    default_order: Comparator<R>,
}

impl<R, V> Leaderboard<R, V> {
    pub fn new(
        name: &'static str,
        filters: FilterRegistry<R, V>,
        sorters: SortRegistry<R>,
        default_order: Comparator<R>,
    ) -> Self {
        Self {
            name,
            filters,
            sorters,
            default_order,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn filters(&self) -> &FilterRegistry<R, V> {
        &self.filters
    }

    pub fn sorters(&self) -> &SortRegistry<R> {
        &self.sorters
    }

    /// Order used when no sort is chosen and to break ties otherwise.
    pub fn default_order(&self) -> Comparator<R> {
        self.default_order
    }

    /// Build the conjunction of every non-empty selection in `query`.
    pub fn predicates(&self, query: &Query<V>) -> Result<Vec<Predicate<R>>, RegistryError> {
        let mut predicates = Vec::new();
        for (id, values) in query.filters() {
            let def = self.filters.lookup(id)?;
            if values.is_empty() {
                continue;
            }
            predicates.push(def.predicate(values));
        }
        Ok(predicates)
    }

    /// Filter then order `records` according to `query`.
    pub fn apply<'a>(
        &self,
        records: &'a [R],
        query: &Query<V>,
    ) -> Result<Vec<&'a R>, RegistryError> {
        let predicates = self.predicates(query)?;
        let sort = match query.sort_choice() {
            Some((id, direction)) => Some((*self.sorters.lookup(id)?, direction)),
            None => None,
        };

        let mut rows: Vec<&R> = records
            .iter()
            .filter(|&r| predicates.iter().all(|p| p(r)))
            .collect();

        let tie_break = self.default_order;
        match sort {
            Some((def, direction)) => {
                rows.sort_by(|a, b| def.compare(direction, a, b).then_with(|| tie_break(a, b)))
            }
            None => rows.sort_by(|a, b| tie_break(a, b)),
        }

        debug!(
            leaderboard = self.name,
            total = records.len(),
            shown = rows.len(),
            filters = predicates.len(),
            sort = ?query.sort_choice(),
            "applied query"
        );
        Ok(rows)
    }
}

impl<R, V> fmt::Debug for Leaderboard<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaderboard")
            .field("name", &self.name)
            .field("filters", &self.filters.ids().collect::<Vec<_>>())
            .field("sorters", &self.sorters.ids().collect::<Vec<_>>())
            .finish()
    }
}
