use serde::Serialize;
use std::fmt;

/// One entry of a solve result.
///
/// `Vertex` is a vertex that belongs to no component of two or more vertices;
/// `Component` is a strongly connected component with at least two members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResultEntry<V> {
    Vertex(V),
    Component(Vec<V>),
}

impl<V> ResultEntry<V> {
    pub fn members(&self) -> &[V] {
        match self {
            ResultEntry::Vertex(v) => std::slice::from_ref(v),
            ResultEntry::Component(vs) => vs,
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self, ResultEntry::Component(_))
    }
}

impl<V: fmt::Display> fmt::Display for ResultEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultEntry::Vertex(v) => write!(f, "{v}"),
            ResultEntry::Component(vs) => write_list(f, vs),
        }
    }
}

/// Renders a full result as `[1, [2, 3], 4]`.
pub fn render_entries<V: fmt::Display>(entries: &[ResultEntry<V>]) -> String {
    struct Entries<'a, V>(&'a [ResultEntry<V>]);

    impl<V: fmt::Display> fmt::Display for Entries<'_, V> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_list(f, self.0)
        }
    }

    Entries(entries).to_string()
}

pub(crate) fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

/// Outcome of the cycle-checked topological pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologicalOutcome<V> {
    /// Every vertex, in reverse-finish order.
    Ordered(Vec<V>),
    /// A back-edge was found; no partial order is kept.
    CycleDetected,
}

#[derive(Debug, Clone)]
pub struct SccResult<V> {
    /// Components in discovery order, members sorted ascending.
    pub components: Vec<Vec<V>>,
    /// Size >= 2, or a single vertex with a self-loop.
    pub cyclic_component: Vec<bool>,
}

impl<V> SccResult<V> {
    pub fn cyclic_count(&self) -> usize {
        self.cyclic_component.iter().filter(|&&b| b).count()
    }

    pub fn into_entries(self) -> Vec<ResultEntry<V>> {
        self.components
            .into_iter()
            .filter_map(|mut comp| match comp.len() {
                0 => None,
                1 => comp.pop().map(ResultEntry::Vertex),
                _ => Some(ResultEntry::Component(comp)),
            })
            .collect()
    }
}
