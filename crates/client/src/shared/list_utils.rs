//! List filtering shared by every grid: case-insensitive substring search

use contracts::domain::a001_usuario::aggregate::Usuario;
use contracts::domain::a002_empresa::aggregate::Empresa;
use contracts::domain::a003_tarea::aggregate::Tarea;
use contracts::shared::options::SelectOption;

/// Types that can be matched against a search term
pub trait Searchable {
    /// `filter` is already lowercased and trimmed
    fn matches_filter(&self, filter: &str) -> bool;
}

fn contains(text: &str, filter: &str) -> bool {
    text.to_lowercase().contains(filter)
}

/// Filter a list by search term
///
/// The term is trimmed before matching, so surrounding whitespace is ignored.
/// Empty or whitespace-only terms return the list unchanged; otherwise the
/// matching items are returned in their original order.
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| item.matches_filter(&filter))
        .cloned()
        .collect()
}

impl<V> Searchable for SelectOption<V> {
    fn matches_filter(&self, filter: &str) -> bool {
        contains(&self.label, filter)
    }
}

impl Searchable for Empresa {
    fn matches_filter(&self, filter: &str) -> bool {
        self.display_fields()
            .iter()
            .any(|(_, value)| contains(value, filter))
    }
}

impl Searchable for Tarea {
    fn matches_filter(&self, filter: &str) -> bool {
        contains(&self.descripcion_tarea, filter) || contains(&self.codigo_tarea, filter)
    }
}

impl Searchable for Usuario {
    fn matches_filter(&self, filter: &str) -> bool {
        contains(self.cedula.as_str(), filter)
            || self
                .text_fields()
                .iter()
                .any(|(_, value)| contains(value, filter))
    }
}
