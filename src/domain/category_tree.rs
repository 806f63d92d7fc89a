//! Hierarchical view over category records.
//!
//! The tree is an ID-indexed arena: a node map plus parent/children index
//! vectors. Lookup by id is O(1) and every traversal uses an explicit stack,
//! so arbitrarily deep forests cannot exhaust the call stack. The tree itself
//! is immutable once built; selection and expansion state live in
//! [`TreeSelection`], owned by the calling layer.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::CategoryId;

/// Serde shape for backend-nested category payloads (`children` populated).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

/// Arena-backed category forest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTree {
    nodes: HashMap<CategoryId, Category>,
    children: HashMap<CategoryId, Vec<CategoryId>>,
    roots: Vec<CategoryId>,
}

impl CategoryTree {
    /// Build the forest from flat records by grouping on `parent_id`.
    ///
    /// Roots are categories without a parent; a record whose parent is not in
    /// the input set is treated as a root as well, so [`Self::flatten`] always
    /// yields every input exactly once. Siblings are ordered by `order`, ties
    /// broken by stable input order.
    pub fn from_flat(categories: Vec<Category>) -> Self {
        let ids: HashSet<CategoryId> = categories.iter().map(|c| c.id).collect();
        let input_index: HashMap<CategoryId, usize> = categories
            .iter()
            .enumerate()
            .map(|(index, c)| (c.id, index))
            .collect();

        let mut roots = Vec::new();
        let mut children: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();
        let mut nodes = HashMap::new();

        for category in categories {
            match category.parent_id {
                Some(parent_id) if ids.contains(&parent_id) => {
                    children.entry(parent_id).or_default().push(category.id);
                }
                _ => roots.push(category.id),
            }
            nodes.insert(category.id, category);
        }

        let sibling_key = |id: &CategoryId| {
            (
                nodes[id].order.get(),
                input_index.get(id).copied().unwrap_or(usize::MAX),
            )
        };
        roots.sort_by_key(sibling_key);
        for siblings in children.values_mut() {
            siblings.sort_by_key(sibling_key);
        }

        Self {
            nodes,
            children,
            roots,
        }
    }

    /// Build the forest from backend-nested payloads, using the given nesting
    /// and sibling order as-is.
    pub fn from_nested(top_level: Vec<CategoryNode>) -> Self {
        let mut nodes = HashMap::new();
        let mut children: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();
        let roots: Vec<CategoryId> = top_level.iter().map(|n| n.category.id).collect();

        let mut stack: Vec<CategoryNode> = top_level;
        while let Some(node) = stack.pop() {
            let id = node.category.id;
            children.insert(id, node.children.iter().map(|c| c.category.id).collect());
            nodes.insert(id, node.category);
            stack.extend(node.children);
        }

        Self {
            nodes,
            children,
            roots,
        }
    }

    /// O(1) lookup; a miss is `None`, never an error.
    pub fn find(&self, id: CategoryId) -> Option<&Category> {
        self.nodes.get(&id)
    }

    /// Root category ids in sibling order.
    pub fn roots(&self) -> &[CategoryId] {
        &self.roots
    }

    /// Child ids of `id` in sibling order.
    pub fn children(&self, id: CategoryId) -> &[CategoryId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order id sequence: every node exactly once, self before children.
    pub fn flatten_ids(&self) -> Vec<CategoryId> {
        let mut ordered = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<CategoryId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            ordered.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        ordered
    }

    /// Pre-order traversal of the records themselves.
    pub fn flatten(&self) -> Vec<&Category> {
        self.flatten_ids()
            .into_iter()
            .filter_map(|id| self.nodes.get(&id))
            .collect()
    }

    /// Flat option list for parent-selection widgets.
    ///
    /// The category being edited is excluded so it can never be offered as its
    /// own ancestor.
    pub fn parent_options(&self, exclude: Option<CategoryId>) -> Vec<&Category> {
        self.flatten()
            .into_iter()
            .filter(|category| Some(category.id) != exclude)
            .collect()
    }

    /// Derived nested view, e.g. for JSON responses.
    pub fn to_nested(&self) -> Vec<CategoryNode> {
        let mut built: HashMap<CategoryId, CategoryNode> = HashMap::new();
        let order = self.flatten_ids();
        // Reverse pre-order guarantees children are assembled before parents.
        for id in order.iter().rev() {
            let children = self
                .children(*id)
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            if let Some(category) = self.nodes.get(id) {
                built.insert(
                    *id,
                    CategoryNode {
                        category: category.clone(),
                        children,
                    },
                );
            }
        }
        self.roots
            .iter()
            .filter_map(|id| built.remove(id))
            .collect()
    }
}

/// Selection and expansion state over a [`CategoryTree`].
///
/// The two sets are independent: selecting a category never expands or
/// collapses anything, and neither set cascades to ancestors or descendants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TreeSelection {
    selected: HashSet<CategoryId>,
    expanded: HashSet<CategoryId>,
}

fn toggle(set: &mut HashSet<CategoryId>, id: CategoryId) {
    if !set.remove(&id) {
        set.insert(id);
    }
}

impl TreeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected(ids: impl IntoIterator<Item = CategoryId>) -> Self {
        Self {
            selected: ids.into_iter().collect(),
            expanded: HashSet::new(),
        }
    }

    pub fn with_expanded(ids: impl IntoIterator<Item = CategoryId>) -> Self {
        Self {
            selected: HashSet::new(),
            expanded: ids.into_iter().collect(),
        }
    }

    pub fn toggle_select(&mut self, id: CategoryId) {
        toggle(&mut self.selected, id);
    }

    pub fn toggle_expand(&mut self, id: CategoryId) {
        toggle(&mut self.expanded, id);
    }

    pub fn is_selected(&self, id: CategoryId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_expanded(&self, id: CategoryId) -> bool {
        self.expanded.contains(&id)
    }

    /// Selected ids, sorted for stable serialization.
    pub fn selected_ids(&self) -> Vec<CategoryId> {
        let mut ids: Vec<CategoryId> = self.selected.iter().copied().collect();
        ids.sort();
        ids
    }

    /// Expanded ids, sorted for stable serialization.
    pub fn expanded_ids(&self) -> Vec<CategoryId> {
        let mut ids: Vec<CategoryId> = self.expanded.iter().copied().collect();
        ids.sort();
        ids
    }

    /// Resolve the selected ids back into records in tree pre-order.
    ///
    /// Ids that no longer exist in the tree are dropped silently.
    pub fn resolve_selected<'a>(&self, tree: &'a CategoryTree) -> Vec<&'a Category> {
        tree.flatten()
            .into_iter()
            .filter(|category| self.is_selected(category.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CategoryName, CategorySlug, SortOrder};
    use chrono::DateTime;

    fn category(id: i32, parent: Option<i32>, order: i32, name: &str) -> Category {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            slug: CategorySlug::new(name.to_lowercase().replace(' ', "-")).unwrap(),
            parent_id: parent.map(|p| CategoryId::new(p).unwrap()),
            order: SortOrder::new(order).unwrap(),
            created_at: ts,
            updated_at: ts,
        }
    }

    fn sample_forest() -> Vec<Category> {
        vec![
            category(1, None, 0, "Motion"),
            category(2, Some(1), 1, "Typography"),
            category(3, Some(1), 0, "Product"),
            category(4, None, 1, "Live Action"),
            category(5, Some(4), 0, "Interview"),
        ]
    }

    #[test]
    fn flatten_yields_every_category_once_parents_first() {
        let cats = sample_forest();
        let count = cats.len();
        let tree = CategoryTree::from_flat(cats);

        let flat = tree.flatten();
        assert_eq!(flat.len(), count);

        let mut seen = HashSet::new();
        for (position, cat) in flat.iter().enumerate() {
            assert!(seen.insert(cat.id));
            if let Some(parent_id) = cat.parent_id {
                let parent_position = flat
                    .iter()
                    .position(|c| c.id == parent_id)
                    .expect("parent present");
                assert!(parent_position < position);
            }
        }
    }

    #[test]
    fn siblings_order_by_weight_then_input_order() {
        let tree = CategoryTree::from_flat(sample_forest());
        let names: Vec<&str> = tree
            .flatten()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Motion", "Product", "Typography", "Live Action", "Interview"]
        );
    }

    #[test]
    fn order_ties_keep_input_order() {
        let tree = CategoryTree::from_flat(vec![
            category(7, None, 0, "Second"),
            category(6, None, 0, "Third"),
            category(5, None, 0, "First"),
        ]);
        // All three share order 0, so input order decides.
        let names: Vec<&str> = tree.flatten().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "Third", "First"]);
    }

    #[test]
    fn dangling_parent_becomes_root() {
        let tree = CategoryTree::from_flat(vec![
            category(1, None, 0, "Root"),
            category(2, Some(99), 0, "Orphan"),
        ]);
        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.flatten().len(), 2);
    }

    #[test]
    fn nested_and_flat_inputs_agree() {
        let flat_tree = CategoryTree::from_flat(sample_forest());
        let nested_tree = CategoryTree::from_nested(flat_tree.to_nested());

        let flat_ids = flat_tree.flatten_ids();
        let nested_ids = nested_tree.flatten_ids();
        assert_eq!(flat_ids, nested_ids);
    }

    #[test]
    fn find_is_none_for_unknown_id() {
        let tree = CategoryTree::from_flat(sample_forest());
        assert!(tree.find(CategoryId::new(42).unwrap()).is_none());
    }

    #[test]
    fn parent_options_exclude_edited_category_for_every_node() {
        let tree = CategoryTree::from_flat(sample_forest());
        for category in tree.flatten() {
            let options = tree.parent_options(Some(category.id));
            assert_eq!(options.len(), tree.len() - 1);
            assert!(options.iter().all(|c| c.id != category.id));
        }
    }

    #[test]
    fn double_toggle_restores_selection() {
        let mut selection = TreeSelection::new();
        let id = CategoryId::new(3).unwrap();

        selection.toggle_select(id);
        assert!(selection.is_selected(id));
        selection.toggle_select(id);
        assert!(!selection.is_selected(id));
        assert_eq!(selection, TreeSelection::new());
    }

    #[test]
    fn selection_and_expansion_are_independent() {
        let mut selection = TreeSelection::new();
        let id = CategoryId::new(1).unwrap();

        selection.toggle_select(id);
        assert!(!selection.is_expanded(id));
        selection.toggle_expand(id);
        selection.toggle_select(id);
        assert!(selection.is_expanded(id));
    }

    #[test]
    fn resolve_selected_drops_unknown_ids() {
        let tree = CategoryTree::from_flat(sample_forest());
        let mut selection = TreeSelection::new();
        selection.toggle_select(CategoryId::new(2).unwrap());
        selection.toggle_select(CategoryId::new(42).unwrap());

        let resolved = selection.resolve_selected(&tree);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id.get(), 2);
    }
}
