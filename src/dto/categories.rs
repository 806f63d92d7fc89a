use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::category_tree::{CategoryTree, TreeSelection};

/// Flat option for parent/category select widgets.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryOption {
    pub id: i32,
    pub name: String,
}

impl From<&Category> for CategoryOption {
    fn from(value: &Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.as_str().to_string(),
        }
    }
}

/// One rendered row of the category table or picker.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i32>,
    /// Display name of the parent; a dangling reference renders as no parent.
    pub parent_name: Option<String>,
    pub order: i32,
    pub level: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub selected: bool,
}

fn build_rows(tree: &CategoryTree, selection: &TreeSelection, only_visible: bool) -> Vec<CategoryRow> {
    let mut rows = Vec::with_capacity(tree.len());
    // (id, level) pairs; explicit stack keeps deep forests safe.
    let mut stack: Vec<(crate::domain::types::CategoryId, usize)> =
        tree.roots().iter().rev().map(|id| (*id, 0)).collect();

    while let Some((id, level)) = stack.pop() {
        let Some(category) = tree.find(id) else {
            continue;
        };
        let children = tree.children(id);
        let expanded = selection.is_expanded(id);

        rows.push(CategoryRow {
            id: category.id.get(),
            name: category.name.as_str().to_string(),
            slug: category.slug.as_str().to_string(),
            parent_id: category.parent_id.map(|p| p.get()),
            parent_name: category
                .parent_id
                .and_then(|p| tree.find(p))
                .map(|parent| parent.name.as_str().to_string()),
            order: category.order.get(),
            level,
            has_children: !children.is_empty(),
            expanded,
            selected: selection.is_selected(id),
        });

        if !only_visible || expanded {
            stack.extend(children.iter().rev().map(|child| (*child, level + 1)));
        }
    }

    rows
}

/// Rows visible under the given expansion state (collapsed subtrees skipped).
pub fn visible_rows(tree: &CategoryTree, selection: &TreeSelection) -> Vec<CategoryRow> {
    build_rows(tree, selection, true)
}

/// Every row regardless of expansion, e.g. for the category picker.
pub fn all_rows(tree: &CategoryTree, selection: &TreeSelection) -> Vec<CategoryRow> {
    build_rows(tree, selection, false)
}

/// Parent options for the add/edit forms, excluding the edited category.
pub fn parent_options(
    tree: &CategoryTree,
    exclude: Option<crate::domain::types::CategoryId>,
) -> Vec<CategoryOption> {
    tree.parent_options(exclude)
        .into_iter()
        .map(CategoryOption::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CategoryId, CategoryName, CategorySlug, SortOrder};
    use chrono::DateTime;

    fn category(id: i32, parent: Option<i32>, name: &str) -> Category {
        let ts = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            slug: CategorySlug::new(name.to_lowercase()).unwrap(),
            parent_id: parent.map(|p| CategoryId::new(p).unwrap()),
            order: SortOrder::new(0).unwrap(),
            created_at: ts,
            updated_at: ts,
        }
    }

    fn sample_tree() -> CategoryTree {
        CategoryTree::from_flat(vec![
            category(1, None, "Motion"),
            category(2, Some(1), "Product"),
            category(3, None, "Live"),
        ])
    }

    #[test]
    fn collapsed_children_are_hidden() {
        let tree = sample_tree();
        let rows = visible_rows(&tree, &TreeSelection::new());
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Motion", "Live"]);
        assert!(rows[0].has_children);
    }

    #[test]
    fn expanded_children_render_with_level() {
        let tree = sample_tree();
        let selection = TreeSelection::with_expanded(vec![CategoryId::new(1).unwrap()]);
        let rows = visible_rows(&tree, &selection);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Motion", "Product", "Live"]);
        assert_eq!(rows[1].level, 1);
        assert_eq!(rows[1].parent_name.as_deref(), Some("Motion"));
    }

    #[test]
    fn all_rows_ignore_expansion_state() {
        let tree = sample_tree();
        let rows = all_rows(&tree, &TreeSelection::new());
        assert_eq!(rows.len(), 3);
    }
}
