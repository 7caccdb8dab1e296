use chrono::NaiveDate;
use serde::Serialize;

use crate::entity::{event, menu, slide};

/// Resolve a stored URL against the configured public base.
///
/// Stored URLs are always store-relative (`/uploads/...`); absolute URLs
/// pass through untouched. This is the only layer that absolutizes.
pub fn absolutize(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), url)
    }
}

/// Menu tree node for the public navigation.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MenuNode {
    pub id: i32,
    pub label: String,
    pub url: Option<String>,
    pub page_slug: Option<String>,
    pub parent_id: Option<i32>,
    #[schema(no_recursion)]
    pub children: Vec<MenuNode>,
}

/// Assemble the flat menu rows (with joined page slugs) into a tree.
/// Children of missing parents fall back to the top level.
pub fn menu_tree(rows: Vec<(menu::Model, Option<String>)>) -> Vec<MenuNode> {
    let ids: std::collections::HashSet<i32> = rows.iter().map(|(m, _)| m.id).collect();

    let mut children_of: std::collections::HashMap<i32, Vec<MenuNode>> = Default::default();
    let mut roots: Vec<MenuNode> = Vec::new();

    // Rows arrive parents-first, so a child's parent node exists by the time
    // the child is attached below.
    for (m, page_slug) in rows.into_iter().rev() {
        let node = MenuNode {
            id: m.id,
            label: m.label,
            url: m.url,
            page_slug,
            parent_id: m.parent_id,
            children: children_of.remove(&m.id).unwrap_or_default(),
        };
        match m.parent_id {
            Some(pid) if ids.contains(&pid) => {
                children_of.entry(pid).or_default().push(node);
            }
            _ => roots.push(node),
        }
    }

    roots.reverse();
    for bucket in children_of.values_mut() {
        bucket.reverse();
    }
    roots
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PublicSlide {
    pub id: i32,
    pub image: Option<String>,
    pub caption: Option<String>,
    pub link: Option<String>,
    pub sort_order: i32,
}

impl PublicSlide {
    pub fn from_model(base_url: &str, model: slide::Model) -> Self {
        Self {
            id: model.id,
            image: model.image.map(|u| absolutize(base_url, &u)),
            caption: model.caption,
            link: model.link,
            sort_order: model.sort_order,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PublicEvent {
    pub id: i32,
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
    pub image: Option<String>,
}

impl PublicEvent {
    pub fn from_model(base_url: &str, model: event::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            date: model.date,
            description: model.description,
            image: model.image.map(|u| absolutize(base_url, &u)),
        }
    }
}

/// Homepage introduction block, assembled from the settings row.
#[derive(Serialize, utoipa::ToSchema)]
pub struct IntroResponse {
    pub intro_title: String,
    pub intro_html: String,
    /// Intro image, falling back to the site logo; absolute when resolvable.
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, parent_id: Option<i32>, label: &str) -> (menu::Model, Option<String>) {
        (
            menu::Model {
                id,
                label: label.to_string(),
                url: None,
                page_id: None,
                parent_id,
                sort_order: 0,
            },
            None,
        )
    }

    #[test]
    fn absolutize_leaves_absolute_urls_alone() {
        assert_eq!(
            absolutize("https://cms.example.org", "https://cdn.example.org/x.png"),
            "https://cdn.example.org/x.png"
        );
        assert_eq!(
            absolutize("https://cms.example.org/", "/uploads/x.png"),
            "https://cms.example.org/uploads/x.png"
        );
    }

    #[test]
    fn menu_tree_nests_children_under_parents() {
        let rows = vec![row(1, None, "Home"), row(2, None, "About"), row(3, Some(2), "Staff")];
        let tree = menu_tree(rows);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[1].label, "About");
        assert_eq!(tree[1].children.len(), 1);
        assert_eq!(tree[1].children[0].label, "Staff");
    }

    #[test]
    fn menu_tree_orphaned_child_becomes_top_level() {
        let rows = vec![row(1, None, "Home"), row(9, Some(42), "Lost")];
        let tree = menu_tree(rows);
        assert_eq!(tree.len(), 2);
    }
}
