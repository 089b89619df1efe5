//! Category grouping and lookup over the cached wallpaper list.

use std::collections::HashMap;

use crate::state::Wallpaper;

/// One category tile: its name, how many wallpapers it holds, and a preview image.
#[derive(Clone, Debug, PartialEq)]
pub struct CategorySummary {
    /// Category name (`Uncategorized` for records without one).
    pub name: String,
    /// Number of wallpapers in the category.
    pub count: usize,
    /// Image URL of the first wallpaper in the category, if it has one.
    pub preview_image: Option<String>,
    /// Ids of the member wallpapers in list order.
    pub wallpaper_ids: Vec<String>,
}

/// What: Group wallpapers by category.
///
/// Inputs:
/// - `wallpapers`: Cached list in display order.
///
/// Output:
/// - Summaries sorted by count (descending), then name (case-insensitive).
///
/// Details:
/// - The preview comes from the first member in list order, even when that member has no image.
#[must_use]
pub fn group_by_category(wallpapers: &[Wallpaper]) -> Vec<CategorySummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CategorySummary> = Vec::new();
    for w in wallpapers {
        let name = w.category_or_default();
        if let Some(&pos) = index.get(name) {
            out[pos].count += 1;
            out[pos].wallpaper_ids.push(w.id.clone());
        } else {
            index.insert(name, out.len());
            out.push(CategorySummary {
                name: name.to_string(),
                count: 1,
                preview_image: w.image_url().map(str::to_string),
                wallpaper_ids: vec![w.id.clone()],
            });
        }
    }
    out.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    out
}

/// What: Narrow category summaries by a search query.
///
/// Inputs:
/// - `categories`: Summaries from [`group_by_category`].
/// - `query`: Free-text query; blank keeps everything.
///
/// Output:
/// - Summaries whose name contains the query, case-insensitively.
#[must_use]
pub fn search_categories(categories: Vec<CategorySummary>, query: &str) -> Vec<CategorySummary> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return categories;
    }
    categories
        .into_iter()
        .filter(|c| c.name.to_lowercase().contains(&q))
        .collect()
}

/// What: List the wallpapers of one category.
///
/// Inputs:
/// - `wallpapers`: Cached list.
/// - `category`: Exact category name; `Uncategorized` selects records without one.
///
/// Output:
/// - Matching wallpapers in list order.
#[must_use]
pub fn in_category<'a>(wallpapers: &'a [Wallpaper], category: &str) -> Vec<&'a Wallpaper> {
    if category.is_empty() {
        return Vec::new();
    }
    wallpapers
        .iter()
        .filter(|w| w.category_or_default() == category)
        .collect()
}
