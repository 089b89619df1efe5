use crate::state::Wallpaper;

/// Keywords that mark a wallpaper as desktop/landscape oriented.
pub const DESKTOP_KEYWORDS: &[&str] = &["desktop", "landscape", "wide", "horizontal"];

/// Keywords that mark a wallpaper as phone/portrait oriented.
pub const MOBILE_KEYWORDS: &[&str] = &["mobile", "phone", "portrait", "vertical"];

/// Outcome of the mobile-listing heuristic for one wallpaper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MobileVerdict {
    /// A desktop keyword matched; the wallpaper is hidden.
    Excluded(&'static str),
    /// A mobile keyword matched; the wallpaper is shown.
    Included(&'static str),
    /// No keyword matched; the wallpaper is shown by default.
    Defaulted,
}

impl MobileVerdict {
    /// Whether the wallpaper belongs in mobile listings.
    #[must_use]
    pub const fn is_included(self) -> bool {
        !matches!(self, Self::Excluded(_))
    }
}

/// What: Classify a wallpaper for mobile listings from its category and title.
///
/// Inputs:
/// - `wallpaper`: Record to classify.
///
/// Output:
/// - `MobileVerdict` naming the keyword that decided, or `Defaulted`.
///
/// Details:
/// - Desktop keywords are checked before mobile ones, so a title naming both is excluded.
/// - No image dimensions are inspected; this is text matching only.
#[must_use]
pub fn classify_mobile(wallpaper: &Wallpaper) -> MobileVerdict {
    let category = wallpaper.category.as_deref().unwrap_or_default().to_lowercase();
    let title = wallpaper.title.as_deref().unwrap_or_default().to_lowercase();
    let hit = |keywords: &[&'static str]| {
        keywords
            .iter()
            .copied()
            .find(|kw| category.contains(kw) || title.contains(kw))
    };
    if let Some(kw) = hit(DESKTOP_KEYWORDS) {
        return MobileVerdict::Excluded(kw);
    }
    if let Some(kw) = hit(MOBILE_KEYWORDS) {
        return MobileVerdict::Included(kw);
    }
    MobileVerdict::Defaulted
}

/// What: Keep only wallpapers suitable for mobile listings.
///
/// Inputs:
/// - `wallpapers`: Records in backend order.
///
/// Output:
/// - Filtered records, order preserved.
#[must_use]
pub fn filter_mobile_wallpapers(wallpapers: Vec<Wallpaper>) -> Vec<Wallpaper> {
    let total = wallpapers.len();
    let kept: Vec<Wallpaper> = wallpapers
        .into_iter()
        .filter(|w| match classify_mobile(w) {
            MobileVerdict::Excluded(kw) => {
                tracing::debug!(id = %w.id, title = w.display_title(), keyword = kw, "[Filter] excluding desktop wallpaper");
                false
            }
            MobileVerdict::Included(_) | MobileVerdict::Defaulted => true,
        })
        .collect();
    tracing::debug!(kept = kept.len(), total, "[Filter] mobile filter applied");
    kept
}
