//! Dashboard views and navigation-parameter resolution.

use std::fmt;
use tracing::info;

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// `roi_tracker`
    #[default]
    RoiTracker,
    /// `performance_tracker`
    PerformanceTracker,
    /// `roi_marketing`
    MarketingRoi,
}

impl View {
    /// Sidebar order.
    pub const ALL: [View; 3] = [View::RoiTracker, View::PerformanceTracker, View::MarketingRoi];

    /// Navigation parameter naming this view.
    pub fn slug(self) -> &'static str {
        match self {
            View::RoiTracker => "roi_tracker",
            View::PerformanceTracker => "performance_tracker",
            View::MarketingRoi => "roi_marketing",
        }
    }

    /// Sidebar and page title.
    pub fn title(self) -> &'static str {
        match self {
            View::RoiTracker => "ROI Tracker",
            View::PerformanceTracker => "Performance Tracker",
            View::MarketingRoi => "Marketing ROI",
        }
    }

    /// View named by an exact slug.
    pub fn from_slug(slug: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.slug() == slug)
    }

    /// Resolve a navigation parameter. Absent or unknown values land on the
    /// default view; unknown values are logged as a redirect.
    pub fn resolve(param: Option<&str>) -> View {
        match param {
            None => View::default(),
            Some(slug) => View::from_slug(slug.trim().trim_start_matches('/')).unwrap_or_else(|| {
                info!(requested = slug, redirect = View::default().slug(), "Unknown view, redirecting");
                View::default()
            }),
        }
    }

    /// Position in the sidebar.
    pub fn index(self) -> usize {
        View::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    /// View at a 1-based sidebar number.
    pub fn from_number(n: usize) -> Option<View> {
        n.checked_sub(1).and_then(|i| View::ALL.get(i).copied())
    }

    /// Following sidebar entry, wrapping around.
    pub fn next(self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    /// Preceding sidebar entry, wrapping around.
    pub fn previous(self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
