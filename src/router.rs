//! View selection.
//!
//! The admin surface is selected by the reserved `#admin` fragment (the
//! browser convention) or the `/admin` path (the server-side equivalent,
//! since fragments never reach a server). Everything else is public.
//! Within the public surface, home vs. gallery index is separate in-memory
//! state that never touches the location.

use serde::Serialize;

/// Reserved fragment/path segment selecting the admin surface.
pub const ADMIN_TOKEN: &str = "admin";

/// Which surface a location selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewSelector {
    Public,
    Admin,
}

impl ViewSelector {
    /// Derives the selector from a location such as `/`, `/#admin`,
    /// `https://site.example/admin?x=1` or a bare `#admin`.
    pub fn from_location(location: &str) -> Self {
        let (before_fragment, fragment) = match location.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (location, None),
        };

        if fragment == Some(ADMIN_TOKEN) {
            return Self::Admin;
        }

        let path = before_fragment
            .split_once('?')
            .map_or(before_fragment, |(path, _)| path);
        let path = strip_origin(path).trim_end_matches('/');
        if path == format!("/{ADMIN_TOKEN}") {
            Self::Admin
        } else {
            Self::Public
        }
    }
}

/// Page shown inside the public surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicView {
    #[default]
    Home,
    GalleryIndex,
}

/// Tracks the current location and view state of one client.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    location: String,
    selector: ViewSelector,
    public_view: PublicView,
}

impl ViewRouter {
    pub fn new(location: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            selector: ViewSelector::from_location(&location),
            location,
            public_view: PublicView::Home,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn selector(&self) -> ViewSelector {
        self.selector
    }

    pub fn public_view(&self) -> PublicView {
        self.public_view
    }

    /// Re-evaluates the selector after a fragment change or history
    /// navigation. The public page state is left alone.
    pub fn navigate(&mut self, location: impl Into<String>) -> ViewSelector {
        self.location = location.into();
        self.selector = ViewSelector::from_location(&self.location);
        self.selector
    }

    pub fn show_home(&mut self) {
        self.public_view = PublicView::Home;
    }

    pub fn show_gallery_index(&mut self) {
        self.public_view = PublicView::GalleryIndex;
    }

    /// Leaves the admin surface: clears the admin fragment or path and
    /// flips back to public. Returns the new location.
    pub fn close_admin(&mut self) -> &str {
        let without_fragment = match self.location.split_once('#') {
            Some((rest, _)) => rest.to_string(),
            None => self.location.clone(),
        };
        self.location = if ViewSelector::from_location(&without_fragment) == ViewSelector::Admin {
            replace_admin_path(&without_fragment)
        } else {
            without_fragment
        };
        self.selector = ViewSelector::Public;
        &self.location
    }
}

/// Drops `scheme://host` so only the path remains.
fn strip_origin(location: &str) -> &str {
    match location.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |index| &rest[index..]),
        None => location,
    }
}

fn replace_admin_path(location: &str) -> String {
    let (path_part, query) = match location.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (location, None),
    };
    let origin_len = path_part.len() - strip_origin(path_part).len();
    let mut result = format!("{}/", &path_part[..origin_len]);
    if let Some(query) = query {
        result.push('?');
        result.push_str(query);
    }
    result
}
