//! HTTP handlers organized by surface.

pub mod admin;
pub mod content;
pub mod view;

pub(crate) use admin::{
    close_session, generate_bio, open_session, remove_project, replace_projects, set_bio,
    set_secret, set_showreel, upsert_project,
};
pub(crate) use content::{
    get_bio, get_content, get_project, get_showreel, health, list_projects,
};
pub(crate) use view::{about_view, api_not_found, home_view, index_view, select_surface};
