/// Session-oriented rendering API.
pub mod render_session;
