// Stateless preview, template catalogue and export endpoints.
// Each request runs the layout pipeline from scratch on the blocking pool.

pub mod handlers;
