pub mod apply;
pub mod destroy;
pub mod refresh;
pub mod show;
