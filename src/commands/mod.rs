pub mod backups;
pub mod config;
pub mod diff;
pub mod experiment;
pub mod history;
pub mod ignore;
pub mod menu;
pub mod restore;
pub mod save;
pub mod status;
pub mod sync;

pub use backups::*;
pub use config::*;
pub use diff::*;
pub use experiment::*;
pub use history::*;
pub use ignore::*;
pub use menu::*;
pub use restore::*;
pub use save::*;
pub use status::*;
pub use sync::*;
