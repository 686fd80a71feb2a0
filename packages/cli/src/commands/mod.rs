pub mod edit;
pub mod init;
pub mod preview;
pub mod seed;
pub mod templates;
pub mod widgets;

pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use preview::{preview, PreviewArgs};
pub use seed::{seed, SeedArgs};
pub use templates::{templates, TemplatesArgs};
pub use widgets::{widgets, WidgetsArgs};
