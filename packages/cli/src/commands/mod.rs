pub mod countdown;
pub mod fields;
pub mod init;
pub mod settings;
pub mod transfer;
pub mod version;

pub use countdown::{countdown, CountdownArgs};
pub use fields::{example, get, set, show, ExampleArgs, GetArgs, SetArgs, ShowArgs};
pub use init::{init, InitArgs};
pub use settings::{cta, media, section, theme, CtaArgs, MediaArgs, SectionArgs, ThemeArgs};
pub use transfer::{export, import, template, ExportArgs, ImportArgs, TemplateArgs};
pub use version::{version, VersionCommand};
