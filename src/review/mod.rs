pub mod categorize;
pub mod render;

pub use render::{AttachmentStyle, Report, ReportStyle, TemplateStyle};
