mod live_monitoring;
mod source_panel;

pub use live_monitoring::render_live_monitoring;
pub use source_panel::{SourceAction, render_source_panel};
