//! Artifact emitters. Both produce [`OutputFile`](crate::output::OutputFile)
//! lists with paths relative to the output directory; nothing here touches the
//! filesystem.

pub use scaffold::*;
pub use widget::*;

mod scaffold;
mod widget;
