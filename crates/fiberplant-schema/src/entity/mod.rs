//! Entity structs, one file per hierarchy node kind.

mod enclosure;
mod frame;
mod head_end;
mod port;
mod project;
mod splice;
mod splitter;
mod tray;

pub use enclosure::{Enclosure, EnclosureKind};
pub use frame::{DistributionFrame, FramePort};
pub use head_end::HeadEndTerminal;
pub use port::{Customer, SubscriberPort};
pub use project::{Project, ProjectStatus};
pub use splice::{FiberColors, OtdrEvent, OtdrEventKind, OtdrTrace, Splice, SpliceKind, SpliceStatus};
pub use splitter::{SplitRatio, Splitter};
pub use tray::Tray;
