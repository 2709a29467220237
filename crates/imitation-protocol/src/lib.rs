pub mod endpoints;
pub mod frames;
pub mod http;

pub use frames::{EndReason, InboundFrame, OutboundFrame, Reveal};
