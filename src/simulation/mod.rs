//! Frame loop: fixed-step movement, per-frame animation and interaction
//!
//! A [`Session`] owns the world and everything generated into it. Callers
//! feed it one [`FrameInput`] per rendered frame.

pub mod clock;
pub mod interaction;
pub mod player;
pub mod session;

pub use clock::FixedTimestep;
pub use interaction::{process_interaction, InteractionFrame};
pub use player::PlayerBody;
pub use session::{FrameInput, Session, SessionSummary, TickReport};
