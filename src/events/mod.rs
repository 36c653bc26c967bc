//! # Events Module
//!
//! Progress reporting over channels.
//!
//! The duplicate remover and the image loader emit events through an
//! [`EventSender`]; any front end can drain the matching [`EventReceiver`]
//! on another thread.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Compare(CompareEvent::Progress(p)) = event {
//!             println!("{}/{}", p.comparisons_completed, p.total_comparisons);
//!         }
//!     }
//! });
//!
//! let outcome = remover.run_with_events(images, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
