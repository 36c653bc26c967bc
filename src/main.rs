//! # bitmap-dedup CLI
//!
//! Command-line interface for the bitmap comparator.
//!
//! ## Usage
//! ```bash
//! bitmap-dedup compare a.png b.png
//! bitmap-dedup dedup ~/Screenshots --match-threshold 40 --difference-threshold 20
//! ```

mod cli;

use bitmap_dedup::Result;

fn main() -> Result<()> {
    bitmap_dedup::init_tracing();
    cli::run()
}
