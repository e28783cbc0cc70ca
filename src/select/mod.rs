//! Card selection: filters, the filter queue, and the selection solvers.
//!
//! ## Plain pick
//!
//! "Select between min and max cards" prompts are answered by letting each
//! queued filter claim the first unclaimed card it matches.
//!
//! ## Sum selection
//!
//! "Select cards adding up to N" prompts go through [`sum::plan`], which
//! completes the filter claims with a threshold fill or an exact-sum search.
//!
//! Both are tentative until the answer is encoded; only then are the claiming
//! filters removed from the queue.

mod advancor;
mod filter;
mod pick;
pub mod sum;

pub use advancor::SelectCardAdvancor;
pub use filter::{FilterMatch, FilterQueue, SelectionFilter};
pub use pick::{pick, Pick};
pub use sum::{SumPlan, Weight};
