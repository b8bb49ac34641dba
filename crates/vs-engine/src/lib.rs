//! `vs-engine` — single-threaded discrete-event engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`event_queue`] | `EventQueue<T>` (`BTreeMap<SimTime, VecDeque<Event>>`) |
//! | [`scheduler`]   | `Scheduler` — clock + queue, `schedule_after`/`advance`|
//! | [`pool`]        | `ResourcePool`, `Lease`, `PoolStats`                   |
//! | [`process`]     | `Process` trait, `Wake`, `Suspend`, `ProcessContext`   |
//! | [`engine`]      | `Engine`, `RunReport`                                  |
//! | [`observer`]    | `EngineObserver`, `NoopObserver`                       |
//! | [`error`]       | `EngineError`, `EngineResult<T>`                       |
//!
//! # Dispatch model
//!
//! ```text
//! while let Some(event) = scheduler.advance():      // earliest (time, seq)
//!   wake = event.wake
//!   loop:
//!     suspend = process.resume(wake, ctx)
//!     Timeout(d)  → schedule_after(d, Timeout); break
//!     Acquire(s)  → pool has room? wake = Granted(lease); continue
//!                   otherwise park in the pool's FIFO;      break
//!     Done        → force-release leftover leases; drop;    break
//! ```
//!
//! A release inside `resume` hands the unit straight to the head of the
//! pool's queue and schedules that process at the current time.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let pools = vec![ResourcePool::new(StationId(0), "cashier", 2)?];
//! let mut rng = SimRng::new(42);
//! let mut engine = Engine::<f64>::new(pools, &mut rng);
//! engine.spawn(Box::new(MyProcess::default()));
//! let report = engine.run(&mut NoopObserver)?;
//! ```

pub mod engine;
pub mod error;
pub mod event_queue;
pub mod observer;
pub mod pool;
pub mod process;
pub mod scheduler;


pub use engine::{Engine, RunReport};
pub use error::{EngineError, EngineResult};
pub use event_queue::{Event, EventQueue};
pub use observer::{EngineObserver, NoopObserver};
pub use pool::{Acquire, Lease, PoolStats, ResourcePool};
pub use process::{Process, ProcessContext, Suspend, Wake};
pub use scheduler::{Scheduler, WakeKind, Wakeup};
