//! Benchmark execution engine
//!
//! Every benchmark follows the same lifecycle against a TerminusDB image
//! built at the requested commit:
//!
//! 1. **Provision** (`source.rs`, `container.rs`): clone, checkout, image build.
//! 2. **Dispatch** (`js.rs`, `lego.rs`, `k6.rs`): start a container, run one
//!    benchmark driver, stop the container.
//! 3. **Cleanup**: remove the checkout and the image.
//!
//! `orchestrator.rs` sequences the three; `process.rs` and `wait.rs` are the
//! seams to the outside world.

pub mod container;
pub mod js;
pub mod k6;
pub mod lego;
pub mod orchestrator;
pub mod process;
pub mod source;
pub mod wait;

pub use container::ContainerManager;
pub use orchestrator::Orchestrator;
pub use process::{CommandRunner, SystemCommandRunner};
pub use wait::{ContainerWaiter, FixedDelay};
