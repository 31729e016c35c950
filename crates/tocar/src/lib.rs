//! Tocar: Rust-Native UI Interaction Testing
//!
//! Tocar (Spanish: "to touch") drives an in-process tree of widgets the way
//! a user would: find a control by the text on screen, tap it, type into
//! it, then assert on what changed. Hidden content is unreachable, disabled
//! controls swallow input, and only the frontmost screen answers queries,
//! matching what a person at the device could actually see and touch.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      TOCAR Architecture                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌──────────┐    ┌───────────┐    ┌───────────┐    ┌─────────┐  │
//! │   │ Test     │    │ App       │    │ Front +   │    │ Widget  │  │
//! │   │ (Rust)   │───►│ driver    │───►│ matcher   │───►│ tree    │  │
//! │   │          │    │           │    │           │    │         │  │
//! │   └──────────┘    └───────────┘    └───────────┘    └─────────┘  │
//! │        ▲                                                 │       │
//! │        └──────────── scheduler (deferred effects) ◄──────┘       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use tocar::{App, Node};
//!
//! let root = Node::group()
//!     .with_child(Node::label("Welcome"))
//!     .with_child(Node::button("Continue"));
//!
//! let app = App::new(root);
//! let label = app.label("Welcome").unwrap().unwrap();
//! assert_eq!(label.text(), "Welcome");
//! ```
//!
//! Interactions whose effect lands on a later run-loop turn, dismissing a
//! modal above all, return a deferred [`Outcome`]; settle it before the
//! next query:
//!
//! ```
//! use tocar::{App, Node, Scheduler};
//!
//! let scheduler = Scheduler::new();
//! let host = Node::overlay().with_child(Node::label("Base"));
//! host.present(Node::label("Sheet"));
//!
//! let app = App::new(host.clone()).with_scheduler(scheduler.clone());
//! assert!(app.label("Sheet").unwrap().is_some());
//!
//! host.dismiss_top(&scheduler);
//! // Still frontmost until the scheduled turn runs.
//! assert!(app.label("Sheet").unwrap().is_some());
//! assert!(scheduler.run_one());
//! assert!(app.label("Base").unwrap().is_some());
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod driver;
mod element;
mod front;
mod matcher;
mod node;
mod policy;
mod result;
mod scheduler;
mod snapshot;

pub use driver::{App, RootSource};
pub use element::{Alert, Button, CellHandle, Label, Slider, Stepper, TextInput, Toggle};
pub use matcher::Criteria;
pub use node::{ElementKind, Node, NodeRef};
pub use policy::FailurePolicy;
pub use result::{TocarError, TocarResult};
pub use scheduler::{Completion, Outcome, Scheduler};
pub use snapshot::NodeSnapshot;

/// Commonly used types, importable as a block.
pub mod prelude {
    pub use super::{
        App, Criteria, FailurePolicy, Node, NodeRef, Outcome, Scheduler, TocarError, TocarResult,
    };
}
