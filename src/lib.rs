//! Core runtime for gesture-driven physics interaction
//!
//! This crate turns a stream of hand/face keypoints into semantic
//! gestures and uses those gestures to drive a live simulation:
//!
//! 1. **Feature extraction** – projects one normalized 21-joint hand
//!    sample into rig space and derives per-finger extension and pinch
//!    scores ([`features`]).
//! 2. **Classification** – maps the scores to exactly one discrete
//!    gesture plus a full confidence vector via an ordered,
//!    first-match-wins rule table ([`classifier`]).
//! 3. **Interaction** – per-object grab state machine with hysteresis
//!    and spring-force synthesis ([`grab`]), gesture-triggered
//!    spawning with rate limits ([`spawn`]), a bounded object registry
//!    with insertion-order eviction ([`registry`]), and emitter
//!    proximity tinting ([`proximity`]).
//!
//! Camera frames, the landmark model, rendering and the physics
//! integrator are external collaborators; the [`engine`] module wires
//! the pieces into a per-frame pipeline and exposes directives for
//! them. When the `wasm` feature is enabled the crate also exposes a
//! JavaScript binding layer; otherwise it is pure Rust usable from any
//! host.

pub mod classifier;
pub mod engine;
pub mod face;
pub mod features;
pub mod geometry;
pub mod grab;
pub mod hand;
pub mod proximity;
pub mod registry;
pub mod spawn;

#[cfg(feature = "wasm")]
pub mod wasm_bindings;
