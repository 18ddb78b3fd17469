#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Order Dispatch
//!
//! > **The order lifecycle and real-time notification core of a food-ordering platform.**
//!
//! Three kinds of users meet around one mutable entity, the order: the
//! customer who places it, the restaurant owner who cooks it, and the driver
//! who delivers it. This crate prices orders, decides who may see and move
//! them, drives them through their state machine, and pushes every change to
//! exactly the subscribers who should hear about it.
//!
//! ## 🏗️ Design
//!
//! ### Stores are actors
//! Orders, dishes and restaurants each live in a `ResourceActor<T>`: one Tokio
//! task owns the rows and handles one request at a time. A status change is a
//! guarded action that re-checks its precondition against the stored row and
//! commits only if it still holds, the in-process equivalent of
//! `UPDATE ... WHERE id = ? AND status = ?`. Two drivers racing for one order
//! are therefore ordered by the store; the loser gets a `Conflict`.
//!
//! ### Commit, then publish
//! The service publishes an event only after the write has come back. Publish
//! never blocks on or fails because of a subscriber; a slow subscriber skips
//! what it missed and the current state is always one `get_order` away.
//!
//! ### Roles as tables
//! Who sees what ([`policy::VisibilityPolicy`]), who may drive which edge
//! ([`order_actor::transitions`]) and who may call which operation
//! ([`service::gate`]) are all data, not scattered conditionals.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` / `ResourceClient<T>` pair and the
//! [`mock`](framework::mock) helpers used throughout the tests.
//!
//! ### 2. The Domain ([`model`], [`pricing`], [`policy`])
//! Plain data, the pure pricing functions, and the visibility rules.
//!
//! ### 3. The Stores ([`order_actor`], [`dish_actor`], [`restaurant_actor`])
//! `ActorEntity` implementations. The order actor also holds the transition
//! table and the [`OrderError`](order_actor::OrderError) taxonomy.
//!
//! ### 4. The Interface ([`clients`])
//! Typed clients implementing the seams the service depends on:
//! [`OrderRepository`](clients::OrderRepository),
//! [`MenuCatalog`](clients::MenuCatalog) and
//! [`RestaurantDirectory`](clients::RestaurantDirectory).
//!
//! ### 5. Notifications ([`events`])
//! The injected [`EventBus`](events::EventBus) and its
//! [`Subscription`](events::Subscription) streams.
//!
//! ### 6. The Facade ([`service`]) and the Orchestrator ([`lifecycle`])
//! [`OrderService`](service::OrderService) implements every public
//! operation; [`OrderSystem`](lifecycle::OrderSystem) starts the actors,
//! wires the service and shuts everything down.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Walk one order from Pending to Delivered
//! RUST_LOG=info cargo run
//!
//! cargo test
//! ```

pub mod clients;
pub mod dish_actor;
pub mod events;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod policy;
pub mod pricing;
pub mod restaurant_actor;
pub mod service;
