//! Branch ordering for a bakery chain.
//!
//! The service side keeps the catalog (products, categories, branches) and
//! placed orders in resource actors behind a small REST API. The client side
//! ([`builder`], [`draft`], [`checkout`]) lets a branch operator pick
//! products, edit a persisted draft and submit it as an order.

pub mod actor_framework;
pub mod app_system;
pub mod builder;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod domain;
pub mod draft;
pub mod http;

pub mod branch_actor;
pub mod category_actor;
pub mod order_actor;
pub mod product_actor;

#[cfg(test)]
mod mock_framework;
