// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod cart;
pub mod menu;
pub mod payment;
pub mod review;
pub mod user;

pub use cart::CartItem;
pub use menu::MenuItem;
pub use payment::Payment;
pub use review::Review;
pub use user::{Role, User};
