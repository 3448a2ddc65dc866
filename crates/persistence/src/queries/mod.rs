// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic read queries.
//!
//! All queries use Diesel DSL exclusively and are monomorphized for each
//! supported backend via the `backend_fn!` macro. Backend dispatch happens
//! in the `Persistence` adapter, never here.

pub mod dashboard;
pub mod dispatch;
pub mod events;
pub mod invites;
pub mod messages;
pub mod profiles;
pub mod sessions;
