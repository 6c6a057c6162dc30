// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The process-wide message log and its on-disk mirror.

pub mod log;

pub use log::{Message, MessageLog};
