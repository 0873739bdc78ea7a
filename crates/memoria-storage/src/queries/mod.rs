// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query operations grouped by entity.

pub mod artifacts;
pub mod dialogue;
pub mod memories;
pub mod owners;
