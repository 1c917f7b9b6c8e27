// SPDX-FileCopyrightText: 2026 Ansera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unique-identifier generation for entities and messages.

/// Generates the unique external identifier assigned to every new entity and
/// message. Queue consumers de-duplicate by this value, so it must be unique
/// across the deployment, not merely per-process.
pub trait UidGenerator: Send + Sync {
    fn get_uid(&self) -> String;
}

/// Default generator backed by UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl UidGenerator for UuidGenerator {
    fn get_uid(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
