/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Lifecycle state shared by courses, accounts, terms and sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, IntoStaticStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowState {
    Unknown,
    Unpublished,
    Available,
    Completed,
    Deleted,
    Active,
    Registered,
    PreRegistered,
    CreationPending,
}

/// Enrollment roles, used to filter user listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, IntoStaticStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EnrollmentType {
    Teacher,
    Student,
    StudentView,
    Ta,
    Observer,
    Designer,
}

/// Alternate identifiers a user can be looked up by
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum UserIdType {
    SisUserId,
    SisLoginId,
    SisIntegrationId,
    LtiContextId,
    LtiUserId,
    Uuid,
}

