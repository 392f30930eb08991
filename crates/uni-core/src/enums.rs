//! Enumerated backend values.
//!
//! The backend stores these as Korean labels, so serde renames every variant
//! to its wire label. Each enum also carries an English alias accepted on the
//! command line and a `CHOICES` table used by the form schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// One option of a choice-valued form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Value sent to and received from the backend.
    pub wire: &'static str,
    /// English alias accepted as input.
    pub alias: &'static str,
}

impl Choice {
    /// Resolve user input (wire label or alias, case-insensitive) to a wire label.
    #[must_use]
    pub fn resolve(choices: &[Self], raw: &str) -> Option<&'static str> {
        let raw = raw.trim();
        choices
            .iter()
            .find(|choice| choice.wire == raw || choice.alias.eq_ignore_ascii_case(raw))
            .map(|choice| choice.wire)
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => ($wire:literal, $alias:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Options for the form schema.
            pub const CHOICES: &'static [Choice] = &[
                $(Choice { wire: $wire, alias: $alias },)+
            ];

            /// Wire label stored by the backend.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// English alias.
            #[must_use]
            pub const fn alias(self) -> &'static str {
                match self {
                    $(Self::$variant => $alias,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match Choice::resolve(Self::CHOICES, raw) {
                    $(Some($wire) => Ok(Self::$variant),)+
                    _ => Err(CoreError::InvalidValue {
                        field: stringify!($name).to_string(),
                        reason: format!("'{raw}' is not one of {}", describe(Self::CHOICES)),
                    }),
                }
            }
        }
    };
}

fn describe(choices: &[Choice]) -> String {
    choices
        .iter()
        .map(|choice| format!("{} ({})", choice.wire, choice.alias))
        .collect::<Vec<_>>()
        .join(", ")
}

wire_enum! {
    /// Degree program a student is enrolled in.
    ProgramLevel {
        Bachelor => ("학사", "bachelor"),
        Master => ("석사", "master"),
        Doctoral => ("박사", "doctoral"),
    }
}

wire_enum! {
    /// Academic standing of a student.
    AcademicStatus {
        Enrolled => ("재학", "enrolled"),
        Leave => ("휴학", "leave"),
        Graduated => ("졸업", "graduated"),
    }
}

wire_enum! {
    /// Processing state of a project expense.
    ExpenseStatus {
        Processing => ("처리중", "processing"),
        Completed => ("집행완료", "completed"),
        Rejected => ("반려", "rejected"),
    }
}

/// Role attached to an authenticated user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
