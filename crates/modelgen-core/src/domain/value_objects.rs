//! Domain value objects: DataType, Cardinality.
//!
//! # Design
//!
//! These are plain `Copy` value types with equality by value.
//! This file's only job is to define the types, their string
//! representations, their `FromStr` parsers and the cardinality mirror table.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── DataType ──────────────────────────────────────────────────────────────────

/// Primitive type tag carried by an [`Attribute`](crate::domain::Attribute).
///
/// The set is closed: emitters map each tag to a concrete column/field type
/// for their stack, so an unknown tag is rejected at model construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    Boolean,
    Cnpj,
    Cpf,
    Currency,
    Date,
    Datetime,
    Decimal,
    Email,
    File,
    Integer,
    MobilePhoneNumber,
    PhoneNumber,
    String,
    Uuid,
    Void,
    Zipcode,
}

impl DataType {
    pub const ALL: [DataType; 16] = [
        Self::Boolean,
        Self::Cnpj,
        Self::Cpf,
        Self::Currency,
        Self::Date,
        Self::Datetime,
        Self::Decimal,
        Self::Email,
        Self::File,
        Self::Integer,
        Self::MobilePhoneNumber,
        Self::PhoneNumber,
        Self::String,
        Self::Uuid,
        Self::Void,
        Self::Zipcode,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Cnpj => "cnpj",
            Self::Cpf => "cpf",
            Self::Currency => "currency",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Decimal => "decimal",
            Self::Email => "email",
            Self::File => "file",
            Self::Integer => "integer",
            Self::MobilePhoneNumber => "mobilePhoneNumber",
            Self::PhoneNumber => "phoneNumber",
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::Void => "void",
            Self::Zipcode => "zipcode",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::UnknownDataType {
                value: s.to_string(),
            })
    }
}

// ── Cardinality ───────────────────────────────────────────────────────────────

/// Cardinality of a relation, seen from one of its endpoints.
///
/// A declared relation carries the cardinality from the declarer's point of
/// view; the other endpoint sees [`Cardinality::mirror`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "OneToOne",
            Self::OneToMany => "OneToMany",
            Self::ManyToOne => "ManyToOne",
            Self::ManyToMany => "ManyToMany",
        }
    }

    /// Cardinality as seen from the opposite endpoint.
    pub const fn mirror(self) -> Self {
        match self {
            Self::OneToOne => Self::OneToOne,
            Self::OneToMany => Self::ManyToOne,
            Self::ManyToOne => Self::OneToMany,
            Self::ManyToMany => Self::ManyToMany,
        }
    }

    /// Whether the entity declaring a relation of this kind owns it.
    ///
    /// Only `OneToMany` hands ownership to the target.
    pub const fn owner_is_declarer(self) -> bool {
        !matches!(self, Self::OneToMany)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cardinality {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "onetoone" => Ok(Self::OneToOne),
            "onetomany" => Ok(Self::OneToMany),
            "manytoone" => Ok(Self::ManyToOne),
            "manytomany" => Ok(Self::ManyToMany),
            _ => Err(DomainError::UnknownCardinality {
                value: s.to_string(),
            }),
        }
    }
}
